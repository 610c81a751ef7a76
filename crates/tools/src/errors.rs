use std::error::Error;
use std::fmt::Display;

// An error of any phase (lexer, parser, runtime) located at a source line.
// The inner error is kept as is so callers can still match on its variant.
#[derive(Debug, PartialEq)]
pub struct CodeErr<E> {
    pub line: u64,
    pub err: E,
}

impl<E> CodeErr<E> {
    pub fn new(err: E, line: u64) -> Self {
        Self { line, err }
    }

    pub fn into_inner(self) -> E {
        self.err
    }
}

impl<E: Display> Display for CodeErr<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Lines are stored from 0
        write!(f, "Line: {}\n{}", self.line + 1, self.err)
    }
}

impl<E: Error + 'static> Error for CodeErr<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.err)
    }
}

pub trait ReportCodeErr: Sized {
    fn to_glob_err(self, line: u64) -> CodeErr<Self> {
        CodeErr::new(self, line)
    }
}
