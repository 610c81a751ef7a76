use colored::*;
use thiserror::Error;

use tools::errors::ReportCodeErr;
use crate::environment::EnvError;
use crate::values::ValueError;

#[derive(Error, Debug, PartialEq)]
pub enum InterpreterError {
    // Undefined variables
    #[error("{0}")]
    InterpFromEnv(#[from] EnvError),

    // Type mismatch, division by zero, overflow
    #[error("{0}")]
    InterpFromValue(#[from] ValueError),

    #[error("{} while running program. Parenthesis, blocks and loops are nested more than {0} levels deep.", "Error".red().bold())]
    NestingTooDeep(usize),

    #[error("{} while printing value: {0}", "Error".red().bold())]
    Output(String),

    // The AST holds something no parser of this language produces
    #[error("{} malformed program: {0}", "Internal error".red().bold())]
    MalformedProgram(String),
}

impl InterpreterError {
    // Defects of the front end, as opposed to errors of the program itself
    pub fn is_defect(&self) -> bool {
        matches!(self, InterpreterError::MalformedProgram(_))
    }
}

// Implement global trait for final error
impl ReportCodeErr for InterpreterError {}
