use std::io::{self, Write};

// Destination of the print statement. Stdout for the command line, a buffer
// when the output has to be inspected afterward (tests, embedding).
#[derive(Debug, Default)]
pub enum PrintHandler {
    #[default]
    Stdout,
    // One entry per print, whatever the printed text contains
    Buffer(Vec<String>),
}

impl PrintHandler {
    pub fn buffer() -> Self {
        PrintHandler::Buffer(Vec::new())
    }

    // Emits one line. Stdout is flushed at once so lines printed before an
    // error are visible whatever happens next.
    pub fn println(&mut self, msg: &str) -> io::Result<()> {
        match self {
            PrintHandler::Stdout => {
                let mut out = io::stdout().lock();
                writeln!(out, "{msg}")?;
                out.flush()
            }
            PrintHandler::Buffer(lines) => {
                lines.push(msg.to_string());
                Ok(())
            }
        }
    }

    // Captured text as it would appear on stdout, always empty for stdout
    pub fn output(&self) -> String {
        self.lines().iter().map(|l| format!("{l}\n")).collect()
    }

    pub fn lines(&self) -> &[String] {
        match self {
            PrintHandler::Stdout => &[],
            PrintHandler::Buffer(lines) => lines,
        }
    }
}
