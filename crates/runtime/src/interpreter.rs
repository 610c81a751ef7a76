mod expr;
mod interp_errors;
mod stmt;

use tools::errors::CodeErr;
pub use interp_errors::InterpreterError;

use super::{environment::Env, output::PrintHandler};
use crate::frontend::ast::ASTNode;

// Maximum depth of nested parenthesis, blocks and loops evaluated, counted
// together as in the parser
pub const MAX_EVAL_DEPTH: usize = 64;

#[derive(Debug, Default)]
pub struct Interpreter {
    output: PrintHandler,
    depth: usize,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_output(PrintHandler::Stdout)
    }

    pub fn with_output(output: PrintHandler) -> Self {
        Self { output, depth: 0 }
    }

    pub fn output(&self) -> &PrintHandler {
        &self.output
    }

    // Runs the statements in order. The first error stops the run, what was
    // assigned or printed before stays.
    pub fn execute_program(
        &mut self,
        nodes: &[ASTNode],
        env: &mut Env,
    ) -> Result<(), CodeErr<InterpreterError>> {
        self.depth = 0;

        for n in nodes {
            self.execute_node(n, env)?;
        }

        Ok(())
    }
}
