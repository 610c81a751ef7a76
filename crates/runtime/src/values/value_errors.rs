use colored::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValueError {
    // Operator or loop, types found, types expected
    #[error("{} while computing value. -{0}- expects {2}, found -{1}-.", "Error".red().bold())]
    TypeMismatch(String, String, String),

    #[error("{} while computing value. Division by zero.", "Error".red().bold())]
    DivisionByZero,

    #[error("{} while computing value. Result of -{1} {0} {2}- doesn't fit in a 64 bits integer.", "Error".red().bold())]
    IntegerOverflow(String, i64, i64),
}
