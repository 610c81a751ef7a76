pub mod environment;
pub mod interpreter;
pub mod output;
pub mod values;

extern crate frontend;
extern crate tools;

pub use frontend::ast::{ASTNode, StatementKind};
