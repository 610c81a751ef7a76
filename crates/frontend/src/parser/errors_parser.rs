use colored::*;
use thiserror::*;

use super::{Token, TokenKind};
use tools::errors::ReportCodeErr;

#[derive(Error, Debug, PartialEq)]
pub enum ParserError {
    // Token
    #[error("expected token: -{0:?}-, token found: -{1:?}-")]
    FoundWrongToken(TokenKind, TokenKind),

    #[error("Tryed to use non existant token")]
    EmptyTokenBufferUsed,

    #[error("{} while parsing expression. Expected a number, a string, a variable, a boolean or '(', found: {0:?}", "Error".red().bold())]
    UnexpectedToken(Token),

    #[error("{} while parsing number -{0}-: it doesn't fit in a 64 bits integer", "Error".red().bold())]
    InvalidNumber(String),

    #[error("{} while parsing line. Unexpected -{0}- after the end of the statement", "Error".red().bold())]
    TokenAfterStatement(String),

    // Assignments
    #[error("{} while parsing assignment. Expected variable name, found: -{0}-", "Error".red().bold())]
    ExpectedVarName(String),

    #[error("{} while parsing assignment of -{0}-. Expected '{}' after variable name", "Error".red().bold(), crate::lexer::ASSIGN)]
    ExpectedAssign(String),

    // Expressions
    #[error("{} while parsing comparison. Comparisons can't be chained, found a second: -{0}-. Use parenthesis.", "Error".red().bold())]
    ChainedRelational(String),

    #[error("{} while parsing. Parenthesis, blocks and loops are nested more than {0} levels deep", "Error".red().bold())]
    NestingTooDeep(usize),

    #[error("{} while parsing expression. Expected ')' to close the parenthesis", "Error".red().bold())]
    MissingCloseParen,

    // Blocks and loops
    #[error("{} while parsing block. Expected '{{' to start the block", "Error".red().bold())]
    MissingOpenBrace,

    #[error("{} while parsing block. Expected '}}' to end the block", "Error".red().bold())]
    MissingCloseBrace,

    #[error("{} while parsing loop header: {0}
Syntaxes are:
\t{} (i {} 0; i {} 3; i {} i {} 1) {{ ... }}  ->  initialisation, condition, step
\t{} condition {{ ... }}                   ->  repeat while the condition holds",
"Error".red().bold(), crate::lexer::LOOP, crate::lexer::ASSIGN, crate::lexer::LESS,
crate::lexer::ASSIGN, crate::lexer::ADD, crate::lexer::LOOP)]
    MalformedForHeader(String),
}

// Implement global trait for final error
impl ReportCodeErr for ParserError {}
