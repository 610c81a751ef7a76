use std::collections::VecDeque;

mod errors_parser;
mod expr_parser;
mod stmt_parser;

pub use crate::ast::{ASTNode, Assignment, Block, Expression, StatementKind};
pub use crate::lexer::{Token, TokenKind};
pub use self::errors_parser::ParserError;

use tools::errors::{CodeErr, ReportCodeErr};
use tracing::debug;

// Maximum depth of nested parenthesis, blocks and loops, counted together.
// Each level costs several recursive calls, the bound keeps them within the
// stack of a spawned thread.
pub const MAX_NESTING: usize = 64;

#[derive(Default)]
pub struct Parser {
    tokens: VecDeque<Token>,
    pub ast_nodes: Vec<ASTNode>,
    // Returned by 'at' once the buffer is exhausted
    eof: Token,
    depth: usize,
}

impl Parser {
    pub fn build_ast(&mut self, tokens: VecDeque<Token>) -> Result<(), CodeErr<ParserError>> {
        self.ast_nodes.clear();
        self.depth = 0;
        self.eof = tokens.back().cloned().unwrap_or_default();
        self.tokens = tokens;

        while !self.is_eof() {
            let line = self.at().line;

            let stmt = self
                .parse_statement()
                .map_err(|e| e.to_glob_err(self.at().line))?;

            if let Some(s) = stmt {
                self.check_statement_end()
                    .map_err(|e| e.to_glob_err(self.at().line))?;

                self.ast_nodes.push(ASTNode::new(s, line));
            }
        }

        debug!(statements = self.ast_nodes.len(), "ast built");
        Ok(())
    }

    // A statement ends with its line, a block end or the file end. Otherwise
    // things like: 🖨 x 5  would silently drop the 5
    fn check_statement_end(&self) -> Result<(), ParserError> {
        match self.at().kind {
            TokenKind::EndLine | TokenKind::CloseBrace | TokenKind::EOF => Ok(()),
            _ => Err(ParserError::TokenAfterStatement(self.at().value.clone())),
        }
    }

    fn at(&self) -> &Token {
        self.tokens.front().unwrap_or(&self.eof)
    }

    // Kind of the token 'offset' positions after the current one
    fn peek_kind(&self, offset: usize) -> Option<&TokenKind> {
        self.tokens.get(offset).map(|t| &t.kind)
    }

    fn eat(&mut self) -> Result<Token, ParserError> {
        match self.tokens.pop_front() {
            Some(tk) => Ok(tk),
            None => Err(ParserError::EmptyTokenBufferUsed),
        }
    }

    fn expect_token(&mut self, token_kind: TokenKind) -> Result<Token, ParserError> {
        let tk = self.eat()?;

        if tk.kind != token_kind {
            return Err(ParserError::FoundWrongToken(token_kind, tk.kind));
        }

        Ok(tk)
    }

    // Is end of file
    fn is_eof(&self) -> bool {
        self.at().kind == TokenKind::EOF
    }

    fn skip_end_lines(&mut self) {
        while self.at().kind == TokenKind::EndLine {
            let _ = self.eat();
        }
    }
}
