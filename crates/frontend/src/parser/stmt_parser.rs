use super::errors_parser::ParserError;
use super::{Parser, MAX_NESTING};

use super::TokenKind;
use super::{ASTNode, Assignment, Block, StatementKind};

impl Parser {
    // Entry point of parsing. Returns None on an empty line
    pub(crate) fn parse_statement(&mut self) -> Result<Option<StatementKind>, ParserError> {
        match self.at().kind {
            // New lines are only used at end of statement, we treat them here
            TokenKind::EndLine => {
                self.eat()?;
                Ok(None)
            }
            TokenKind::Declare => Ok(Some(StatementKind::Assignment(self.parse_assignment()?))),
            // x 📝 ...  is an assignment, x alone is an expression
            TokenKind::Identifier if self.peek_kind(1) == Some(&TokenKind::Assign) => {
                Ok(Some(StatementKind::Assignment(self.parse_assignment()?)))
            }
            TokenKind::Print => {
                self.eat()?;

                Ok(Some(StatementKind::Print {
                    value: self.parse_expression()?,
                }))
            }
            TokenKind::OpenBrace => Ok(Some(StatementKind::Block(self.parse_block()?))),
            TokenKind::Loop => Ok(Some(self.parse_loop()?)),
            _ => Ok(Some(StatementKind::Expression(self.parse_expression()?))),
        }
    }

    // Assignment, the declaration marker is optional:
    //  ⭐️ x 📝 5
    //  x 📝 x ➕ 1
    pub(crate) fn parse_assignment(&mut self) -> Result<Assignment, ParserError> {
        if self.at().kind == TokenKind::Declare {
            self.eat()?;
        }

        let identifier = self.eat()?;
        if identifier.kind != TokenKind::Identifier {
            return Err(ParserError::ExpectedVarName(identifier.value));
        }

        self.expect_token(TokenKind::Assign)
            .map_err(|_| ParserError::ExpectedAssign(identifier.value.clone()))?;

        Ok(Assignment {
            target: identifier.value,
            value: self.parse_expression()?,
        })
    }

    // Statements between braces, each one on its own line
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParserError> {
        if self.depth >= MAX_NESTING {
            return Err(ParserError::NestingTooDeep(MAX_NESTING));
        }

        self.expect_token(TokenKind::OpenBrace)
            .map_err(|_| ParserError::MissingOpenBrace)?;
        self.depth += 1;

        let mut statements: Vec<ASTNode> = vec![];

        loop {
            self.skip_end_lines();

            match self.at().kind {
                TokenKind::CloseBrace => {
                    self.eat()?;
                    break;
                }
                TokenKind::EOF => return Err(ParserError::MissingCloseBrace),
                _ => {
                    let line = self.at().line;

                    if let Some(stmt) = self.parse_statement()? {
                        self.check_statement_end()?;
                        statements.push(ASTNode::new(stmt, line));
                    }
                }
            }
        }

        self.depth -= 1;

        Ok(Block { statements })
    }

    // Two loop forms:
    //  🔁 (init; cond; step) { ... }
    //  🔁 cond { ... }
    fn parse_loop(&mut self) -> Result<StatementKind, ParserError> {
        // We eat the loop token
        self.eat()?;

        if !self.is_for_header() {
            let cond = self.parse_expression()?;
            let body = self.parse_block()?;

            return Ok(StatementKind::WhileLoop { cond, body });
        }

        // We eat the '('
        self.eat()?;

        let init = self.parse_assignment()?;
        self.expect_token(TokenKind::Semicolon).map_err(|_| {
            ParserError::MalformedForHeader("expected ';' after the initialisation".into())
        })?;

        let cond = self.parse_expression()?;
        self.expect_token(TokenKind::Semicolon).map_err(|_| {
            ParserError::MalformedForHeader("expected ';' after the condition".into())
        })?;

        let step = self.parse_assignment()?;
        self.expect_token(TokenKind::CloseParen).map_err(|_| {
            ParserError::MalformedForHeader("expected ')' after the step".into())
        })?;

        let body = self.parse_block()?;

        Ok(StatementKind::ForLoop {
            init,
            cond,
            step,
            body,
        })
    }

    // A for header opens with an assignment, a parenthesized while condition
    // can't since assignments aren't expressions
    fn is_for_header(&self) -> bool {
        if self.at().kind != TokenKind::OpenParen {
            return false;
        }

        match self.peek_kind(1) {
            Some(TokenKind::Declare) => true,
            Some(TokenKind::Identifier) => self.peek_kind(2) == Some(&TokenKind::Assign),
            _ => false,
        }
    }
}
