use super::errors_parser::ParserError;
use super::{Parser, MAX_NESTING};

use super::TokenKind;
use crate::ast::{AddSubExpr, AndExpr, Expression, MulDivExpr, OrExpr, Primary, RelExpr};

impl Parser {
    pub(crate) fn parse_expression(&mut self) -> Result<Expression, ParserError> {
        self.parse_or_expr()
    }

    fn parse_or_expr(&mut self) -> Result<OrExpr, ParserError> {
        let left = self.parse_and_expr()?;
        let mut rest = vec![];

        while self.at().kind == TokenKind::OrOperator {
            let operator = self.eat()?.value;
            rest.push((operator, self.parse_and_expr()?));
        }

        Ok(OrExpr { left, rest })
    }

    fn parse_and_expr(&mut self) -> Result<AndExpr, ParserError> {
        let left = self.parse_rel_expr()?;
        let mut rest = vec![];

        while self.at().kind == TokenKind::AndOperator {
            let operator = self.eat()?.value;
            rest.push((operator, self.parse_rel_expr()?));
        }

        Ok(AndExpr { left, rest })
    }

    // Only one comparison per level: 1 👈 2 👈 3 must be written with parenthesis
    fn parse_rel_expr(&mut self) -> Result<RelExpr, ParserError> {
        let left = self.parse_add_sub_expr()?;

        if self.at().kind != TokenKind::RelOperator {
            return Ok(RelExpr::from(left));
        }

        let operator = self.eat()?.value;
        let right = self.parse_add_sub_expr()?;

        if self.at().kind == TokenKind::RelOperator {
            return Err(ParserError::ChainedRelational(self.at().value.clone()));
        }

        Ok(RelExpr {
            left,
            op: Some((operator, right)),
        })
    }

    fn parse_add_sub_expr(&mut self) -> Result<AddSubExpr, ParserError> {
        let left = self.parse_mul_div_expr()?;
        let mut rest = vec![];

        while self.at().kind == TokenKind::AddOperator {
            let operator = self.eat()?.value;
            rest.push((operator, self.parse_mul_div_expr()?));
        }

        Ok(AddSubExpr { left, rest })
    }

    fn parse_mul_div_expr(&mut self) -> Result<MulDivExpr, ParserError> {
        let left = self.parse_primary_expr()?;
        let mut rest = vec![];

        while self.at().kind == TokenKind::MulOperator {
            let operator = self.eat()?.value;
            rest.push((operator, self.parse_primary_expr()?));
        }

        Ok(MulDivExpr { left, rest })
    }

    fn parse_primary_expr(&mut self) -> Result<Primary, ParserError> {
        match self.at().kind {
            TokenKind::Number => {
                let number = self.eat()?;

                match number.value.parse::<i64>() {
                    Ok(value) => Ok(Primary::IntLiteral { value }),
                    Err(_) => Err(ParserError::InvalidNumber(number.value)),
                }
            }
            TokenKind::String => Ok(Primary::StringLiteral {
                value: self.eat()?.value,
            }),
            TokenKind::Identifier => Ok(Primary::VarRef {
                name: self.eat()?.value,
            }),
            TokenKind::True => {
                self.eat()?;
                Ok(Primary::BoolLiteral { value: true })
            }
            TokenKind::False => {
                self.eat()?;
                Ok(Primary::BoolLiteral { value: false })
            }
            // Manages the beginning of paranthesis: 5 ✖️ (...
            TokenKind::OpenParen => {
                if self.depth >= MAX_NESTING {
                    return Err(ParserError::NestingTooDeep(MAX_NESTING));
                }

                self.eat()?;
                self.depth += 1;

                let expr = self.parse_or_expr()?;
                self.expect_token(TokenKind::CloseParen)
                    .map_err(|_| ParserError::MissingCloseParen)?;

                self.depth -= 1;

                Ok(Primary::Parenthesized(Box::new(expr)))
            }
            _ => Err(ParserError::UnexpectedToken(self.at().clone())),
        }
    }
}
