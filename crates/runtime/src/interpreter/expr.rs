use tracing::trace;

use super::{Interpreter, InterpreterError, MAX_EVAL_DEPTH};
use crate::environment::Env;
use crate::frontend::ast::{AddSubExpr, AndExpr, Expression, MulDivExpr, OrExpr, Primary, RelExpr};
use crate::frontend::lexer::{AND, OR};
use crate::values::{ArithOp, CompareOp, RuntimeVal};

// Each level folds its operators from left to right, the running value
// being the left operand of the next one. Both operands of the logical
// operators are always evaluated.
impl Interpreter {
    pub(super) fn evaluate(&mut self, expr: &Expression, env: &Env) -> Result<RuntimeVal, InterpreterError> {
        self.evaluate_or(expr, env)
    }

    fn evaluate_or(&mut self, expr: &OrExpr, env: &Env) -> Result<RuntimeVal, InterpreterError> {
        let mut value = self.evaluate_and(&expr.left, env)?;

        for (operator, right) in &expr.rest {
            let rhs = self.evaluate_and(right, env)?;

            if operator != OR {
                return Err(malformed("logical or", operator));
            }

            trace!(lhs = %value, rhs = %rhs, "or");
            value = RuntimeVal::Bool(value.to_bool() || rhs.to_bool());
        }

        Ok(value)
    }

    fn evaluate_and(&mut self, expr: &AndExpr, env: &Env) -> Result<RuntimeVal, InterpreterError> {
        let mut value = self.evaluate_rel(&expr.left, env)?;

        for (operator, right) in &expr.rest {
            let rhs = self.evaluate_rel(right, env)?;

            if operator != AND {
                return Err(malformed("logical and", operator));
            }

            trace!(lhs = %value, rhs = %rhs, "and");
            value = RuntimeVal::Bool(value.to_bool() && rhs.to_bool());
        }

        Ok(value)
    }

    // Without operator the value passes through, whatever its type
    fn evaluate_rel(&mut self, expr: &RelExpr, env: &Env) -> Result<RuntimeVal, InterpreterError> {
        let value = self.evaluate_add_sub(&expr.left, env)?;

        match &expr.op {
            None => Ok(value),
            Some((operator, right)) => {
                let rhs = self.evaluate_add_sub(right, env)?;
                let op = CompareOp::from_token(operator).ok_or_else(|| malformed("relational", operator))?;

                trace!(lhs = %value, rhs = %rhs, ?op, "compare");
                Ok(value.compare(&rhs, op)?)
            }
        }
    }

    fn evaluate_add_sub(&mut self, expr: &AddSubExpr, env: &Env) -> Result<RuntimeVal, InterpreterError> {
        let mut value = self.evaluate_mul_div(&expr.left, env)?;

        for (operator, right) in &expr.rest {
            let rhs = self.evaluate_mul_div(right, env)?;
            let op = ArithOp::additive(operator).ok_or_else(|| malformed("additive", operator))?;

            trace!(lhs = %value, rhs = %rhs, ?op, "calculate");
            value = value.calculate(&rhs, op)?;
        }

        Ok(value)
    }

    fn evaluate_mul_div(&mut self, expr: &MulDivExpr, env: &Env) -> Result<RuntimeVal, InterpreterError> {
        let mut value = self.evaluate_primary(&expr.left, env)?;

        for (operator, right) in &expr.rest {
            let rhs = self.evaluate_primary(right, env)?;
            let op = ArithOp::multiplicative(operator)
                .ok_or_else(|| malformed("multiplicative", operator))?;

            trace!(lhs = %value, rhs = %rhs, ?op, "calculate");
            value = value.calculate(&rhs, op)?;
        }

        Ok(value)
    }

    fn evaluate_primary(&mut self, primary: &Primary, env: &Env) -> Result<RuntimeVal, InterpreterError> {
        match primary {
            Primary::IntLiteral { value } => Ok(RuntimeVal::Int(*value)),
            Primary::StringLiteral { value } => match strip_quotes(value) {
                Some(content) => Ok(RuntimeVal::Str(content.to_string())),
                None => Err(InterpreterError::MalformedProgram(format!(
                    "string literal without delimiting quotes: {value}"
                ))),
            },
            Primary::VarRef { name } => Ok(env.lookup_var(name)?.clone()),
            Primary::BoolLiteral { value } => Ok(RuntimeVal::Bool(*value)),
            Primary::Parenthesized(inner) => {
                if self.depth >= MAX_EVAL_DEPTH {
                    return Err(InterpreterError::NestingTooDeep(MAX_EVAL_DEPTH));
                }

                self.depth += 1;
                let res = self.evaluate_or(inner, env);
                self.depth -= 1;

                res
            }
        }
    }
}

fn malformed(level: &str, operator: &str) -> InterpreterError {
    InterpreterError::MalformedProgram(format!("unknown {level} operator -{operator}-"))
}

// Removes exactly one matching quote on each side: "" gives an empty string
fn strip_quotes(raw: &str) -> Option<&str> {
    let mut chars = raw.chars();
    let first = chars.next()?;
    let last = chars.next_back()?;

    (matches!(first, '"' | '\'') && first == last).then(|| chars.as_str())
}
