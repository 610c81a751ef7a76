use tracing::debug;

use super::{Interpreter, InterpreterError, MAX_EVAL_DEPTH};
use crate::environment::Env;
use crate::frontend::ast::{ASTNode, Assignment, Block, Expression, StatementKind};
use tools::errors::{CodeErr, ReportCodeErr};

impl Interpreter {
    // Errors are reported at the line of the innermost statement that failed.
    // Headers of loops (init, condition, step) report the loop line.
    pub(super) fn execute_node(
        &mut self,
        node: &ASTNode,
        env: &mut Env,
    ) -> Result<(), CodeErr<InterpreterError>> {
        debug!(line = node.line + 1, "executing statement");

        match &node.node {
            StatementKind::Block(block) => self.execute_block(block, env, node.line),
            StatementKind::ForLoop {
                init,
                cond,
                step,
                body,
            } => self.execute_for(init, cond, step, body, env, node.line),
            StatementKind::WhileLoop { cond, body } => {
                self.execute_while(cond, body, env, node.line)
            }
            StatementKind::Assignment(assign) => self
                .execute_assignment(assign, env)
                .map_err(|e| e.to_glob_err(node.line)),
            StatementKind::Print { value } => self
                .execute_print(value, env)
                .map_err(|e| e.to_glob_err(node.line)),
            StatementKind::Expression(expr) => self
                .evaluate(expr, env)
                .map(|_| ())
                .map_err(|e| e.to_glob_err(node.line)),
        }
    }

    // No scope of its own: assignments inside are visible after the block.
    // Nesting shares the depth bound of parenthesis, reported at the line of
    // the block or loop that goes too deep.
    fn execute_block(
        &mut self,
        block: &Block,
        env: &mut Env,
        line: u64,
    ) -> Result<(), CodeErr<InterpreterError>> {
        if self.depth >= MAX_EVAL_DEPTH {
            return Err(InterpreterError::NestingTooDeep(MAX_EVAL_DEPTH).to_glob_err(line));
        }

        self.depth += 1;
        let res = block.statements.iter().try_for_each(|n| self.execute_node(n, env));
        self.depth -= 1;

        res
    }

    fn execute_assignment(&mut self, assign: &Assignment, env: &mut Env) -> Result<(), InterpreterError> {
        let value = self.evaluate(&assign.value, env)?;

        debug!(name = %assign.target, %value, "assign");
        env.assign_var(assign.target.clone(), value);

        Ok(())
    }

    fn execute_print(&mut self, value: &Expression, env: &Env) -> Result<(), InterpreterError> {
        let value = self.evaluate(value, env)?;

        self.output
            .println(&value.to_string())
            .map_err(|e| InterpreterError::Output(e.to_string()))
    }

    fn execute_for(
        &mut self,
        init: &Assignment,
        cond: &Expression,
        step: &Assignment,
        body: &Block,
        env: &mut Env,
        line: u64,
    ) -> Result<(), CodeErr<InterpreterError>> {
        self.execute_assignment(init, env)
            .map_err(|e| e.to_glob_err(line))?;

        let mut iterations: u64 = 0;

        while self.check_condition(cond, env).map_err(|e| e.to_glob_err(line))? {
            self.execute_block(body, env, line)?;
            self.execute_assignment(step, env)
                .map_err(|e| e.to_glob_err(line))?;

            iterations += 1;
        }

        debug!(line = line + 1, iterations, "for loop done");
        Ok(())
    }

    fn execute_while(
        &mut self,
        cond: &Expression,
        body: &Block,
        env: &mut Env,
        line: u64,
    ) -> Result<(), CodeErr<InterpreterError>> {
        let mut iterations: u64 = 0;

        while self.check_condition(cond, env).map_err(|e| e.to_glob_err(line))? {
            self.execute_block(body, env, line)?;
            iterations += 1;
        }

        debug!(line = line + 1, iterations, "while loop done");
        Ok(())
    }

    fn check_condition(&mut self, cond: &Expression, env: &Env) -> Result<bool, InterpreterError> {
        Ok(self.evaluate(cond, env)?.to_condition()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::EnvError;
    use crate::frontend::ast::{AddSubExpr, MulDivExpr, Primary, RelExpr};
    use crate::frontend::lexer::{ADD, DIV, LESS, LOOP, SUB};
    use crate::output::PrintHandler;
    use crate::values::{RuntimeVal, ValueError};
    use pretty_assertions::assert_eq;

    fn run(nodes: &[ASTNode], env: &mut Env) -> (Result<(), CodeErr<InterpreterError>>, Vec<String>) {
        let mut interp = Interpreter::with_output(PrintHandler::buffer());
        let res = interp.execute_program(nodes, env);
        let lines = interp.output().lines().into_iter().map(String::from).collect();

        (res, lines)
    }

    fn assign(target: &str, value: impl Into<Expression>) -> Assignment {
        Assignment {
            target: target.into(),
            value: value.into(),
        }
    }

    fn node(kind: StatementKind, line: u64) -> ASTNode {
        ASTNode::new(kind, line)
    }

    fn print(value: impl Into<Expression>, line: u64) -> ASTNode {
        node(StatementKind::Print { value: value.into() }, line)
    }

    fn arith(lhs: Primary, operator: &str, rhs: Primary) -> Expression {
        match operator {
            ADD | SUB => AddSubExpr {
                left: lhs.into(),
                rest: vec![(operator.into(), rhs.into())],
            }
            .into(),
            _ => MulDivExpr {
                left: lhs,
                rest: vec![(operator.into(), rhs)],
            }
            .into(),
        }
    }

    fn less(lhs: Primary, rhs: Primary) -> Expression {
        RelExpr {
            left: MulDivExpr::from(lhs).into(),
            op: Some((LESS.into(), MulDivExpr::from(rhs).into())),
        }
        .into()
    }

    #[test]
    fn assign_then_print() {
        let mut env = Env::new();
        let nodes = vec![
            node(StatementKind::Assignment(assign("x", Primary::int(123))), 0),
            print(Primary::var("x"), 1),
            node(StatementKind::Assignment(assign("y", Primary::string("Hello World"))), 2),
            print(Primary::var("y"), 3),
        ];

        let (res, lines) = run(&nodes, &mut env);

        assert!(res.is_ok());
        assert_eq!(lines, vec!["123", "Hello World"]);
        assert_eq!(env.lookup_var("x"), Ok(&RuntimeVal::Int(123)));
    }

    #[test]
    fn reassignment_changes_type() {
        let mut env = Env::new();
        let nodes = vec![
            node(StatementKind::Assignment(assign("x", Primary::int(1))), 0),
            node(StatementKind::Assignment(assign("x", Primary::string("one"))), 1),
            print(Primary::var("x"), 2),
        ];

        let (res, lines) = run(&nodes, &mut env);

        assert!(res.is_ok());
        assert_eq!(lines, vec!["one"]);
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn print_booleans() {
        let mut env = Env::new();
        let nodes = vec![
            print(Primary::BoolLiteral { value: true }, 0),
            print(less(Primary::int(2), Primary::int(1)), 1),
        ];

        let (_, lines) = run(&nodes, &mut env);
        assert_eq!(lines, vec!["true", "false"]);
    }

    #[test]
    fn for_loop_counts() {
        let mut env = Env::new();
        let nodes = vec![node(
            StatementKind::ForLoop {
                init: assign("i", Primary::int(0)),
                cond: less(Primary::var("i"), Primary::int(3)),
                step: assign("i", arith(Primary::var("i"), ADD, Primary::int(1))),
                body: Block {
                    statements: vec![print(Primary::var("i"), 1)],
                },
            },
            0,
        )];

        let (res, lines) = run(&nodes, &mut env);

        assert!(res.is_ok());
        assert_eq!(lines, vec!["0", "1", "2"]);
        // The loop variable stays in the environment
        assert_eq!(env.lookup_var("i"), Ok(&RuntimeVal::Int(3)));
    }

    #[test]
    fn for_loop_with_false_condition_runs_init_only() {
        let mut env = Env::new();
        let nodes = vec![node(
            StatementKind::ForLoop {
                init: assign("i", Primary::int(5)),
                cond: less(Primary::var("i"), Primary::int(3)),
                step: assign("i", arith(Primary::var("i"), ADD, Primary::int(1))),
                body: Block {
                    statements: vec![print(Primary::var("i"), 1)],
                },
            },
            0,
        )];

        let (res, lines) = run(&nodes, &mut env);

        assert!(res.is_ok());
        assert!(lines.is_empty());
        assert_eq!(env.lookup_var("i"), Ok(&RuntimeVal::Int(5)));
    }

    #[test]
    fn while_loop_counts_down() {
        let mut env = Env::new();
        env.assign_var("n".into(), RuntimeVal::Int(3));

        let nodes = vec![node(
            StatementKind::WhileLoop {
                cond: Primary::var("n").into(),
                body: Block {
                    statements: vec![
                        print(Primary::var("n"), 1),
                        node(
                            StatementKind::Assignment(assign(
                                "n",
                                arith(Primary::var("n"), SUB, Primary::int(1)),
                            )),
                            2,
                        ),
                    ],
                },
            },
            0,
        )];

        let (res, lines) = run(&nodes, &mut env);

        assert!(res.is_ok());
        assert_eq!(lines, vec!["3", "2", "1"]);
    }

    #[test]
    fn while_loop_with_zero_condition_never_runs() {
        let mut env = Env::new();
        let nodes = vec![node(
            StatementKind::WhileLoop {
                cond: Primary::int(0).into(),
                body: Block {
                    statements: vec![print(Primary::var("undefined"), 1)],
                },
            },
            0,
        )];

        let (res, lines) = run(&nodes, &mut env);

        assert!(res.is_ok());
        assert!(lines.is_empty());
    }

    #[test]
    fn boolean_condition_is_accepted() {
        let mut env = Env::new();
        env.assign_var("go".into(), RuntimeVal::Bool(true));

        let nodes = vec![node(
            StatementKind::WhileLoop {
                cond: Primary::var("go").into(),
                body: Block {
                    statements: vec![
                        print(Primary::string("once"), 1),
                        node(
                            StatementKind::Assignment(assign("go", Primary::BoolLiteral { value: false })),
                            2,
                        ),
                    ],
                },
            },
            0,
        )];

        let (res, lines) = run(&nodes, &mut env);

        assert!(res.is_ok());
        assert_eq!(lines, vec!["once"]);
    }

    #[test]
    fn string_condition_is_refused() {
        let mut env = Env::new();
        let nodes = vec![node(
            StatementKind::WhileLoop {
                cond: Primary::string("yes").into(),
                body: Block::default(),
            },
            4,
        )];

        let (res, _) = run(&nodes, &mut env);
        let err = res.unwrap_err();

        assert_eq!(
            err,
            CodeErr::new(
                InterpreterError::InterpFromValue(ValueError::TypeMismatch(
                    LOOP.into(),
                    "str".into(),
                    "an int or a bool".into()
                )),
                4
            )
        );
    }

    #[test]
    fn block_shares_the_environment() {
        let mut env = Env::new();
        let nodes = vec![
            node(
                StatementKind::Block(Block {
                    statements: vec![node(StatementKind::Assignment(assign("inner", Primary::int(9))), 1)],
                }),
                0,
            ),
            print(Primary::var("inner"), 3),
        ];

        let (res, lines) = run(&nodes, &mut env);

        assert!(res.is_ok());
        assert_eq!(lines, vec!["9"]);
    }

    #[test]
    fn bare_expression_is_discarded() {
        let mut env = Env::new();
        let nodes = vec![node(
            StatementKind::Expression(arith(Primary::int(1), ADD, Primary::int(2))),
            0,
        )];

        let (res, lines) = run(&nodes, &mut env);

        assert!(res.is_ok());
        assert!(lines.is_empty());
        assert!(env.is_empty());
    }

    #[test]
    fn bare_expression_errors_still_surface() {
        let mut env = Env::new();
        let nodes = vec![node(
            StatementKind::Expression(arith(Primary::int(1), DIV, Primary::int(0))),
            2,
        )];

        let (res, _) = run(&nodes, &mut env);

        assert_eq!(
            res,
            Err(CodeErr::new(InterpreterError::InterpFromValue(ValueError::DivisionByZero), 2))
        );
    }

    #[test]
    fn failed_assignment_keeps_previous_value() {
        let mut env = Env::new();
        let nodes = vec![
            node(StatementKind::Assignment(assign("x", Primary::int(1))), 0),
            print(Primary::var("x"), 1),
            node(
                StatementKind::Assignment(assign("x", arith(Primary::string("a"), ADD, Primary::int(1)))),
                2,
            ),
            print(Primary::string("never"), 3),
        ];

        let (res, lines) = run(&nodes, &mut env);
        let err = res.unwrap_err();

        assert_eq!(err.line, 2);
        assert!(matches!(
            err.err,
            InterpreterError::InterpFromValue(ValueError::TypeMismatch(..))
        ));
        assert_eq!(lines, vec!["1"]);
        assert_eq!(env.lookup_var("x"), Ok(&RuntimeVal::Int(1)));
    }

    #[test]
    fn error_inside_loop_reports_body_line() {
        let mut env = Env::new();
        let nodes = vec![node(
            StatementKind::ForLoop {
                init: assign("i", Primary::int(0)),
                cond: less(Primary::var("i"), Primary::int(3)),
                step: assign("i", arith(Primary::var("i"), ADD, Primary::int(1))),
                body: Block {
                    statements: vec![
                        print(Primary::var("i"), 1),
                        print(arith(Primary::int(1), DIV, Primary::var("i")), 2),
                    ],
                },
            },
            0,
        )];

        let (res, lines) = run(&nodes, &mut env);

        // Fails on the first iteration, after the first print
        assert_eq!(
            res,
            Err(CodeErr::new(InterpreterError::InterpFromValue(ValueError::DivisionByZero), 2))
        );
        assert_eq!(lines, vec!["0"]);
    }

    fn nested_blocks(depth: usize, inner: ASTNode) -> Vec<ASTNode> {
        let mut nodes = vec![inner];
        for line in (0..depth as u64).rev() {
            nodes = vec![node(StatementKind::Block(Block { statements: nodes }), line)];
        }

        nodes
    }

    #[test]
    fn blocks_at_the_bound_run() {
        let mut env = Env::new();
        let nodes = nested_blocks(MAX_EVAL_DEPTH, print(Primary::int(1), MAX_EVAL_DEPTH as u64));

        let (res, lines) = run(&nodes, &mut env);

        assert!(res.is_ok());
        assert_eq!(lines, vec!["1"]);
    }

    #[test]
    fn deep_blocks_are_refused() {
        let mut env = Env::new();
        let nodes = nested_blocks(MAX_EVAL_DEPTH + 1, print(Primary::int(1), 0));

        let (res, lines) = run(&nodes, &mut env);

        // The innermost block is the one past the bound
        assert_eq!(
            res,
            Err(CodeErr::new(
                InterpreterError::NestingTooDeep(MAX_EVAL_DEPTH),
                MAX_EVAL_DEPTH as u64
            ))
        );
        assert!(lines.is_empty());
    }

    #[test]
    fn parenthesis_inside_blocks_share_the_bound() {
        let mut env = Env::new();
        let inner = print(Primary::Parenthesized(Box::new(Primary::int(1).into())), 99);
        let nodes = nested_blocks(MAX_EVAL_DEPTH, inner);

        let (res, _) = run(&nodes, &mut env);

        assert_eq!(
            res,
            Err(CodeErr::new(InterpreterError::NestingTooDeep(MAX_EVAL_DEPTH), 99))
        );
    }

    #[test]
    fn loop_bodies_release_their_depth() {
        let mut env = Env::new();
        // Each iteration enters and leaves the body, the depth must not grow
        let nodes = vec![node(
            StatementKind::ForLoop {
                init: assign("i", Primary::int(0)),
                cond: less(Primary::var("i"), Primary::int(MAX_EVAL_DEPTH as i64 * 2)),
                step: assign("i", arith(Primary::var("i"), ADD, Primary::int(1))),
                body: Block {
                    statements: nested_blocks(MAX_EVAL_DEPTH - 1, print(Primary::var("i"), 1)),
                },
            },
            0,
        )];

        let (res, lines) = run(&nodes, &mut env);

        assert!(res.is_ok());
        assert_eq!(lines.len(), MAX_EVAL_DEPTH * 2);
    }

    #[test]
    fn error_in_loop_header_reports_loop_line() {
        let mut env = Env::new();
        let nodes = vec![node(
            StatementKind::ForLoop {
                init: assign("i", Primary::var("start")),
                cond: less(Primary::var("i"), Primary::int(3)),
                step: assign("i", arith(Primary::var("i"), ADD, Primary::int(1))),
                body: Block::default(),
            },
            7,
        )];

        let (res, _) = run(&nodes, &mut env);

        assert_eq!(
            res,
            Err(CodeErr::new(
                InterpreterError::InterpFromEnv(EnvError::UndefinedVariable("start".into())),
                7
            ))
        );
    }
}
