use std::fmt::Display;

mod value_errors;

pub use value_errors::ValueError;
use frontend::lexer::{
    ADD, DIV, EQUAL, GREATER, GREATER_EQUAL, LESS, LESS_EQUAL, LOOP, MUL, NOT_EQUAL, SUB,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeVal {
    Int(i64),
    Str(String),
    Bool(bool),
}

// Textual form used by print
impl Display for RuntimeVal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeVal::Int(nb) => write!(f, "{}", nb),
            RuntimeVal::Str(s) => write!(f, "{}", s),
            RuntimeVal::Bool(b) => write!(f, "{}", b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    // Operators of the additive level only
    pub fn additive(token: &str) -> Option<Self> {
        match token {
            ADD => Some(ArithOp::Add),
            SUB => Some(ArithOp::Sub),
            _ => None,
        }
    }

    // Operators of the multiplicative level only
    pub fn multiplicative(token: &str) -> Option<Self> {
        match token {
            MUL => Some(ArithOp::Mul),
            DIV => Some(ArithOp::Div),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            ArithOp::Add => ADD,
            ArithOp::Sub => SUB,
            ArithOp::Mul => MUL,
            ArithOp::Div => DIV,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompareOp {
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

impl CompareOp {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            EQUAL => Some(CompareOp::Equal),
            NOT_EQUAL => Some(CompareOp::NotEqual),
            LESS => Some(CompareOp::Less),
            GREATER => Some(CompareOp::Greater),
            LESS_EQUAL => Some(CompareOp::LessEqual),
            GREATER_EQUAL => Some(CompareOp::GreaterEqual),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            CompareOp::Equal => EQUAL,
            CompareOp::NotEqual => NOT_EQUAL,
            CompareOp::Less => LESS,
            CompareOp::Greater => GREATER,
            CompareOp::LessEqual => LESS_EQUAL,
            CompareOp::GreaterEqual => GREATER_EQUAL,
        }
    }
}

impl RuntimeVal {
    pub fn type_name(&self) -> &'static str {
        match self {
            RuntimeVal::Int(_) => "int",
            RuntimeVal::Str(_) => "str",
            RuntimeVal::Bool(_) => "bool",
        }
    }

    // Truthiness used by the logical operators. A new kind of value must
    // get its own arm here.
    pub fn to_bool(&self) -> bool {
        match self {
            RuntimeVal::Bool(b) => *b,
            RuntimeVal::Int(nb) => *nb != 0,
            RuntimeVal::Str(s) => !s.is_empty(),
        }
    }

    // Loop conditions are numbers: zero stops the loop. Booleans are
    // accepted as 1 and 0, strings are refused.
    pub fn to_condition(&self) -> Result<bool, ValueError> {
        match self {
            RuntimeVal::Int(nb) => Ok(*nb != 0),
            RuntimeVal::Bool(b) => Ok(*b),
            RuntimeVal::Str(_) => Err(ValueError::TypeMismatch(
                LOOP.into(),
                self.type_name().into(),
                "an int or a bool".into(),
            )),
        }
    }

    // Both operands must be ints, no implicit conversion
    fn int_operands(&self, rhs: &RuntimeVal, operator: &str) -> Result<(i64, i64), ValueError> {
        match (self, rhs) {
            (RuntimeVal::Int(lhs), RuntimeVal::Int(rhs)) => Ok((*lhs, *rhs)),
            _ => Err(ValueError::TypeMismatch(
                operator.to_string(),
                format!("{} and {}", self.type_name(), rhs.type_name()),
                "two ints".into(),
            )),
        }
    }

    pub fn calculate(&self, rhs: &RuntimeVal, operator: ArithOp) -> Result<RuntimeVal, ValueError> {
        let (lhs, rhs) = self.int_operands(rhs, operator.token())?;

        let res = match operator {
            ArithOp::Add => lhs.checked_add(rhs),
            ArithOp::Sub => lhs.checked_sub(rhs),
            ArithOp::Mul => lhs.checked_mul(rhs),
            ArithOp::Div => return floor_div(lhs, rhs).map(RuntimeVal::Int),
        };

        res.map(RuntimeVal::Int)
            .ok_or_else(|| ValueError::IntegerOverflow(operator.token().into(), lhs, rhs))
    }

    pub fn compare(&self, rhs: &RuntimeVal, operator: CompareOp) -> Result<RuntimeVal, ValueError> {
        let (lhs, rhs) = self.int_operands(rhs, operator.token())?;

        let res = match operator {
            CompareOp::Equal => lhs == rhs,
            CompareOp::NotEqual => lhs != rhs,
            CompareOp::Less => lhs < rhs,
            CompareOp::Greater => lhs > rhs,
            CompareOp::LessEqual => lhs <= rhs,
            CompareOp::GreaterEqual => lhs >= rhs,
        };

        Ok(RuntimeVal::Bool(res))
    }
}

// Division rounding toward negative infinity: -7 ➗ 2 is -4
pub fn floor_div(lhs: i64, rhs: i64) -> Result<i64, ValueError> {
    if rhs == 0 {
        return Err(ValueError::DivisionByZero);
    }

    // Only i64::MIN / -1 overflows
    let quotient = lhs
        .checked_div(rhs)
        .ok_or_else(|| ValueError::IntegerOverflow(DIV.into(), lhs, rhs))?;

    if lhs % rhs != 0 && ((lhs < 0) != (rhs < 0)) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn display_values() {
        assert_eq!(RuntimeVal::Int(-123).to_string(), "-123");
        assert_eq!(RuntimeVal::Str("Hello World".into()).to_string(), "Hello World");
        assert_eq!(RuntimeVal::Str(String::new()).to_string(), "");
        assert_eq!(RuntimeVal::Bool(true).to_string(), "true");
        assert_eq!(RuntimeVal::Bool(false).to_string(), "false");
    }

    #[test]
    fn coercion_to_bool() {
        assert!(RuntimeVal::Bool(true).to_bool());
        assert!(!RuntimeVal::Bool(false).to_bool());
        assert!(RuntimeVal::Int(-1).to_bool());
        assert!(!RuntimeVal::Int(0).to_bool());
        assert!(RuntimeVal::Str("a".into()).to_bool());
        assert!(!RuntimeVal::Str(String::new()).to_bool());
    }

    #[test]
    fn loop_condition() {
        assert_eq!(RuntimeVal::Int(3).to_condition(), Ok(true));
        assert_eq!(RuntimeVal::Int(0).to_condition(), Ok(false));
        assert_eq!(RuntimeVal::Bool(true).to_condition(), Ok(true));
        assert_eq!(RuntimeVal::Bool(false).to_condition(), Ok(false));
        assert_eq!(
            RuntimeVal::Str("go".into()).to_condition(),
            Err(ValueError::TypeMismatch(LOOP.into(), "str".into(), "an int or a bool".into()))
        );
    }

    #[test]
    fn bool_is_not_an_int() {
        assert_ne!(RuntimeVal::Bool(true), RuntimeVal::Int(1));
        assert_ne!(RuntimeVal::Bool(false), RuntimeVal::Int(0));
        assert!(matches!(
            RuntimeVal::Bool(true).calculate(&RuntimeVal::Int(1), ArithOp::Add),
            Err(ValueError::TypeMismatch(..))
        ));
        assert!(matches!(
            RuntimeVal::Int(1).compare(&RuntimeVal::Bool(true), CompareOp::Equal),
            Err(ValueError::TypeMismatch(..))
        ));
    }

    #[test]
    fn calculate_on_ints() {
        let a = RuntimeVal::Int(7);
        let b = RuntimeVal::Int(2);

        assert_eq!(a.calculate(&b, ArithOp::Add), Ok(RuntimeVal::Int(9)));
        assert_eq!(a.calculate(&b, ArithOp::Sub), Ok(RuntimeVal::Int(5)));
        assert_eq!(a.calculate(&b, ArithOp::Mul), Ok(RuntimeVal::Int(14)));
        assert_eq!(a.calculate(&b, ArithOp::Div), Ok(RuntimeVal::Int(3)));
    }

    #[test]
    fn mixed_types_mismatch() {
        assert_eq!(
            RuntimeVal::Str("a".into()).calculate(&RuntimeVal::Int(1), ArithOp::Add),
            Err(ValueError::TypeMismatch(ADD.into(), "str and int".into(), "two ints".into()))
        );
    }

    #[test]
    fn floor_division_signs() {
        assert_eq!(floor_div(7, 2), Ok(3));
        assert_eq!(floor_div(-7, 2), Ok(-4));
        assert_eq!(floor_div(7, -2), Ok(-4));
        assert_eq!(floor_div(-7, -2), Ok(3));
        assert_eq!(floor_div(-8, 2), Ok(-4));
        assert_eq!(floor_div(0, -3), Ok(0));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(floor_div(5, 0), Err(ValueError::DivisionByZero));
        assert_eq!(
            RuntimeVal::Int(0).calculate(&RuntimeVal::Int(0), ArithOp::Div),
            Err(ValueError::DivisionByZero)
        );
    }

    #[test]
    fn overflow_is_reported() {
        assert!(matches!(
            RuntimeVal::Int(i64::MAX).calculate(&RuntimeVal::Int(1), ArithOp::Add),
            Err(ValueError::IntegerOverflow(..))
        ));
        assert!(matches!(
            RuntimeVal::Int(i64::MIN).calculate(&RuntimeVal::Int(1), ArithOp::Sub),
            Err(ValueError::IntegerOverflow(..))
        ));
        assert!(matches!(
            RuntimeVal::Int(i64::MAX).calculate(&RuntimeVal::Int(2), ArithOp::Mul),
            Err(ValueError::IntegerOverflow(..))
        ));
        assert!(matches!(floor_div(i64::MIN, -1), Err(ValueError::IntegerOverflow(..))));
    }

    #[test]
    fn operator_tokens_per_level() {
        assert_eq!(ArithOp::additive(ADD), Some(ArithOp::Add));
        assert_eq!(ArithOp::additive(MUL), None);
        assert_eq!(ArithOp::multiplicative(DIV), Some(ArithOp::Div));
        assert_eq!(ArithOp::multiplicative(SUB), None);
        assert_eq!(CompareOp::from_token(LESS_EQUAL), Some(CompareOp::LessEqual));
        assert_eq!(CompareOp::from_token("<"), None);
    }

    proptest! {
        #[test]
        fn floor_div_matches_euclid_definition(a in -1_000_000i64..1_000_000, b in -1_000i64..1_000) {
            prop_assume!(b != 0);

            let q = floor_div(a, b).unwrap();
            let r = a - q * b;

            // The remainder has the sign of the divisor
            prop_assert!(r == 0 || (r > 0) == (b > 0));
            prop_assert!(r.abs() < b.abs());
            prop_assert_eq!(q as f64, (a as f64 / b as f64).floor());
        }

        #[test]
        fn division_by_zero_always_fails(a in any::<i64>()) {
            prop_assert_eq!(
                RuntimeVal::Int(a).calculate(&RuntimeVal::Int(0), ArithOp::Div),
                Err(ValueError::DivisionByZero)
            );
        }

        #[test]
        fn comparisons_follow_native_order(a in any::<i64>(), b in any::<i64>()) {
            let (x, y) = (RuntimeVal::Int(a), RuntimeVal::Int(b));

            prop_assert_eq!(x.compare(&y, CompareOp::Equal), Ok(RuntimeVal::Bool(a == b)));
            prop_assert_eq!(x.compare(&y, CompareOp::NotEqual), Ok(RuntimeVal::Bool(a != b)));
            prop_assert_eq!(x.compare(&y, CompareOp::Less), Ok(RuntimeVal::Bool(a < b)));
            prop_assert_eq!(x.compare(&y, CompareOp::Greater), Ok(RuntimeVal::Bool(a > b)));
            prop_assert_eq!(x.compare(&y, CompareOp::LessEqual), Ok(RuntimeVal::Bool(a <= b)));
            prop_assert_eq!(x.compare(&y, CompareOp::GreaterEqual), Ok(RuntimeVal::Bool(a >= b)));
        }
    }
}
