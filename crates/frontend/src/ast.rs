// Statements carry the line they start on, expressions follow the precedence
// chain of the grammar: or -> and -> relational -> additive -> multiplicative -> primary.
// Operators are kept as their source token, the runtime gives them a meaning.

#[derive(Debug, PartialEq, Clone)]
pub struct ASTNode {
    pub node: StatementKind,
    pub line: u64,
}

impl ASTNode {
    pub fn new(node: StatementKind, line: u64) -> Self {
        Self { node, line }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum StatementKind {
    Assignment(Assignment),
    Print {
        value: Expression,
    },
    Block(Block),
    ForLoop {
        init: Assignment,
        cond: Expression,
        step: Assignment,
        body: Block,
    },
    WhileLoop {
        cond: Expression,
        body: Block,
    },
    // Evaluated and discarded
    Expression(Expression),
}

#[derive(Debug, PartialEq, Clone)]
pub struct Assignment {
    pub target: String,
    pub value: Expression,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Block {
    pub statements: Vec<ASTNode>,
}

// Top of the precedence chain
pub type Expression = OrExpr;

#[derive(Debug, PartialEq, Clone)]
pub struct OrExpr {
    pub left: AndExpr,
    pub rest: Vec<(String, AndExpr)>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct AndExpr {
    pub left: RelExpr,
    pub rest: Vec<(String, RelExpr)>,
}

// Non associative: at most one relational operator
#[derive(Debug, PartialEq, Clone)]
pub struct RelExpr {
    pub left: AddSubExpr,
    pub op: Option<(String, AddSubExpr)>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct AddSubExpr {
    pub left: MulDivExpr,
    pub rest: Vec<(String, MulDivExpr)>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct MulDivExpr {
    pub left: Primary,
    pub rest: Vec<(String, Primary)>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Primary {
    IntLiteral {
        value: i64,
    },
    // Raw token text, delimiting quotes included
    StringLiteral {
        value: String,
    },
    VarRef {
        name: String,
    },
    BoolLiteral {
        value: bool,
    },
    Parenthesized(Box<OrExpr>),
}

// Wrapping a lower level into the level above it, without any operator.
// Used by the parser for single operand levels and to build trees by hand.
impl From<Primary> for MulDivExpr {
    fn from(left: Primary) -> Self {
        MulDivExpr { left, rest: vec![] }
    }
}

impl From<MulDivExpr> for AddSubExpr {
    fn from(left: MulDivExpr) -> Self {
        AddSubExpr { left, rest: vec![] }
    }
}

impl From<AddSubExpr> for RelExpr {
    fn from(left: AddSubExpr) -> Self {
        RelExpr { left, op: None }
    }
}

impl From<RelExpr> for AndExpr {
    fn from(left: RelExpr) -> Self {
        AndExpr { left, rest: vec![] }
    }
}

impl From<AndExpr> for OrExpr {
    fn from(left: AndExpr) -> Self {
        OrExpr { left, rest: vec![] }
    }
}

impl From<RelExpr> for OrExpr {
    fn from(value: RelExpr) -> Self {
        OrExpr::from(AndExpr::from(value))
    }
}

impl From<AddSubExpr> for OrExpr {
    fn from(value: AddSubExpr) -> Self {
        OrExpr::from(RelExpr::from(value))
    }
}

impl From<MulDivExpr> for OrExpr {
    fn from(value: MulDivExpr) -> Self {
        OrExpr::from(AddSubExpr::from(value))
    }
}

impl From<Primary> for OrExpr {
    fn from(value: Primary) -> Self {
        OrExpr::from(MulDivExpr::from(value))
    }
}

impl Primary {
    pub fn int(value: i64) -> Self {
        Primary::IntLiteral { value }
    }

    pub fn var(name: &str) -> Self {
        Primary::VarRef { name: name.to_string() }
    }

    // Builds the literal as the lexer would give it, with double quotes
    pub fn string(content: &str) -> Self {
        Primary::StringLiteral { value: format!("\"{content}\"") }
    }
}
