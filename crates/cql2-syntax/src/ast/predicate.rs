use crate::ast::{expr::Expr, span::Span};
use cql2_model::ComparisonOp;

#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub kind: PredicateKind,
    pub span: Span,
}

impl Predicate {
    pub fn new(kind: PredicateKind, span: Span) -> Self {
        Predicate { kind, span }
    }
}

/// Boolean syntax nodes. `NOT` forms of BETWEEN, LIKE, IS NULL and IN are
/// flags on the node, the builder turns them into negations.
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateKind {
    Or(Vec<Predicate>),
    And(Vec<Predicate>),
    Not(Box<Predicate>),
    Comparison {
        left: Expr,
        op: ComparisonOp,
        right: Expr,
    },
    Between {
        value: Expr,
        low: Expr,
        high: Expr,
        negated: bool,
    },
    Like {
        value: Expr,
        pattern: String,
        match_case: bool,
        negated: bool,
    },
    IsNull {
        value: Expr,
        negated: bool,
    },
    In {
        value: Expr,
        choices: Vec<Expr>,
        negated: bool,
    },
    /// Predicate function call such as `S_INTERSECTS(a, b)`.
    Function {
        name: String,
        args: Vec<Expr>,
    },
}
