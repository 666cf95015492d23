//! Untyped syntax tree produced by the parser.

pub mod expr;
pub mod literal;
pub mod predicate;
pub mod property;
pub mod span;

pub use expr::{Expr, ExprKind};
pub use literal::Literal;
pub use predicate::{Predicate, PredicateKind};
pub use property::PropertyPath;
pub use span::Span;
