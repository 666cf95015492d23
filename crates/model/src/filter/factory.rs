use crate::{
    core::value::{Interval, TypedValue},
    filter::{
        expression::{ArithmeticOp, Expression},
        predicate::{ComparisonOp, Filter, SpatialOp, TemporalOp},
    },
};

/// Capability used by the semantic builder to construct filter trees.
///
/// One constructor per node variant. The builder never inspects the
/// produced values, so evaluation engines can plug in their own node types.
pub trait FilterFactory {
    type Expr: Clone;
    type Filter;

    fn literal(&self, value: TypedValue) -> Self::Expr;
    fn property(&self, path: &str) -> Self::Expr;
    fn function(&self, name: &str, args: Vec<Self::Expr>) -> Self::Expr;
    fn arithmetic(&self, op: ArithmeticOp, left: Self::Expr, right: Self::Expr) -> Self::Expr;
    fn interval(&self, start: Self::Expr, end: Self::Expr) -> Self::Expr;

    fn compare(&self, op: ComparisonOp, left: Self::Expr, right: Self::Expr) -> Self::Filter;
    fn between(&self, value: Self::Expr, low: Self::Expr, high: Self::Expr) -> Self::Filter;
    fn like(&self, value: Self::Expr, pattern: &str, match_case: bool) -> Self::Filter;
    fn is_null(&self, value: Self::Expr) -> Self::Filter;
    fn spatial(&self, op: SpatialOp, geom1: Self::Expr, geom2: Self::Expr) -> Self::Filter;
    fn temporal(&self, op: TemporalOp, instant: Self::Expr, other: Self::Expr) -> Self::Filter;
    fn and(&self, clauses: Vec<Self::Filter>) -> Self::Filter;
    fn or(&self, clauses: Vec<Self::Filter>) -> Self::Filter;
    fn not(&self, clause: Self::Filter) -> Self::Filter;
}

/// Factory producing this crate's [`Expression`] and [`Filter`] trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelFactory;

impl FilterFactory for ModelFactory {
    type Expr = Expression;
    type Filter = Filter;

    fn literal(&self, value: TypedValue) -> Expression {
        Expression::Literal(value)
    }

    fn property(&self, path: &str) -> Expression {
        Expression::property(path)
    }

    fn function(&self, name: &str, args: Vec<Expression>) -> Expression {
        Expression::function(name, args)
    }

    fn arithmetic(&self, op: ArithmeticOp, left: Expression, right: Expression) -> Expression {
        Expression::arithmetic(op, left, right)
    }

    fn interval(&self, start: Expression, end: Expression) -> Expression {
        Expression::Literal(TypedValue::Interval(Box::new(Interval::new(start, end))))
    }

    fn compare(&self, op: ComparisonOp, left: Expression, right: Expression) -> Filter {
        Filter::Comparison { op, left, right }
    }

    fn between(&self, value: Expression, low: Expression, high: Expression) -> Filter {
        Filter::Between { value, low, high }
    }

    fn like(&self, value: Expression, pattern: &str, match_case: bool) -> Filter {
        Filter::Like {
            value,
            pattern: pattern.to_string(),
            match_case,
        }
    }

    fn is_null(&self, value: Expression) -> Filter {
        Filter::IsNull { value }
    }

    fn spatial(&self, op: SpatialOp, geom1: Expression, geom2: Expression) -> Filter {
        Filter::Spatial { op, geom1, geom2 }
    }

    fn temporal(&self, op: TemporalOp, instant: Expression, other: Expression) -> Filter {
        Filter::Temporal { op, instant, other }
    }

    fn and(&self, clauses: Vec<Filter>) -> Filter {
        Filter::And(clauses)
    }

    fn or(&self, clauses: Vec<Filter>) -> Filter {
        Filter::Or(clauses)
    }

    fn not(&self, clause: Filter) -> Filter {
        Filter::Not(Box::new(clause))
    }
}
