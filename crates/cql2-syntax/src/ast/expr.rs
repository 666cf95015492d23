use crate::ast::{literal::Literal, property::PropertyPath, span::Span};
use cql2_model::{ArithmeticOp, Geometry};

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    pub fn literal(literal: Literal, span: Span) -> Self {
        Expr::new(ExprKind::Literal(literal), span)
    }

    pub fn binary(left: Expr, op: ArithmeticOp, right: Expr) -> Self {
        let span = left.span.to(right.span);
        Expr::new(
            ExprKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            span,
        )
    }

    /// Short description of the node for error messages.
    pub fn describe(&self) -> &'static str {
        match &self.kind {
            ExprKind::Literal(Literal::Integer(_) | Literal::Double(_)) => "number",
            ExprKind::Literal(Literal::String(_)) => "string",
            ExprKind::Literal(Literal::Boolean(_)) => "boolean",
            ExprKind::Literal(Literal::Date(_)) => "date",
            ExprKind::Literal(Literal::Timestamp(_)) => "timestamp",
            ExprKind::Literal(Literal::Color(_)) => "color",
            ExprKind::Property(_) => "property",
            ExprKind::FunctionCall { .. } => "function call",
            ExprKind::Binary { .. } => "arithmetic expression",
            ExprKind::Interval { .. } => "interval",
            ExprKind::OpenBound => "open bound",
            ExprKind::Geometry { .. } => "geometry",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Property(PropertyPath),
    FunctionCall {
        name: String,
        args: Vec<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: ArithmeticOp,
        right: Box<Expr>,
    },
    Interval {
        start: Box<Expr>,
        end: Box<Expr>,
    },
    /// The `'..'` bound of an interval.
    OpenBound,
    Geometry {
        geometry: Geometry,
        /// Set when the literal was written with an EWKT `SRID=n;` prefix.
        srid: Option<i64>,
    },
}
