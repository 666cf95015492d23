use crate::{
    ast::{
        expr::{Expr, ExprKind},
        literal::Literal,
        predicate::{Predicate, PredicateKind},
        span::Span,
    },
    errors::SemanticError,
    parser::is_predicate_function,
    semantic::functions::{FunctionKind, FunctionRegistry, FunctionSignature},
};
use cql2_model::{ComparisonOp, FilterFactory, OPEN_INTERVAL_MARKER, TypedValue};
use tracing::{trace, warn};

pub type BuildResult<T> = Result<T, SemanticError>;

/// Turns the syntax tree into factory-built filter nodes.
///
/// `IN` lists become an `Or` of `Eq` comparisons and the `NOT` flags on
/// BETWEEN, LIKE, IS NULL and IN become explicit negations.
pub struct Builder<'a, F: FilterFactory> {
    factory: &'a F,
    functions: &'a FunctionRegistry,
    allow_unknown_functions: bool,
}

impl<'a, F: FilterFactory> Builder<'a, F> {
    pub fn new(factory: &'a F, functions: &'a FunctionRegistry) -> Self {
        Self {
            factory,
            functions,
            allow_unknown_functions: false,
        }
    }

    /// Pass unregistered value functions through instead of failing.
    /// Unknown `S_*` and `T_*` names are rejected regardless.
    pub fn allow_unknown_functions(mut self, allow: bool) -> Self {
        self.allow_unknown_functions = allow;
        self
    }

    pub fn build_filter(&self, predicate: &Predicate) -> BuildResult<F::Filter> {
        let f = self.factory;
        match &predicate.kind {
            PredicateKind::Or(clauses) => Ok(f.or(self.build_all(clauses)?)),
            PredicateKind::And(clauses) => Ok(f.and(self.build_all(clauses)?)),
            PredicateKind::Not(inner) => Ok(f.not(self.build_filter(inner)?)),
            PredicateKind::Comparison { left, op, right } => Ok(f.compare(
                *op,
                self.build_expression(left)?,
                self.build_expression(right)?,
            )),
            PredicateKind::Between {
                value,
                low,
                high,
                negated,
            } => {
                let between = f.between(
                    self.build_expression(value)?,
                    self.build_expression(low)?,
                    self.build_expression(high)?,
                );
                Ok(self.negate_if(*negated, between))
            }
            PredicateKind::Like {
                value,
                pattern,
                match_case,
                negated,
            } => {
                let like = f.like(self.build_expression(value)?, pattern, *match_case);
                Ok(self.negate_if(*negated, like))
            }
            PredicateKind::IsNull { value, negated } => {
                let is_null = f.is_null(self.build_expression(value)?);
                Ok(self.negate_if(*negated, is_null))
            }
            PredicateKind::In {
                value,
                choices,
                negated,
            } => {
                let value = self.build_expression(value)?;
                let clauses = choices
                    .iter()
                    .map(|choice| {
                        let choice = self.build_expression(choice)?;
                        Ok(f.compare(ComparisonOp::Eq, value.clone(), choice))
                    })
                    .collect::<BuildResult<Vec<_>>>()?;
                Ok(self.negate_if(*negated, f.or(clauses)))
            }
            PredicateKind::Function { name, args } => {
                self.build_predicate_call(name, args, predicate.span)
            }
        }
    }

    pub fn build_expression(&self, expr: &Expr) -> BuildResult<F::Expr> {
        let f = self.factory;
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(f.literal(literal.to_value())),
            ExprKind::Property(path) => Ok(f.property(&path.to_path())),
            ExprKind::FunctionCall { name, args } => self.build_function(name, args, expr.span),
            ExprKind::Binary { left, op, right } => Ok(f.arithmetic(
                *op,
                self.build_expression(left)?,
                self.build_expression(right)?,
            )),
            ExprKind::Interval { start, end } => {
                let start = self.build_interval_bound(start)?;
                let end = self.build_interval_bound(end)?;
                Ok(f.interval(start, end))
            }
            ExprKind::OpenBound => Err(SemanticError::InvalidIntervalBound {
                found: "'..' outside INTERVAL".to_string(),
                span: expr.span,
            }),
            ExprKind::Geometry {
                srid: Some(srid), ..
            } => Err(SemanticError::EwktSrid {
                srid: *srid,
                span: expr.span,
            }),
            ExprKind::Geometry { geometry, .. } => {
                Ok(f.literal(TypedValue::Geometry(geometry.clone())))
            }
        }
    }

    fn build_all(&self, clauses: &[Predicate]) -> BuildResult<Vec<F::Filter>> {
        clauses.iter().map(|c| self.build_filter(c)).collect()
    }

    fn negate_if(&self, negated: bool, filter: F::Filter) -> F::Filter {
        if negated {
            self.factory.not(filter)
        } else {
            filter
        }
    }

    fn build_args(&self, args: &[Expr]) -> BuildResult<Vec<F::Expr>> {
        args.iter().map(|a| self.build_expression(a)).collect()
    }

    fn check_arity(
        &self,
        signature: &FunctionSignature,
        name: &str,
        found: usize,
        span: Span,
    ) -> BuildResult<()> {
        if signature.accepts(found) {
            return Ok(());
        }
        Err(SemanticError::WrongArity {
            name: name.to_string(),
            expected: signature.arity(),
            found,
            span,
        })
    }

    fn build_predicate_call(&self, name: &str, args: &[Expr], span: Span) -> BuildResult<F::Filter> {
        let signature = self
            .functions
            .lookup(name)
            .ok_or_else(|| SemanticError::FunctionNotFound {
                name: name.to_string(),
                span,
            })?;
        let not_a_predicate = || SemanticError::NotAPredicate {
            name: name.to_string(),
            span,
        };
        if !signature.kind.is_predicate() {
            return Err(not_a_predicate());
        }
        self.check_arity(signature, name, args.len(), span)?;

        let [first, second] = args else {
            return Err(SemanticError::WrongArity {
                name: name.to_string(),
                expected: "2".to_string(),
                found: args.len(),
                span,
            });
        };
        trace!(function = %signature.name, "resolved predicate function");
        match signature.kind {
            FunctionKind::Spatial(op) => Ok(self.factory.spatial(
                op,
                self.build_expression(first)?,
                self.build_expression(second)?,
            )),
            FunctionKind::Temporal(op) => Ok(self.factory.temporal(
                op,
                self.build_expression(first)?,
                self.build_expression(second)?,
            )),
            FunctionKind::Generic => Err(not_a_predicate()),
        }
    }

    fn build_function(&self, name: &str, args: &[Expr], span: Span) -> BuildResult<F::Expr> {
        match self.functions.lookup(name) {
            Some(signature) if signature.kind.is_predicate() => {
                Err(SemanticError::PredicateAsValue {
                    name: name.to_string(),
                    span,
                })
            }
            Some(signature) => {
                self.check_arity(signature, name, args.len(), span)?;
                trace!(function = %signature.name, args = args.len(), "resolved function");
                Ok(self.factory.function(name, self.build_args(args)?))
            }
            None if self.allow_unknown_functions && !is_predicate_function(name) => {
                warn!(function = %name, "passing through unregistered function");
                Ok(self.factory.function(name, self.build_args(args)?))
            }
            None => Err(SemanticError::FunctionNotFound {
                name: name.to_string(),
                span,
            }),
        }
    }

    fn build_interval_bound(&self, bound: &Expr) -> BuildResult<F::Expr> {
        match &bound.kind {
            ExprKind::OpenBound => Ok(self
                .factory
                .literal(TypedValue::String(OPEN_INTERVAL_MARKER.to_string()))),
            ExprKind::Literal(Literal::Date(_) | Literal::Timestamp(_))
            | ExprKind::Property(_)
            | ExprKind::FunctionCall { .. } => self.build_expression(bound),
            _ => Err(SemanticError::InvalidIntervalBound {
                found: bound.describe().to_string(),
                span: bound.span,
            }),
        }
    }
}
