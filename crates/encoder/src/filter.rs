use crate::{Render, Renderer, value::push_string};
use cql2_model::{ComparisonOp, Expression, Filter};

impl Render for Filter {
    fn render(&self, r: &mut Renderer) {
        match self {
            Filter::Comparison { op, left, right } => {
                left.render(r);
                r.push(" ");
                r.push(op.symbol());
                r.push(" ");
                right.render(r);
            }
            Filter::Between { value, low, high } => render_between(r, value, low, high, false),
            Filter::Like {
                value,
                pattern,
                match_case,
            } => render_like(r, value, pattern, *match_case, false),
            Filter::IsNull { value } => {
                value.render(r);
                r.push(" IS NULL");
            }
            Filter::Spatial { op, geom1, geom2 } => {
                render_call(r, op.function_name(), geom1, geom2)
            }
            Filter::Temporal { op, instant, other } => {
                render_call(r, op.function_name(), instant, other)
            }
            Filter::And(clauses) if clauses.is_empty() => r.push("1 = 1"),
            Filter::Or(clauses) if clauses.is_empty() => r.push("1 = 0"),
            Filter::And(clauses) => render_chain(r, clauses, " AND "),
            Filter::Or(clauses) => match in_list(clauses) {
                Some((value, choices)) => render_in(r, value, &choices, false),
                None => render_chain(r, clauses, " OR "),
            },
            Filter::Not(inner) => render_not(r, inner),
        }
    }
}

/// Matches an `Or` of `Eq` comparisons that share their left-hand side,
/// which is how `IN` lists are stored.
fn in_list(clauses: &[Filter]) -> Option<(&Expression, Vec<&Expression>)> {
    let (first, _) = eq_operands(clauses.first()?)?;
    let choices = clauses
        .iter()
        .map(|clause| match eq_operands(clause)? {
            (left, right) if left == first => Some(right),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    Some((first, choices))
}

fn eq_operands(filter: &Filter) -> Option<(&Expression, &Expression)> {
    match filter {
        Filter::Comparison {
            op: ComparisonOp::Eq,
            left,
            right,
        } => Some((left, right)),
        _ => None,
    }
}

/// Nested chains keep their grouping; `IN` shapes need no parentheses.
fn needs_group(filter: &Filter) -> bool {
    match filter {
        Filter::And(_) => true,
        Filter::Or(clauses) => in_list(clauses).is_none(),
        _ => false,
    }
}

fn render_chain(r: &mut Renderer, clauses: &[Filter], separator: &str) {
    for (i, clause) in clauses.iter().enumerate() {
        if i > 0 {
            r.push(separator);
        }
        if needs_group(clause) {
            r.group(clause);
        } else {
            clause.render(r);
        }
    }
}

fn render_not(r: &mut Renderer, inner: &Filter) {
    match inner {
        Filter::Between { value, low, high } => render_between(r, value, low, high, true),
        Filter::Like {
            value,
            pattern,
            match_case,
        } => render_like(r, value, pattern, *match_case, true),
        Filter::IsNull { value } => {
            value.render(r);
            r.push(" IS NOT NULL");
        }
        Filter::Or(clauses) if !clauses.is_empty() => match in_list(clauses) {
            Some((value, choices)) => render_in(r, value, &choices, true),
            None => {
                r.push("NOT ");
                r.group(inner);
            }
        },
        Filter::And(clauses) if !clauses.is_empty() => {
            r.push("NOT ");
            r.group(inner);
        }
        _ => {
            r.push("NOT ");
            inner.render(r);
        }
    }
}

fn render_between(
    r: &mut Renderer,
    value: &Expression,
    low: &Expression,
    high: &Expression,
    negated: bool,
) {
    value.render(r);
    r.push(if negated { " NOT BETWEEN " } else { " BETWEEN " });
    low.render(r);
    r.push(" AND ");
    high.render(r);
}

fn render_like(r: &mut Renderer, value: &Expression, pattern: &str, match_case: bool, negated: bool) {
    value.render(r);
    if negated {
        r.push(" NOT");
    }
    r.push(if match_case { " LIKE " } else { " ILIKE " });
    push_string(r, pattern);
}

fn render_in(r: &mut Renderer, value: &Expression, choices: &[&Expression], negated: bool) {
    value.render(r);
    r.push(if negated { " NOT IN (" } else { " IN (" });
    for (i, choice) in choices.iter().enumerate() {
        if i > 0 {
            r.push(", ");
        }
        choice.render(r);
    }
    r.push(")");
}

fn render_call(r: &mut Renderer, name: &str, first: &Expression, second: &Expression) {
    r.push(name);
    r.push("(");
    first.render(r);
    r.push(", ");
    second.render(r);
    r.push(")");
}
