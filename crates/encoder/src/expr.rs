use crate::{Render, Renderer};
use cql2_model::{ArithmeticOp, Expression};
use cql2_syntax::lexer::is_plain_identifier;

impl Render for Expression {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expression::Literal(value) => value.render(r),
            Expression::PropertyName(path) => push_property(r, path),
            Expression::Function { name, args } => {
                r.push(name);
                r.push("(");
                r.list(args, ", ");
                r.push(")");
            }
            Expression::Arithmetic { op, left, right } => {
                render_operand(r, left, *op, false);
                r.push(" ");
                r.push(op.symbol());
                r.push(" ");
                render_operand(r, right, *op, true);
            }
        }
    }
}

/// Writes `a/b/c` as `a.b.c` when every segment can stand unquoted,
/// otherwise as one quoted identifier.
pub fn push_property(r: &mut Renderer, path: &str) {
    if path.split('/').all(is_plain_identifier) {
        r.push(&path.replace('/', "."));
    } else {
        r.text.push('"');
        r.text.push_str(&path.replace('"', "\"\""));
        r.text.push('"');
    }
}

/// Operators are left-associative, so a right operand of equal
/// precedence needs parentheses as well.
fn render_operand(r: &mut Renderer, operand: &Expression, parent: ArithmeticOp, right: bool) {
    let wrap = match operand {
        Expression::Arithmetic { op, .. } if right => op.precedence() <= parent.precedence(),
        Expression::Arithmetic { op, .. } => op.precedence() < parent.precedence(),
        _ => false,
    };
    if wrap {
        r.group(operand);
    } else {
        operand.render(r);
    }
}
