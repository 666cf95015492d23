use chrono::{DateTime, FixedOffset, NaiveDate};
use cql2_model::{Color, TypedValue};
use std::fmt;

/// Scalar literal after its text has been resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Double(f64),
    String(String),
    Boolean(bool),
    Date(NaiveDate),
    Timestamp(DateTime<FixedOffset>),
    Color(Color),
}

impl Literal {
    pub fn negated(self) -> Literal {
        match self {
            Literal::Integer(i) => Literal::Integer(-i),
            Literal::Double(d) => Literal::Double(-d),
            other => other,
        }
    }

    pub fn to_value(&self) -> TypedValue {
        match self {
            Literal::Integer(i) => TypedValue::Long(*i),
            Literal::Double(d) => TypedValue::Double(*d),
            Literal::String(s) => TypedValue::String(s.clone()),
            Literal::Boolean(b) => TypedValue::Boolean(*b),
            Literal::Date(d) => TypedValue::Date(*d),
            Literal::Timestamp(ts) => TypedValue::Timestamp(*ts),
            Literal::Color(c) => TypedValue::Color(*c),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(i) => write!(f, "{i}"),
            Literal::Double(d) => write!(f, "{d:?}"),
            Literal::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Literal::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Literal::Date(d) => write!(f, "DATE('{}')", d.format("%Y-%m-%d")),
            Literal::Timestamp(ts) => write!(f, "TIMESTAMP('{}')", ts.to_rfc3339()),
            Literal::Color(c) => write!(f, "'{c}'"),
        }
    }
}
