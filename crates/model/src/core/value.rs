use crate::{
    core::{color::Color, geometry::Geometry},
    filter::expression::Expression,
};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Bound value marking an open-ended interval side (`'..'`).
pub const OPEN_INTERVAL_MARKER: &str = "..";

/// Value carried by a literal expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypedValue {
    Long(i64),
    Double(f64),
    String(String),
    Boolean(bool),
    Date(NaiveDate),
    Timestamp(DateTime<FixedOffset>),
    Interval(Box<Interval>),
    Geometry(Geometry),
    Color(Color),
}

impl TypedValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            TypedValue::Long(_) => "long",
            TypedValue::Double(_) => "double",
            TypedValue::String(_) => "string",
            TypedValue::Boolean(_) => "boolean",
            TypedValue::Date(_) => "date",
            TypedValue::Timestamp(_) => "timestamp",
            TypedValue::Interval(_) => "interval",
            TypedValue::Geometry(_) => "geometry",
            TypedValue::Color(_) => "color",
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TypedValue::Long(v) => Some(*v as f64),
            TypedValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Instant represented by a temporal literal. Dates resolve to UTC midnight.
    pub fn as_utc_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            TypedValue::Date(d) => d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()),
            TypedValue::Timestamp(ts) => Some(ts.with_timezone(&Utc)),
            _ => None,
        }
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, TypedValue::Date(_) | TypedValue::Timestamp(_))
    }

    pub fn is_open_marker(&self) -> bool {
        matches!(self, TypedValue::String(s) if s == OPEN_INTERVAL_MARKER)
    }
}

impl From<i64> for TypedValue {
    fn from(value: i64) -> Self {
        TypedValue::Long(value)
    }
}

impl From<f64> for TypedValue {
    fn from(value: f64) -> Self {
        TypedValue::Double(value)
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        TypedValue::Boolean(value)
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        TypedValue::String(value.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(value: String) -> Self {
        TypedValue::String(value)
    }
}

impl From<Geometry> for TypedValue {
    fn from(value: Geometry) -> Self {
        TypedValue::Geometry(value)
    }
}

impl From<Color> for TypedValue {
    fn from(value: Color) -> Self {
        TypedValue::Color(value)
    }
}

/// Time interval literal. Each bound is a temporal literal, a property,
/// a function, or the open marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: Expression,
    pub end: Expression,
}

impl Interval {
    pub fn new(start: Expression, end: Expression) -> Self {
        Self { start, end }
    }

    pub fn open_bound() -> Expression {
        Expression::Literal(TypedValue::String(OPEN_INTERVAL_MARKER.to_string()))
    }

    pub fn is_open_start(&self) -> bool {
        is_open(&self.start)
    }

    pub fn is_open_end(&self) -> bool {
        is_open(&self.end)
    }
}

fn is_open(bound: &Expression) -> bool {
    matches!(bound, Expression::Literal(v) if v.is_open_marker())
}
