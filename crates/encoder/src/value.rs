use crate::{Render, Renderer};
use chrono::SecondsFormat;
use cql2_model::{Interval, TypedValue};

impl Render for TypedValue {
    fn render(&self, r: &mut Renderer) {
        match self {
            TypedValue::Long(n) => r.push(&n.to_string()),
            // Debug keeps the decimal point, so `1.0` stays a Double
            TypedValue::Double(n) => r.push(&format!("{n:?}")),
            TypedValue::String(s) => push_string(r, s),
            TypedValue::Boolean(true) => r.push("TRUE"),
            TypedValue::Boolean(false) => r.push("FALSE"),
            TypedValue::Date(date) => {
                r.push("DATE(");
                push_string(r, &date.format("%Y-%m-%d").to_string());
                r.push(")");
            }
            TypedValue::Timestamp(ts) => {
                r.push("TIMESTAMP(");
                push_string(r, &ts.to_rfc3339_opts(SecondsFormat::AutoSi, true));
                r.push(")");
            }
            TypedValue::Interval(interval) => interval.render(r),
            TypedValue::Geometry(geometry) => r.push(&geometry.to_string()),
            TypedValue::Color(color) => push_string(r, &color.to_string()),
        }
    }
}

impl Render for Interval {
    fn render(&self, r: &mut Renderer) {
        r.push("INTERVAL(");
        self.start.render(r);
        r.push(", ");
        self.end.render(r);
        r.push(")");
    }
}

/// Writes a single-quoted string literal, doubling embedded quotes.
pub fn push_string(r: &mut Renderer, text: &str) {
    r.text.push('\'');
    r.text.push_str(&text.replace('\'', "''"));
    r.text.push('\'');
}
