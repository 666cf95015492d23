//! Conversion of literal token text into typed values.

use crate::ast::literal::Literal;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use cql2_model::Color;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid timestamp '{0}', expected RFC 3339")]
    InvalidTimestamp(String),

    #[error("timestamp '{0}' has no UTC offset; append 'Z' or an offset such as '+01:00'")]
    MissingOffset(String),
}

const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Integers become [`Literal::Integer`] unless they overflow 64 bits, in
/// which case they widen to [`Literal::Double`]. Fractions and exponents are
/// always doubles.
pub fn parse_number(text: &str) -> Result<Literal, ResolveError> {
    let invalid = || ResolveError::InvalidNumber(text.to_string());
    if text.contains(['.', 'e', 'E']) {
        return text.parse::<f64>().map(Literal::Double).map_err(|_| invalid());
    }
    match text.parse::<i64>() {
        Ok(i) => Ok(Literal::Integer(i)),
        Err(_) => text.parse::<f64>().map(Literal::Double).map_err(|_| invalid()),
    }
}

pub fn parse_date(text: &str) -> Result<NaiveDate, ResolveError> {
    let invalid = || ResolveError::InvalidDate(text.to_string());
    if text.len() != 10 || !has_date_shape(text) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| invalid())
}

/// Parses an RFC 3339 instant written as `YYYY-MM-DDTHH:MM:SS[.fff](Z|±HH:MM)`.
/// Offset-less text is rejected unless `naive_as_utc` is set, in which case
/// it is read as UTC.
pub fn parse_timestamp(
    text: &str,
    naive_as_utc: bool,
) -> Result<DateTime<FixedOffset>, ResolveError> {
    let invalid = || ResolveError::InvalidTimestamp(text.to_string());
    let has_offset = timestamp_offset(text).ok_or_else(invalid)?;
    if has_offset {
        return DateTime::parse_from_rfc3339(text).map_err(|_| invalid());
    }
    let naive =
        NaiveDateTime::parse_from_str(text, NAIVE_TIMESTAMP_FORMAT).map_err(|_| invalid())?;
    if naive_as_utc {
        Ok(naive.and_utc().fixed_offset())
    } else {
        Err(ResolveError::MissingOffset(text.to_string()))
    }
}

/// Checks `pattern` position by position: `9` is any ASCII digit, every
/// other byte must match literally.
fn matches_shape(text: &[u8], pattern: &[u8]) -> bool {
    text.len() == pattern.len()
        && text.iter().zip(pattern).all(|(&c, &p)| match p {
            b'9' => c.is_ascii_digit(),
            _ => c == p,
        })
}

fn has_date_shape(text: &str) -> bool {
    text.as_bytes()
        .get(..10)
        .is_some_and(|head| matches_shape(head, b"9999-99-99"))
}

/// `Some(true)` for a well-shaped timestamp with `Z` or a numeric offset,
/// `Some(false)` for one with neither, `None` for anything else.
fn timestamp_offset(text: &str) -> Option<bool> {
    let bytes = text.as_bytes();
    let head = bytes.get(..19)?;
    if !matches_shape(head, b"9999-99-99T99:99:99") {
        return None;
    }
    let mut rest = &bytes[19..];
    if let Some(fraction) = rest.strip_prefix(b".") {
        let digits = fraction.iter().take_while(|c| c.is_ascii_digit()).count();
        if digits == 0 {
            return None;
        }
        rest = &fraction[digits..];
    }
    match rest {
        [] => Some(false),
        b"Z" => Some(true),
        [b'+' | b'-', offset @ ..] if matches_shape(offset, b"99:99") => Some(true),
        _ => None,
    }
}

/// `#RRGGBB` strings, any hex digit case.
pub fn parse_color(text: &str) -> Option<Color> {
    Color::from_hex(text)
}
