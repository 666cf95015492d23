//! Typed filter/expression model produced by the CQL2 compiler.

pub mod core;
pub mod filter;

pub use crate::core::{
    color::Color,
    geometry::{Coord, Geometry, TextWktReader, WktError, WktReader},
    value::{Interval, OPEN_INTERVAL_MARKER, TypedValue},
};
pub use crate::filter::{
    expression::{ArithmeticOp, Expression},
    factory::{FilterFactory, ModelFactory},
    predicate::{ComparisonOp, Filter, SpatialOp, TemporalOp},
};
