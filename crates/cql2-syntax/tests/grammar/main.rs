//! Grammar tests
//!
//! These tests run CQL2 text through the full compiler and check the
//! filter trees it produces, or the errors it reports.

mod accepted;
mod rejected;
