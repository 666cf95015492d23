//! Resolution of the syntax tree against the function registry.

pub mod builder;
pub mod functions;

pub use builder::{BuildResult, Builder};
pub use functions::{FunctionKind, FunctionRegistry, FunctionSignature};

#[cfg(test)]
mod tests;
