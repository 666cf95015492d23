//! Round-trip tests
//!
//! Every filter here must survive text -> tree -> text -> tree unchanged,
//! and encoding must be stable once canonical.

mod canonical;
mod profiles;

use cql2_encoder::to_text;
use cql2_model::Filter;
use cql2_syntax::Compiler;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Parses `text`, encodes it, parses the encoding and checks both trees
/// match. Returns the canonical text.
pub fn assert_round_trip(compiler: &Compiler, text: &str) -> String {
    let first: Filter = compiler
        .compile_filter(text)
        .unwrap_or_else(|err| panic!("{text:?} failed to parse: {err}"));
    let encoded = to_text(&first);
    let second = compiler
        .compile_filter(&encoded)
        .unwrap_or_else(|err| panic!("encoding {encoded:?} of {text:?} failed to parse: {err}"));
    assert_eq!(first, second, "{text:?} encoded as {encoded:?}");
    assert_eq!(to_text(&second), encoded, "encoding of {text:?} is not stable");
    encoded
}
