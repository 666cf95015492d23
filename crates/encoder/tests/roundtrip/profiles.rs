use crate::{assert_round_trip, init_tracing};
use cql2_model::{Color, Expression, Filter, TypedValue};
use cql2_syntax::{Compiler, CompilerConfig, GrammarProfile, LegacySyntax};

#[test]
fn test_color_round_trip() {
    init_tracing();
    let compiler = Compiler::default();

    let text = assert_round_trip(&compiler, "fill = '#ff8000'");
    assert_eq!(text, "fill = '#FF8000'");
    assert_eq!(
        compiler.compile_filter(&text).unwrap(),
        Filter::compare(
            cql2_model::ComparisonOp::Eq,
            Expression::property("fill"),
            Expression::Literal(TypedValue::Color(Color::from_rgb(255, 128, 0))),
        )
    );
}

#[test]
fn test_case_insensitive_like_round_trip() {
    init_tracing();
    let profile = GrammarProfile::cql2().with_legacy(LegacySyntax::ILIKE);
    let compiler = Compiler::new(CompilerConfig::default().with_profile(profile));

    assert_eq!(
        assert_round_trip(&compiler, "name NOT ILIKE 'ro%'"),
        "name NOT ILIKE 'ro%'"
    );
}
