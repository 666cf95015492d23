use crate::init_tracing;
use chrono::{TimeZone, Utc};
use cql2_model::{ComparisonOp, Expression, Filter, TemporalOp, TypedValue};
use cql2_syntax::{
    Compiler, CompilerConfig, ConfigError, CqlError, GrammarProfile, LegacySyntax, SemanticError,
};

fn legacy_compiler(flags: LegacySyntax) -> Compiler {
    Compiler::new(CompilerConfig::default().with_profile(GrammarProfile::cql2().with_legacy(flags)))
}

#[test]
fn test_ilike_profile() {
    init_tracing();
    let compiler = legacy_compiler(LegacySyntax::ILIKE);
    assert_eq!(
        compiler.compile_filter("name ILIKE 'ro%'").unwrap(),
        Filter::Like {
            value: Expression::property("name"),
            pattern: "ro%".to_string(),
            match_case: false,
        }
    );
}

#[test]
fn test_bracket_profile() {
    init_tracing();
    let compiler = legacy_compiler(LegacySyntax::BRACKET_GROUPING);
    let filter = compiler.compile_filter("[X < 4 AND Y < 4] OR Z < 4").unwrap();
    match filter {
        Filter::Or(clauses) => {
            assert!(matches!(clauses[0], Filter::And(ref c) if c.len() == 2));
            assert!(matches!(
                clauses[1],
                Filter::Comparison {
                    op: ComparisonOp::Lt,
                    ..
                }
            ));
        }
        other => panic!("Expected OR, got {other:?}"),
    }
}

#[test]
fn test_naive_timestamp_profile() {
    init_tracing();
    let text = "T_AFTER(ATTR1, TIMESTAMP('2008-09-09T17:00:00'))";
    assert!(Compiler::default().compile_filter(text).is_err());

    let compiler = legacy_compiler(LegacySyntax::NAIVE_TIMESTAMPS);
    match compiler.compile_filter(text).unwrap() {
        Filter::Temporal { op, other, .. } => {
            assert_eq!(op, TemporalOp::After);
            let expected = Utc.with_ymd_and_hms(2008, 9, 9, 17, 0, 0).unwrap();
            assert_eq!(
                other,
                Expression::Literal(TypedValue::Timestamp(expected.fixed_offset()))
            );
        }
        other => panic!("Expected temporal filter, got {other:?}"),
    }
}

#[test]
fn test_profile_from_json() {
    init_tracing();
    let profile: GrammarProfile = serde_json::from_str(
        r#"{"name": "geoserver", "legacy": "BRACKET_GROUPING | ILIKE", "color_literals": true}"#,
    )
    .unwrap();
    let compiler = Compiler::new(CompilerConfig::default().with_profile(profile));

    assert!(compiler.compile_filter("[name ILIKE 'a%']").is_ok());
    assert_eq!(
        compiler.compile_expression("'#FF0000'").unwrap(),
        Expression::Literal(TypedValue::Color(cql2_model::Color::from_rgb(255, 0, 0)))
    );
}

#[test]
fn test_color_literals_opt_out() {
    init_tracing();
    let profile = GrammarProfile::cql2().with_color_literals(false);
    let compiler = Compiler::new(CompilerConfig::default().with_profile(profile));
    assert_eq!(
        compiler.compile_expression("'#FF0000'").unwrap(),
        Expression::literal("#FF0000")
    );
}

#[test]
fn test_custom_functions() {
    init_tracing();
    let text = "geohash(location, 5) = 'u4pru'";
    assert!(matches!(
        Compiler::default().compile_filter(text),
        Err(CqlError::Semantic(SemanticError::FunctionNotFound { .. }))
    ));

    let config = CompilerConfig::default()
        .with_functions_json(r#"[{"name": "geohash", "min_args": 2, "max_args": 2}]"#)
        .unwrap();
    let compiler = Compiler::new(config);
    assert!(compiler.compile_filter(text).is_ok());
    assert!(matches!(
        compiler.compile_filter("geohash(location) = 'u4pru'"),
        Err(CqlError::Semantic(SemanticError::WrongArity { found: 1, .. }))
    ));
}

#[test]
fn test_bad_function_table() {
    assert!(matches!(
        CompilerConfig::default().with_functions_json(r#"[{"name": ""}]"#),
        Err(ConfigError::InvalidFunctionTable(_))
    ));
    assert!(matches!(
        CompilerConfig::default().with_functions_json(r#"[{"name": "", "min_args": 0}]"#),
        Err(ConfigError::InvalidSignature { .. })
    ));
}

#[test]
fn test_unknown_functions_pass_through() {
    init_tracing();
    let compiler = Compiler::new(CompilerConfig::default().with_unknown_functions(true));
    assert_eq!(
        compiler.compile_expression("vendor_fn(a, 1)").unwrap(),
        Expression::function(
            "vendor_fn",
            vec![Expression::property("a"), Expression::literal(1i64)]
        )
    );
    assert!(compiler.compile_filter("S_UNKNOWN(a, b)").is_err());
}
