use cql2_syntax::{CqlError, SemanticError, parse_filter};

fn parse_error(text: &str) -> cql2_syntax::ParseError {
    match parse_filter(text) {
        Err(CqlError::Parse(err)) => err,
        other => panic!("Expected parse error for {text:?}, got {other:?}"),
    }
}

#[test]
fn test_legacy_syntax_is_rejected() {
    let samples = [
        "POP_RANK eq 6",
        "POP_RANK neq 6",
        "POP_RANK lt 6",
        "POP_RANK lte 6",
        "POP_RANK gt 6",
        "POP_RANK gte 6",
        "POP_RANK != 6",
        "[X < 4 AND Y < 4] OR Z < 4",
        "ATTR1 ILIKE 'abc%'",
        "ATTR1 EXISTS",
        "ATTR1 DOES-NOT-EXIST",
        "ATTR1 BEFORE 2006-11-30T01:30:00Z",
        "INCLUDE",
        "EXCLUDE",
        "IN ('river.1', 'river.2')",
        "BBOX(ATTR1, 10, 20, 30, 40)",
        "DWITHIN(ATTR1, POINT(1 2), 10, kilometers)",
        "BEYOND(ATTR1, POINT(1 2), 10, kilometers)",
        "RELATE(ATTR1, POINT(1 2), T*****FF*)",
        "T_AFTER(ATTR1, TIMESTAMP('2008-09-09T17:00:00'))",
    ];
    for text in samples {
        parse_error(text);
    }
}

#[test]
fn test_error_reports_position() {
    let err = parse_error("ATTR1 = 1 AND ATTR2 eq 2");
    assert_eq!(err.span.start, 20);
    assert_eq!(err.span.column, 21);
    assert_eq!(err.found, "'eq'");
    assert!(err.hint.unwrap().contains("'='"));
}

#[test]
fn test_lex_errors() {
    match parse_filter("ATTR1 = 'abc") {
        Err(CqlError::Lex(err)) => assert_eq!(err.position, 8),
        other => panic!("Expected lex error, got {other:?}"),
    }
    match parse_filter("ATTR1 = #") {
        Err(err @ CqlError::Lex(_)) => {
            let rendered = err.format_error("ATTR1 = #");
            assert!(rendered.ends_with("ATTR1 = #\n        ^"), "{rendered}");
        }
        other => panic!("Expected lex error, got {other:?}"),
    }
}

#[test]
fn test_semantic_errors() {
    assert!(matches!(
        parse_filter("S_DWITHIN(a, b)"),
        Err(CqlError::Semantic(SemanticError::FunctionNotFound { .. }))
    ));
    assert!(matches!(
        parse_filter("S_INTERSECTS(geom, SRID=4326;POINT(1 2))"),
        Err(CqlError::Semantic(SemanticError::EwktSrid { srid: 4326, .. }))
    ));
    assert!(matches!(
        parse_filter("abs(a) = S_TOUCHES(a, b)"),
        Err(CqlError::Semantic(SemanticError::PredicateAsValue { .. }))
    ));
}

#[test]
fn test_empty_input() {
    let err = parse_error("   ");
    assert_eq!(err.found, "end of input");
}
