use crate::{assert_round_trip, init_tracing};
use cql2_encoder::to_text;
use cql2_syntax::{Compiler, parse_expression, parse_filter};

#[test]
fn test_filters_round_trip() {
    init_tracing();
    let compiler = Compiler::default();
    let inputs = [
        "ATTR1 < 10 AND ATTR2 < 2 OR ATTR3 > 10",
        "ATTR1 < 10 AND (ATTR2 < 2 OR ATTR3 > 10)",
        "(a = 1 AND b = 2) AND c = 3",
        "NOT (a = 1 OR b = 2)",
        "NOT NOT a = 1",
        "a NOT IN (1, 2)",
        "a IN ('x')",
        "x NOT BETWEEN 1 AND 2 * 3",
        "name NOT LIKE 'a''b%'",
        "name IS NOT NULL",
        "pop / (area - 1) >= 10.5",
        "-x + 1 > 0",
        "a - -2 = 1e3",
        "strConcat(a, 'b') = 'ab' AND abs(x) <> 3.0",
        "flag = TRUE OR flag IS NULL",
        "\"Population 2020\" > 1000 AND \"a.b\" = 'x' AND gmd:info.title = 'y'",
        "S_INTERSECTS(geom, ENVELOPE(-10, 20.5, 30, 40))",
        "S_WITHIN(geom, MULTIPOINT(1 2, 3 4))",
        "S_EQUALS(geom, POINT EMPTY)",
        "NOT S_TOUCHES(geom, LINESTRING(0 0, 1 1.5))",
        "T_DURING(ts, INTERVAL('2020-01-01', '..'))",
        "T_AFTER(ts, TIMESTAMP('2020-01-01T10:00:00.5+02:00'))",
        "T_BEFORE(ts, DATE('1999-12-31')) AND T_EQUALS(a, b)",
    ];
    for text in inputs {
        assert_round_trip(&compiler, text);
    }
}

#[test]
fn test_canonical_text() {
    init_tracing();
    let compiler = Compiler::default();
    let cases = [
        ("a=1", "a = 1"),
        ("a.b.c <> 'x'", "a.b.c <> 'x'"),
        ("ATTR1 > ((1 + 2) / 3)", "ATTR1 > (1 + 2) / 3"),
        ("ATTR1 NOT BETWEEN 10 AND 20", "ATTR1 NOT BETWEEN 10 AND 20"),
        ("NOT ATTR1 BETWEEN 10 AND 20", "ATTR1 NOT BETWEEN 10 AND 20"),
        ("s_intersects(geom, POINT(1 2))", "S_INTERSECTS(geom, POINT(1 2))"),
        (
            "T_AFTER(ts, TIMESTAMP('2006-11-30T01:30:00Z'))",
            "T_AFTER(ts, TIMESTAMP('2006-11-30T01:30:00Z'))",
        ),
    ];
    for (text, expected) in cases {
        assert_eq!(assert_round_trip(&compiler, text), expected);
    }
}

#[test]
fn test_or_chain_becomes_in() {
    let chain = parse_filter("A=1 OR A=2 OR A=3").unwrap();
    assert_eq!(to_text(&chain), "A IN (1, 2, 3)");
    assert_eq!(parse_filter("A IN (1, 2, 3)").unwrap(), chain);

    let negated = parse_filter("NOT (A = 1 OR A = 2)").unwrap();
    assert_eq!(to_text(&negated), "A NOT IN (1, 2)");
}

#[test]
fn test_color_is_canonical_hex() {
    let color = parse_expression("'#ff0000'").unwrap();
    assert_eq!(to_text(&color), "'#FF0000'");
    assert_eq!(parse_expression(&to_text(&color)).unwrap(), color);
}

#[test]
fn test_quoted_property_equality() {
    let quoted = parse_filter("\"name\" = 'x'").unwrap();
    let plain = parse_filter("name = 'x'").unwrap();
    assert_eq!(quoted, plain);
    assert_eq!(to_text(&quoted), "name = 'x'");
}

#[test]
fn test_expressions_round_trip() {
    for text in ["1 - (2 - 3)", "(a + b) * c", "a * b + c / d", "round(a / 3.0)"] {
        let expr = parse_expression(text).unwrap();
        assert_eq!(to_text(&expr), text);
        assert_eq!(parse_expression(&to_text(&expr)).unwrap(), expr);
    }
}
