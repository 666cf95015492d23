use cql2_model::{
    ArithmeticOp, Color, ComparisonOp, Expression, Filter, Geometry, SpatialOp, TemporalOp, TypedValue,
};
use cql2_syntax::{parse_expression, parse_filter};

fn compare(op: ComparisonOp, property: &str, value: impl Into<TypedValue>) -> Filter {
    Filter::compare(op, Expression::property(property), Expression::literal(value))
}

#[test]
fn test_comparison_samples() {
    let samples = [
        ("ATTR1 < 1", ComparisonOp::Lt),
        ("ATTR1 <= 1", ComparisonOp::Le),
        ("ATTR1 <> 1", ComparisonOp::Ne),
        ("ATTR1 = 1", ComparisonOp::Eq),
        ("ATTR1 > 1", ComparisonOp::Gt),
        ("ATTR1 >= 1", ComparisonOp::Ge),
    ];
    for (text, op) in samples {
        assert_eq!(parse_filter(text).unwrap(), compare(op, "ATTR1", 1i64), "{text}");
    }
}

#[test]
fn test_logical_samples() {
    let filter = parse_filter("ATTR1 < 10 AND ATTR2 < 2 OR ATTR3 > 10").unwrap();
    assert_eq!(
        filter,
        Filter::Or(vec![
            Filter::And(vec![
                compare(ComparisonOp::Lt, "ATTR1", 10i64),
                compare(ComparisonOp::Lt, "ATTR2", 2i64),
            ]),
            compare(ComparisonOp::Gt, "ATTR3", 10i64),
        ])
    );

    let filter = parse_filter("ATTR1 < 10 AND (ATTR2 < 2 OR ATTR3 > 10)").unwrap();
    assert!(matches!(filter, Filter::And(ref c) if matches!(c[1], Filter::Or(_))));

    let filter = parse_filter("NOT (ATTR1 < 10 AND ATTR2 < 2)").unwrap();
    assert!(matches!(filter, Filter::Not(ref inner) if matches!(**inner, Filter::And(_))));
}

#[test]
fn test_arithmetic_samples() {
    let filter = parse_filter("ATTR1 > ((1 + 2) / 3)").unwrap();
    let expected = Expression::arithmetic(
        ArithmeticOp::Div,
        Expression::arithmetic(
            ArithmeticOp::Add,
            Expression::literal(1i64),
            Expression::literal(2i64),
        ),
        Expression::literal(3i64),
    );
    assert_eq!(
        filter,
        Filter::compare(ComparisonOp::Gt, Expression::property("ATTR1"), expected)
    );

    assert!(parse_filter("ATTR1 < (1 + ((2 / 3) * 4))").is_ok());
    assert!(parse_filter("ATTR1 > 1 + 2").is_ok());
}

#[test]
fn test_null_like_between_samples() {
    assert_eq!(
        parse_filter("ATTR1 IS NULL").unwrap(),
        Filter::IsNull {
            value: Expression::property("ATTR1")
        }
    );
    assert_eq!(
        parse_filter("ATTR1 LIKE 'abc%'").unwrap(),
        Filter::Like {
            value: Expression::property("ATTR1"),
            pattern: "abc%".to_string(),
            match_case: true,
        }
    );
    assert_eq!(
        parse_filter("ATTR1 BETWEEN 10 AND 20").unwrap(),
        Filter::Between {
            value: Expression::property("ATTR1"),
            low: Expression::literal(10i64),
            high: Expression::literal(20i64),
        }
    );
    assert!(matches!(
        parse_filter("ATTR1 NOT BETWEEN 10 AND 20").unwrap(),
        Filter::Not(_)
    ));
}

#[test]
fn test_function_samples() {
    assert_eq!(
        parse_filter("ATTR1 = strConcat(A, '1')").unwrap(),
        Filter::compare(
            ComparisonOp::Eq,
            Expression::property("ATTR1"),
            Expression::function(
                "strConcat",
                vec![Expression::property("A"), Expression::literal("1")]
            ),
        )
    );
    assert!(parse_filter("ATTR1 < abs(10)").is_ok());
    assert!(parse_filter("casei(name) LIKE 'rome%'").is_ok());
}

#[test]
fn test_spatial_samples() {
    let filter = parse_filter("S_INTERSECTS(ATTR1, ENVELOPE(10, 20, 30, 40))").unwrap();
    match filter {
        Filter::Spatial { op, geom2, .. } => {
            assert_eq!(op, SpatialOp::Intersects);
            let Expression::Literal(TypedValue::Geometry(env)) = geom2 else {
                panic!("Expected geometry literal");
            };
            assert_eq!(env.to_string(), "POLYGON((10 20,10 40,30 40,30 20,10 20))");
        }
        other => panic!("Expected spatial filter, got {other:?}"),
    }

    for op in SpatialOp::ALL {
        let text = format!("{}(the_geom, POINT(1 2))", op.function_name());
        assert!(
            matches!(parse_filter(&text).unwrap(), Filter::Spatial { op: found, .. } if found == op),
            "{text}"
        );
    }

    let text = "S_CONTAINS(geom, MULTIPOINT(1 2, 3 4))";
    assert!(parse_filter(text).is_ok());
    let text = "S_WITHIN(geom, GEOMETRYCOLLECTION(POINT(1 2), LINESTRING(0 0, 1 1)))";
    assert!(parse_filter(text).is_ok());
}

#[test]
fn test_temporal_samples() {
    let filter = parse_filter("T_BEFORE(ATTR1, TIMESTAMP('2006-11-30T01:30:00Z'))").unwrap();
    assert!(matches!(filter, Filter::Temporal { op: TemporalOp::Before, .. }));

    let filter = parse_filter(
        "T_DURING(ATTR1, INTERVAL(TIMESTAMP('2006-11-30T01:30:00Z'), TIMESTAMP('2006-12-31T01:30:00Z')))",
    )
    .unwrap();
    assert!(matches!(filter, Filter::Temporal { op: TemporalOp::During, .. }));

    let filter = parse_filter("T_AFTER(updated, DATE('2006-12-31'))").unwrap();
    match filter {
        Filter::Temporal { other, .. } => {
            assert!(matches!(other, Expression::Literal(TypedValue::Date(_))))
        }
        other => panic!("Expected temporal filter, got {other:?}"),
    }
}

#[test]
fn test_property_forms() {
    assert_eq!(
        parse_filter("gmd:MD_Metadata.gmd:identificationInfo = 'x'").unwrap(),
        compare(
            ComparisonOp::Eq,
            "gmd:MD_Metadata/gmd:identificationInfo",
            "x"
        )
    );
    assert_eq!(
        parse_filter("\"Population 2020\" >= 1000").unwrap(),
        compare(ComparisonOp::Ge, "Population 2020", 1000i64)
    );
}

#[test]
fn test_literal_forms() {
    assert_eq!(parse_expression("'it''s'").unwrap(), Expression::literal("it's"));
    assert_eq!(parse_expression("TRUE").unwrap(), Expression::literal(true));
    assert_eq!(parse_expression("-3.5").unwrap(), Expression::literal(-3.5));
    assert_eq!(
        parse_expression("POINT(1 2)").unwrap(),
        Expression::literal(Geometry::point(1.0, 2.0))
    );
}

#[test]
fn test_color_literals() {
    assert_eq!(
        parse_expression("'#ff0000'").unwrap(),
        Expression::literal(Color::from_rgb(255, 0, 0))
    );
    assert_eq!(
        parse_filter("fill = '#00A0ff'").unwrap(),
        compare(ComparisonOp::Eq, "fill", Color::from_rgb(0, 160, 255))
    );
    // Not a six-digit hex shape, so it stays a string
    assert_eq!(parse_expression("'#fff'").unwrap(), Expression::literal("#fff"));
}

#[test]
fn test_temporal_literal_shapes() {
    for text in [
        "T_AFTER(ts, DATE('2008-9-9'))",
        "T_AFTER(ts, TIMESTAMP('2008-09-09 17:00:00Z'))",
        "T_AFTER(ts, TIMESTAMP('2008-09-09t17:00:00z'))",
    ] {
        assert!(parse_filter(text).is_err(), "{text}");
    }
    assert!(parse_filter("T_AFTER(ts, DATE('2008-09-09'))").is_ok());
}

#[test]
fn test_in_list() {
    let filter = parse_filter("NAME IN ('a', 'b')").unwrap();
    assert_eq!(
        filter,
        Filter::Or(vec![
            compare(ComparisonOp::Eq, "NAME", "a"),
            compare(ComparisonOp::Eq, "NAME", "b"),
        ])
    );
}
