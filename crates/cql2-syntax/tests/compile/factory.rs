use cql2_model::{
    ArithmeticOp, ComparisonOp, FilterFactory, SpatialOp, TemporalOp, TypedValue,
};
use cql2_syntax::Compiler;

/// Renders nodes as SQL-like text, standing in for a database backend.
struct SqlFactory;

impl FilterFactory for SqlFactory {
    type Expr = String;
    type Filter = String;

    fn literal(&self, value: TypedValue) -> String {
        match value {
            TypedValue::String(s) => format!("'{}'", s.replace('\'', "''")),
            TypedValue::Long(n) => n.to_string(),
            TypedValue::Double(n) => n.to_string(),
            TypedValue::Boolean(b) => b.to_string(),
            other => format!("<{}>", other.type_name()),
        }
    }

    fn property(&self, path: &str) -> String {
        format!("\"{path}\"")
    }

    fn function(&self, name: &str, args: Vec<String>) -> String {
        format!("{}({})", name.to_lowercase(), args.join(", "))
    }

    fn arithmetic(&self, op: ArithmeticOp, left: String, right: String) -> String {
        format!("({left} {op} {right})")
    }

    fn interval(&self, start: String, end: String) -> String {
        format!("tstzrange({start}, {end})")
    }

    fn compare(&self, op: ComparisonOp, left: String, right: String) -> String {
        format!("{left} {op} {right}")
    }

    fn between(&self, value: String, low: String, high: String) -> String {
        format!("{value} BETWEEN {low} AND {high}")
    }

    fn like(&self, value: String, pattern: &str, match_case: bool) -> String {
        let op = if match_case { "LIKE" } else { "ILIKE" };
        format!("{value} {op} '{pattern}'")
    }

    fn is_null(&self, value: String) -> String {
        format!("{value} IS NULL")
    }

    fn spatial(&self, op: SpatialOp, geom1: String, geom2: String) -> String {
        format!("st_{}({geom1}, {geom2})", op.function_name()[2..].to_lowercase())
    }

    fn temporal(&self, op: TemporalOp, instant: String, other: String) -> String {
        format!("{}({instant}, {other})", op.function_name().to_lowercase())
    }

    fn and(&self, clauses: Vec<String>) -> String {
        format!("({})", clauses.join(" AND "))
    }

    fn or(&self, clauses: Vec<String>) -> String {
        format!("({})", clauses.join(" OR "))
    }

    fn not(&self, clause: String) -> String {
        format!("NOT {clause}")
    }
}

#[test]
fn test_custom_factory_output() {
    let compiler = Compiler::default();
    let sql = compiler
        .compile_filter_with(
            "pop > 2 * 1000 AND name NOT LIKE 'A%' AND kind IN ('a', 'b')",
            &SqlFactory,
        )
        .unwrap();
    assert_eq!(
        sql,
        "(\"pop\" > (2 * 1000) AND NOT \"name\" LIKE 'A%' AND (\"kind\" = 'a' OR \"kind\" = 'b'))"
    );
}

#[test]
fn test_custom_factory_predicates() {
    let compiler = Compiler::default();
    let sql = compiler
        .compile_filter_with("S_INTERSECTS(geom, POINT(1 2))", &SqlFactory)
        .unwrap();
    assert_eq!(sql, "st_intersects(\"geom\", <geometry>)");

    let sql = compiler
        .compile_expression_with("strToUpperCase(a.b)", &SqlFactory)
        .unwrap();
    assert_eq!(sql, "strtouppercase(\"a/b\")");
}
