use crate::init_tracing;
use cql2_model::Filter;
use cql2_syntax::Compiler;
use std::thread;

#[test]
fn test_shared_compiler_across_threads() {
    init_tracing();
    let compiler = Compiler::default();
    let inputs = [
        "a = 1",
        "b BETWEEN 1 AND 10",
        "name LIKE 'x%' OR name IS NULL",
        "S_INTERSECTS(geom, POINT(1 2))",
        "T_BEFORE(ts, DATE('2020-01-01'))",
        "c IN (1, 2, 3)",
        "NOT (d < 2)",
        "e = 'it''s'",
    ];
    let expected: Vec<Filter> = inputs
        .iter()
        .map(|text| compiler.compile_filter(text).unwrap())
        .collect();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let compiler = &compiler;
                let inputs = &inputs;
                scope.spawn(move || {
                    (0..50)
                        .map(|i| {
                            let index = (worker + i) % inputs.len();
                            (index, compiler.compile_filter(inputs[index]).unwrap())
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            for (index, filter) in handle.join().unwrap() {
                assert_eq!(filter, expected[index]);
            }
        }
    });
}
