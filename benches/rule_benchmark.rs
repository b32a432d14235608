//! Benchmark for parsing and evaluation performance

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rule_engine_core::expr::{cache, evaluate, parse, Record, Value};
use rule_engine_core::{CompareOp, LogicalOp, Node};

/// A record shaped like a typical eligibility check input
fn sample_record() -> Record {
    let mut record = Record::new();
    record.insert("age".to_string(), Value::Number(35.0));
    record.insert("annual_salary".to_string(), Value::Number(72000.0));
    record.insert("experience".to_string(), Value::Number(7.0));
    record.insert("department".to_string(), Value::String("Sales".to_string()));
    record.insert("city".to_string(), Value::String("Austin".to_string()));
    record
}

/// A wide left-leaning tree, the shape the combinator produces
fn combined_tree(leaves: usize) -> Node {
    (0..leaves)
        .map(|i| Node::operand(format!("field_{}", i), CompareOp::Greater, i as i32))
        .reduce(|left, right| Node::operator(LogicalOp::And, left, right))
        .expect("at least one leaf")
}

fn benchmark_rule_parsing(c: &mut Criterion) {
    let rules = vec![
        "age > 30",
        "age > 30 AND department = 'Sales'",
        "age > 30 OR experience >= 5",
        "((age > 30 AND department = 'Sales') OR (age < 25 AND department = 'Marketing')) AND annual_salary > 50000",
        "(age > 30 AND annual_salary > 50000) OR (experience >= 5 AND city = 'Austin')",
    ];

    c.bench_function("rule_parsing_cold", |b| {
        b.iter(|| {
            for rule in &rules {
                let _ = black_box(parse(rule));
            }
        })
    });

    c.bench_function("rule_parsing_cached", |b| {
        // Warm up cache
        for rule in &rules {
            let _ = cache::get_or_parse(rule);
        }

        b.iter(|| {
            for rule in &rules {
                let _ = black_box(cache::get_or_parse(rule));
            }
        })
    });
}

fn benchmark_evaluation(c: &mut Criterion) {
    let record = sample_record();

    let simple = parse("age > 30").unwrap();
    c.bench_function("evaluate_operand", |b| {
        b.iter(|| black_box(evaluate(black_box(&simple), black_box(&record))))
    });

    let nested = parse(
        "((age > 30 AND department = 'Sales') OR (age < 25 AND department = 'Marketing')) AND annual_salary > 50000",
    )
    .unwrap();
    c.bench_function("evaluate_nested", |b| {
        b.iter(|| black_box(evaluate(black_box(&nested), black_box(&record))))
    });

    let wide = combined_tree(64);
    let mut wide_record = Record::new();
    for i in 0..64 {
        wide_record.insert(format!("field_{}", i), Value::Number(i as f64 + 1.0));
    }
    c.bench_function("evaluate_combined_64", |b| {
        b.iter(|| black_box(evaluate(black_box(&wide), black_box(&wide_record))))
    });
}

fn benchmark_evaluate_str(c: &mut Criterion) {
    let record = sample_record();
    let rule = "age > 30 AND annual_salary > 50000";

    // Warm up cache
    let _ = cache::evaluate_str(rule, &record);

    c.bench_function("evaluate_str_cached", |b| {
        b.iter(|| black_box(cache::evaluate_str(black_box(rule), black_box(&record))))
    });
}

criterion_group!(
    benches,
    benchmark_rule_parsing,
    benchmark_evaluation,
    benchmark_evaluate_str
);
criterion_main!(benches);
