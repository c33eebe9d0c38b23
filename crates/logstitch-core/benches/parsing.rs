//! Benchmark for classification and assembly
//! Run: cargo bench -p logstitch-core --bench parsing

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use logstitch_core::assembler::assemble;
use logstitch_core::parser::{parse_access_log, parse_application_log, FormatClassifier};
use logstitch_core::LineAssembler;
use std::hint::black_box;

// Sample log lines for benchmarking
const ACCESS_LOG: &str = r#"192.168.1.50 - alice [10/Feb/2026:14:30:45 +0000] "GET /api/users/123 HTTP/1.1" 500 1234 "-" "Mozilla/5.0""#;
const APPLICATION_LOG: &str = "2026-02-10 14:30:45.123 - WARN - Disk space is running low (7% remaining).";
const FRAME_LOG: &str = r#"  File "routes.js", line 120, in handle_payment"#;
const UNKNOWN_LOG: &str = "Feb 10 14:30:45 server-01 sshd[12345]: Failed password for invalid user admin";

fn bench_classifier(c: &mut Criterion) {
    let classifier = FormatClassifier::new();

    let mut group = c.benchmark_group("classify");

    group.bench_function("access", |b| b.iter(|| classifier.classify(black_box(ACCESS_LOG))));
    group.bench_function("application", |b| {
        b.iter(|| classifier.classify(black_box(APPLICATION_LOG)))
    });
    group.bench_function("continuation", |b| b.iter(|| classifier.classify(black_box(FRAME_LOG))));
    group.bench_function("unknown", |b| b.iter(|| classifier.classify(black_box(UNKNOWN_LOG))));

    group.finish();
}

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    group.bench_function("access_fields", |b| b.iter(|| parse_access_log(black_box(ACCESS_LOG))));
    group.bench_function("application_fields", |b| {
        b.iter(|| parse_application_log(black_box(APPLICATION_LOG)))
    });

    group.finish();
}

fn bench_single_line_assembly(c: &mut Criterion) {
    c.bench_function("assemble_access_line", |b| {
        let mut assembler = LineAssembler::new();
        b.iter(|| assembler.process_line(black_box(ACCESS_LOG), "bench"))
    });
}

fn bench_batch_assembly(c: &mut Criterion) {
    // Generate batch of logs: access lines with an error + traceback every tenth entry
    let batch_sizes = [10, 100, 1000, 10000];

    let mut group = c.benchmark_group("batch_assembly");

    for size in batch_sizes {
        let mut logs: Vec<String> = Vec::with_capacity(size * 2);
        for i in 0..size {
            if i % 10 == 0 {
                logs.push(format!("2026-02-10 14:30:45.{:03} - ERROR - ", i % 1000));
                logs.push("Traceback (most recent call last):".to_string());
                logs.push(format!(r#"  File "main.go", line {}, in main"#, i));
                logs.push("    connect_db()".to_string());
            } else {
                logs.push(format!(
                    r#"192.168.1.{} - user{} [10/Feb/2026:14:30:45 +0000] "GET /api/test/{} HTTP/1.1" 200 1234 "-" "Mozilla/5.0""#,
                    i % 255, i, i
                ));
            }
        }

        group.throughput(Throughput::Elements(logs.len() as u64));
        group.bench_with_input(BenchmarkId::new("mixed", size), &logs, |b, logs| {
            b.iter(|| assemble(logs.iter().map(String::as_str), "bench"))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_classifier,
    bench_extraction,
    bench_single_line_assembly,
    bench_batch_assembly,
);

criterion_main!(benches);
