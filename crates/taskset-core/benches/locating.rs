use criterion::{black_box, criterion_group, criterion_main, Criterion};

use taskset_core::expression::{locate, parse_expression};

fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");

    let plain = "B) Redegør for måden du løste delspørgsmål `A` på";
    let single = "A) Løs følgende: \\[100..500]\\x + 2 = 5";
    let many = {
        let mut s = String::new();
        for i in 0..50 {
            s.push_str(&format!("term {i}: \\[NZ-{i}..{i}]\\, "));
        }
        s
    };

    group.bench_function("plain", |b| b.iter(|| locate(black_box(plain))));
    group.bench_function("single", |b| b.iter(|| locate(black_box(single))));
    group.bench_function("many", |b| b.iter(|| locate(black_box(&many))));

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_expression");

    group.bench_function("range", |b| {
        b.iter(|| parse_expression(black_box("NZQ-12.5..99.75")))
    });
    group.bench_function("list", |b| {
        b.iter(|| parse_expression(black_box("-1, 0.5, 4.2, 8, 16, 32")))
    });

    group.finish();
}

criterion_group!(benches, bench_locate, bench_parse);
criterion_main!(benches);
