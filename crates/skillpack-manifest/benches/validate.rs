use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use skillpack_manifest::validate_manifest;

fn manifest(extra_fields: usize) -> String {
    let mut content = String::from("---\nname: bench-skill\ndescription: Benchmark manifest\n");
    for i in 0..extra_fields {
        content.push_str(&format!("field-{i}: value {i}\n"));
    }
    content.push_str("---\n# Body\n");
    content.push_str(&"Lorem ipsum dolor sit amet.\n".repeat(200));
    content
}

fn validate_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_manifest");

    for fields in [0, 10, 100] {
        let content = manifest(fields);
        group.bench_with_input(BenchmarkId::new("extra_fields", fields), &fields, |bench, _| {
            bench.iter(|| validate_manifest(black_box(&content)));
        });
    }

    group.finish();
}

criterion_group!(benches, validate_bench);
criterion_main!(benches);
