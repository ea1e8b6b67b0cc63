use criterion::{black_box, criterion_group, criterion_main, Criterion};
use em410_rdl::{decode, encode};
use serde_json::json;

fn hex_to_bytes(hex: &str) -> Vec<u8> {
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
        .collect()
}

fn benchmark_decode(c: &mut Criterion) {
    // Periodic report: battery, temperature, distance, position
    let periodic = hex_to_bytes("0175640367100104829c01050000");
    // Three stored history samples
    let history = hex_to_bytes(&"20ce0066ee5fe8030f012c0111".repeat(3));

    c.bench_function("decode_periodic", |b| {
        b.iter(|| {
            let _ = black_box(decode(black_box(&periodic)));
        })
    });

    c.bench_function("decode_history", |b| {
        b.iter(|| {
            let _ = black_box(decode(black_box(&history)));
        })
    });
}

fn benchmark_encode(c: &mut Criterion) {
    let request = json!({
        "report_interval": 20,
        "timezone": 8,
        "distance_range": { "mode": 0, "min": 200, "max": 1000 },
        "retransmit_config": { "enable": 1, "interval": 60 },
        "fetch_history": { "start_time": 1609459200, "end_time": 1609545600 },
    });
    let request = request.as_object().cloned().unwrap_or_default();

    c.bench_function("encode_config", |b| {
        b.iter(|| {
            let _ = black_box(encode(black_box(&request)));
        })
    });
}

criterion_group!(benches, benchmark_decode, benchmark_encode);
criterion_main!(benches);
