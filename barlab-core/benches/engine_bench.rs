//! Criterion bench for the bar-by-bar event loop.

use barlab_core::domain::Bar;
use barlab_core::engine::{run_simulation, SimConfig};
use barlab_core::signal::{Signal, SignalStream};
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Deterministic oscillating price path: enough movement to trigger entries,
/// stops, and takes without any RNG in the bench.
fn make_bars(n: usize) -> Vec<Bar> {
    let base = NaiveDate::from_ymd_opt(2020, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    (0..n)
        .map(|i| {
            let t = i as f64;
            let close = 100.0 + 10.0 * (t / 17.0).sin() + 4.0 * (t / 5.0).cos();
            let open = 100.0 + 10.0 * ((t - 1.0) / 17.0).sin() + 4.0 * ((t - 1.0) / 5.0).cos();
            let high = open.max(close) * 1.012;
            let low = open.min(close) * 0.988;
            Bar {
                timestamp: base + chrono::Duration::hours(i as i64),
                open,
                high,
                low,
                close,
                volume: 1_000.0,
            }
        })
        .collect()
}

fn make_signals(n: usize) -> SignalStream {
    SignalStream::new(
        (0..n)
            .map(|i| match i % 13 {
                3 => Signal::Long,
                9 => Signal::Short,
                _ => Signal::Flat,
            })
            .collect(),
    )
}

fn bench_event_loop(c: &mut Criterion) {
    let bars = make_bars(10_000);
    let signals = make_signals(10_000);
    let config = SimConfig::new(100_000.0, 0.03, 0.06).with_costs(0.001, 0.003);

    c.bench_function("run_simulation_10k_bars", |b| {
        b.iter(|| {
            let result =
                run_simulation(black_box(&bars), black_box(&signals), black_box(&config)).unwrap();
            black_box(result.final_equity)
        })
    });
}

criterion_group!(benches, bench_event_loop);
criterion_main!(benches);
