//! Seeded synthetic data — deterministic random-walk bars and sparse signal
//! streams for demos, benches, and tests.

use barlab_core::domain::Bar;
use barlab_core::signal::{Signal, SignalStream};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random-walk bar series. Same seed, same series.
pub fn synthetic_bars(n: usize, start_price: f64, seed: u64) -> Vec<Bar> {
    let mut rng = StdRng::seed_from_u64(seed);
    let base = NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let mut prev_close = start_price;
    (0..n)
        .map(|i| {
            let open = prev_close;
            let ret: f64 = rng.gen_range(-0.02..0.02);
            let close = (open * (1.0 + ret)).max(0.01);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
            let volume = rng.gen_range(500.0..5_000.0);
            prev_close = close;
            Bar {
                timestamp: base + chrono::Duration::hours(i as i64),
                open,
                high,
                low,
                close,
                volume,
            }
        })
        .collect()
}

/// Sparse signal stream: the first `warmup` bars are undefined (gaps), the
/// rest are mostly flat with occasional long/short instructions.
pub fn synthetic_signals(n: usize, warmup: usize, seed: u64) -> SignalStream {
    let mut rng = StdRng::seed_from_u64(seed);
    let raw: Vec<Option<Signal>> = (0..n)
        .map(|i| {
            if i < warmup {
                None
            } else {
                Some(match rng.gen_range(0..10) {
                    0 => Signal::Long,
                    1 => Signal::Short,
                    _ => Signal::Flat,
                })
            }
        })
        .collect();
    SignalStream::from_sparse(&raw)
}
