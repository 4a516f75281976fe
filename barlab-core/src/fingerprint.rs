//! Run fingerprinting — content hashes that identify a simulation's inputs.
//!
//! Two runs with the same fingerprint saw byte-identical configuration and
//! data, so their outputs must match exactly. Sweep drivers use the hashes
//! for deduplication; audits use them to pin a result to its inputs.

use crate::domain::Bar;
use crate::engine::SimConfig;
use crate::signal::{Signal, SignalStream};
use serde::{Deserialize, Serialize};

/// Content hashes for one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunFingerprint {
    /// Hash of the configuration alone.
    pub config_hash: String,
    /// Hash of the bar series and signal stream.
    pub dataset_hash: String,
    /// Hash of config + dataset: the run's identity.
    pub run_hash: String,
}

impl RunFingerprint {
    pub fn compute(config: &SimConfig, bars: &[Bar], signals: &SignalStream) -> Self {
        let config_hash = hash_config(config);
        let dataset_hash = hash_dataset(bars, signals);

        let mut hasher = blake3::Hasher::new();
        hasher.update(config_hash.as_bytes());
        hasher.update(dataset_hash.as_bytes());
        let run_hash = hasher.finalize().to_hex().to_string();

        Self {
            config_hash,
            dataset_hash,
            run_hash,
        }
    }
}

fn hash_config(config: &SimConfig) -> String {
    // Struct field order is fixed, so the JSON encoding is canonical.
    let json = serde_json::to_string(config).expect("SimConfig must serialize");
    blake3::hash(json.as_bytes()).to_hex().to_string()
}

fn hash_dataset(bars: &[Bar], signals: &SignalStream) -> String {
    let mut hasher = blake3::Hasher::new();
    for bar in bars {
        hasher.update(&bar.timestamp.and_utc().timestamp().to_le_bytes());
        hasher.update(&bar.open.to_le_bytes());
        hasher.update(&bar.high.to_le_bytes());
        hasher.update(&bar.low.to_le_bytes());
        hasher.update(&bar.close.to_le_bytes());
        hasher.update(&bar.volume.to_le_bytes());
    }
    for &signal in signals.signals() {
        let byte: u8 = match signal {
            Signal::Long => 1,
            Signal::Short => 2,
            Signal::Flat => 0,
        };
        hasher.update(&[byte]);
    }
    hasher.finalize().to_hex().to_string()
}
