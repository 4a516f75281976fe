//! EquitySnapshot — one mark-to-market account value per bar.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Single point in the equity curve. Emitted once per input bar, in bar
/// order, whether or not a position is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquitySnapshot {
    pub timestamp: NaiveDateTime,
    pub equity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn snapshot_serialization_roundtrip() {
        let snap = EquitySnapshot {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            equity: 100_000.0,
        };
        let json = serde_json::to_string(&snap).unwrap();
        let deser: EquitySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, deser);
    }
}
