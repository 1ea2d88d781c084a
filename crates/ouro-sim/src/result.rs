//! Execution results.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Histogram of measured bitstrings.
pub type Counts = FxHashMap<String, u64>;

/// The outcome of running a circuit on a backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Bitstring histogram over the circuit's output labels.
    pub counts: Counts,
    /// Number of shots executed.
    pub shots: u32,
}

impl ExecutionResult {
    /// Create a result from counts and shot count.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self { counts, shots }
    }

    /// Relative frequency of a bitstring.
    pub fn frequency(&self, bitstring: &str) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        *self.counts.get(bitstring).unwrap_or(&0) as f64 / f64::from(self.shots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency() {
        let mut counts = Counts::default();
        counts.insert("00".into(), 750);
        counts.insert("11".into(), 250);
        let result = ExecutionResult::new(counts, 1000);
        assert!((result.frequency("00") - 0.75).abs() < 1e-12);
        assert_eq!(result.frequency("01"), 0.0);
    }
}
