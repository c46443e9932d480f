//! Batch utilities
//!
//! Thin drivers over [`DelaySampler::sample`]: the fixed-scenario
//! reproduction run and the rare-sample (outlier) export. Both construct a
//! fresh engine so results depend only on the sequence's starting index.

use std::sync::Arc;

use crate::config::ConfigOverrides;
use crate::engine::{DelaySampler, Sample};
use crate::sobol::SobolPair;

/// The fixed scenario: a 25-year-old, mid-impulsivity user reading a
/// 12-character stimulus.
fn scenario() -> ConfigOverrides {
    ConfigOverrides {
        age: Some(25.0),
        impulsivity: Some(0.5),
        text_len: Some(12.0),
        ..Default::default()
    }
}

/// `n` samples at the *same* fixed timestamp 0.
///
/// The repeated timestamp is intentional: all variation comes from the
/// engine's internal state advancement, which is the published reproduction
/// methodology.
pub fn reproduce(n: usize) -> Vec<Sample> {
    reproduce_with(SobolPair::shared(), n)
}

/// [`reproduce`] on a caller-owned sequence, for isolated runs.
pub fn reproduce_with(seq: Arc<SobolPair>, n: usize) -> Vec<Sample> {
    let mut engine = DelaySampler::with_sequence(seq);
    let over = scenario();
    (0..n).map(|_| engine.sample(Some(0.0), &over)).collect()
}

/// Samples at timestamps 0..n−1, keeping only those whose innovation
/// log-density falls below `threshold`.
pub fn export_outliers(n: usize, threshold: f64) -> Vec<Sample> {
    export_outliers_with(SobolPair::shared(), n, threshold)
}

/// [`export_outliers`] on a caller-owned sequence.
pub fn export_outliers_with(seq: Arc<SobolPair>, n: usize, threshold: f64) -> Vec<Sample> {
    let mut engine = DelaySampler::with_sequence(seq);
    let over = scenario();
    (0..n)
        .map(|i| engine.sample(Some(i as f64), &over))
        .filter(|s| s.log_pdf < threshold)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproduce_shape() {
        let out = reproduce_with(Arc::new(SobolPair::with_start(1)), 1000);
        assert_eq!(out.len(), 1000);
        for s in &out {
            assert!((200..=2500).contains(&s.delay));
            assert!(s.log_pdf.is_finite());
        }
    }

    #[test]
    fn test_reproduce_is_reproducible() {
        let a = reproduce_with(Arc::new(SobolPair::with_start(1)), 100);
        let b = reproduce_with(Arc::new(SobolPair::with_start(1)), 100);
        assert_eq!(a, b);
    }

    #[test]
    fn test_export_outliers_filters_by_threshold() {
        let out = export_outliers_with(Arc::new(SobolPair::with_start(1)), 1000, -10.0);
        assert!(out.len() <= 1000);
        for s in &out {
            assert!(s.log_pdf < -10.0);
            assert!((200..=2500).contains(&s.delay));
        }
    }

    #[test]
    fn test_export_outliers_infinite_threshold_keeps_all() {
        let out = export_outliers_with(Arc::new(SobolPair::with_start(1)), 50, f64::INFINITY);
        assert_eq!(out.len(), 50);
    }
}
