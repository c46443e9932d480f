//! Low-discrepancy sequence generation
//!
//! The only source of "randomness" in the sampler. A single monotonically
//! increasing counter drives a two-dimensional Sobol'-style construction, so
//! every downstream draw is reproducible from the counter's starting value.
//! No OS entropy is ever consulted.

use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Direction vector for the first coordinate (van der Corput radical inverse).
const DIR_X: u32 = 0x8000_0000;
/// Direction vector for the second coordinate.
const DIR_Y: u32 = 0xC000_0000;

static SHARED: Lazy<Arc<SobolPair>> = Lazy::new(|| Arc::new(SobolPair::new()));

/// Deterministic 2D point generator.
///
/// Each call to [`SobolPair::next_point`] consumes one counter index and
/// yields one point in `[0,1)²`. The counter is atomic so concurrent draws
/// stay unique, but the *order* in which concurrent callers observe points is
/// up to them to serialize — interleaved draws are a reproducibility hazard,
/// not a memory-safety one.
#[derive(Debug)]
pub struct SobolPair {
    counter: AtomicU64,
}

impl SobolPair {
    /// Fresh generator starting at index 1.
    ///
    /// Index 0 maps to the degenerate point (0, 0), which Box–Muller cannot
    /// use, so the counter skips it.
    pub fn new() -> Self {
        Self::with_start(1)
    }

    /// Fresh generator starting at an arbitrary index.
    pub fn with_start(index: u64) -> Self {
        Self {
            counter: AtomicU64::new(index),
        }
    }

    /// Process-wide shared generator.
    ///
    /// Two engines sampling interleaved on this instance will draw different
    /// underlying points — deliberate: reproducibility is defined over the
    /// whole process's draw order. Use [`SobolPair::with_start`] plus
    /// [`crate::DelaySampler::with_sequence`] for isolated, replayable runs.
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// Current counter value (the index the *next* draw will consume).
    pub fn index(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    /// Draw the next 2D point in `[0,1)²`.
    pub fn next_point(&self) -> (f64, f64) {
        let i = self.counter.fetch_add(1, Ordering::SeqCst);
        point_at(i)
    }
}

impl Default for SobolPair {
    fn default() -> Self {
        Self::new()
    }
}

/// The point for a given counter index, as a pure function.
///
/// The index is interpreted as a 31-bit integer; each set bit XORs the
/// per-bit-shifted direction vectors into two 32-bit accumulators. This bit
/// pattern is a conformance contract: it must match any other implementation
/// of the sampler bit for bit.
pub fn point_at(index: u64) -> (f64, f64) {
    let i = (index & 0x7fff_ffff) as u32;
    let mut x: u32 = 0;
    let mut y: u32 = 0;
    for k in 0..31 {
        if (i >> k) & 1 == 1 {
            x ^= DIR_X >> k;
            y ^= DIR_Y >> k;
        }
    }
    let scale = 1.0 / 4_294_967_296.0; // 2^-32
    (f64::from(x) * scale, f64::from(y) * scale)
}

/// One standard-normal draw via Box–Muller from a single sequence point.
///
/// The first coordinate is kept away from zero so `ln` stays finite.
pub fn standard_normal(seq: &SobolPair) -> f64 {
    let (u1, u2) = seq.next_point();
    let r = (-2.0 * u1.max(1e-300).ln()).sqrt();
    r * (std::f64::consts::TAU * u2).cos()
}
