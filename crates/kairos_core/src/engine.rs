//! Delay-sampling engine
//!
//! The stateful core. Each engine owns three scalars of memory — the last
//! truncated-normal innovation ε, the last mean-reverting σ level, and the
//! last neural-noise value — which model temporal autocorrelation between
//! consecutive samples from the same instance. One `sample` call advances all
//! channels by one 100ms step and composes the sub-models into a single
//! delay plus the log-density of the innovation draw.

use std::sync::Arc;

use tracing::warn;

use crate::config::{normalize, ConfigOverrides};
use crate::models::{
    attention_lapse, baseline_delay, circadian, cognitive_penalty, cognitive_stage,
    heavy_tail_correction, ou_step,
};
use crate::sobol::{standard_normal, SobolPair};
use crate::special::normal_cdf;

/// AR(1) coefficient coupling consecutive innovations.
const EPSILON_RHO: f64 = 0.45;
/// Truncation bound of the innovation, in standard deviations.
const EPSILON_BOUND: f64 = 3.7;
/// Internal step length between samples, milliseconds.
const STEP_MS: f64 = 100.0;

/// The three scalars of per-engine memory.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct GeneratorState {
    /// Last innovation ε, in [-3.7, 3.7].
    pub last_epsilon: f64,
    /// Last neural-noise value (process-stable near 0).
    pub last_ou: f64,
    /// Last mean-reverting noise level (process-stable near 90).
    pub last_sigma: f64,
}

impl Default for GeneratorState {
    fn default() -> Self {
        Self {
            last_epsilon: 0.0,
            last_ou: 0.0,
            last_sigma: 90.0,
        }
    }
}

/// One sampling result: a click latency and the log-density of its
/// underlying innovation under the truncated-normal model.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Sample {
    /// Delay in whole milliseconds, in [200, 2500].
    pub delay: u32,
    /// Log-density of the ε draw; finite whenever σ > 0.
    pub log_pdf: f64,
}

/// Stateful reaction-time sampler.
///
/// Not internally synchronized: concurrent `sample` calls on one instance
/// need external serialization (the three-channel state update is not
/// atomic). Separate instances sharing the default sequence interleave their
/// quasi-random draws; pass an owned [`SobolPair`] via
/// [`DelaySampler::with_sequence`] for isolated, replayable runs.
#[derive(Debug)]
pub struct DelaySampler {
    seq: Arc<SobolPair>,
    state: GeneratorState,
}

impl DelaySampler {
    /// Engine on the process-wide shared sequence.
    pub fn new() -> Self {
        Self::with_sequence(SobolPair::shared())
    }

    /// Engine on a caller-owned sequence.
    pub fn with_sequence(seq: Arc<SobolPair>) -> Self {
        Self {
            seq,
            state: GeneratorState::default(),
        }
    }

    /// Current channel memory, for inspection and testing.
    pub fn state(&self) -> GeneratorState {
        self.state
    }

    /// Draw one reaction-time sample.
    ///
    /// `timestamp` is epoch milliseconds; `None` or a non-finite value falls
    /// back to the current wall clock. Overrides are merged onto the frozen
    /// defaults; discarded (non-finite) overrides are logged at `warn` and
    /// otherwise ignored. Never fails and never panics for finite input.
    pub fn sample(&mut self, timestamp: Option<f64>, overrides: &ConfigOverrides) -> Sample {
        let t = match timestamp {
            Some(v) if v.is_finite() => v,
            _ => chrono::Utc::now().timestamp_millis() as f64,
        };

        let (cfg, diags) = normalize(overrides);
        for d in &diags {
            warn!(field = d.field, supplied = d.supplied, "discarding non-finite override");
        }

        // Innovation channel: AR(1) with truncation.
        let z = standard_normal(&self.seq);
        let eps = (EPSILON_RHO * self.state.last_epsilon
            + (1.0 - EPSILON_RHO * EPSILON_RHO).sqrt() * z)
            .clamp(-EPSILON_BOUND, EPSILON_BOUND);
        self.state.last_epsilon = eps;

        // σ channel: mean-reverting around 90.
        let sigma = ou_step(self.state.last_sigma, STEP_MS, 0.5, 90.0, 4.0, &self.seq);
        self.state.last_sigma = sigma;

        let base = 520.0
            + baseline_delay(t, cfg.impulsivity, cfg.age, cfg.mood, cfg.half_life, &self.seq);
        let tail = heavy_tail_correction(eps, sigma, cfg.gev_xi);
        let bio = circadian(t);
        let cog = cognitive_penalty(cognitive_stage(cfg.text_len));

        // Neural-noise channel: zero-mean mean reversion.
        let ou = ou_step(self.state.last_ou, STEP_MS, cfg.ou_kappa, 0.0, cfg.ou_sigma, &self.seq);
        self.state.last_ou = ou;

        let dist = attention_lapse(STEP_MS, &self.seq);

        let total = base + sigma * eps + bio + cog + ou + dist + tail;
        debug_assert!(total.is_finite());
        let delay = total.clamp(200.0, 2500.0).round() as u32;

        let trunc_mass = normal_cdf(EPSILON_BOUND) - normal_cdf(-EPSILON_BOUND);
        let log_pdf = -0.5 * (eps * eps + std::f64::consts::TAU.ln())
            - sigma.ln()
            - trunc_mass.ln();

        Sample { delay, log_pdf }
    }
}

impl Default for DelaySampler {
    fn default() -> Self {
        Self::new()
    }
}
