//! Sampler configuration
//!
//! Frozen defaults, caller overrides, and the normalizer that merges the two.
//! Normalization never fails: a non-finite override falls back to the default
//! (with a structured diagnostic the caller can log or drop), and every field
//! is clamped into its physiological range.

use serde::{Deserialize, Serialize};

/// Behavioral parameters of one sampling call. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Stimulus text length in characters (≥ 0).
    pub text_len: f64,
    /// Impulsivity of the simulated user, 0 (deliberate) to 1 (impulsive).
    pub impulsivity: f64,
    /// Age in years, clamped to [18, 70].
    pub age: f64,
    /// Mood, -2 (low) to +2 (elevated).
    pub mood: f64,
    /// Half-life of the environment term in milliseconds (≥ 1).
    pub half_life: f64,
    /// Mean-reversion rate of the neural-noise channel (≥ 0.01).
    pub ou_kappa: f64,
    /// Diffusion of the neural-noise channel (≥ 0.01).
    pub ou_sigma: f64,
    /// GEV shape parameter for the heavy-tail correction, [-0.5, 0.5].
    pub gev_xi: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            text_len: 12.0,
            impulsivity: 0.5,
            age: 30.0,
            mood: 0.0,
            half_life: 30_000.0,
            ou_kappa: 0.3,
            ou_sigma: 5.0,
            gev_xi: 0.10,
        }
    }
}

/// Partial overrides supplied by the caller; `None` keeps the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    pub text_len: Option<f64>,
    pub impulsivity: Option<f64>,
    pub age: Option<f64>,
    pub mood: Option<f64>,
    pub half_life: Option<f64>,
    pub ou_kappa: Option<f64>,
    pub ou_sigma: Option<f64>,
    pub gev_xi: Option<f64>,
}

/// A rejected override: the supplied value was not a finite number, so the
/// default was kept. Non-fatal; the engine forwards these to `tracing::warn!`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Diagnostic {
    pub field: &'static str,
    pub supplied: f64,
}

fn merge(field: &'static str, default: f64, over: Option<f64>, diags: &mut Vec<Diagnostic>) -> f64 {
    match over {
        Some(v) if v.is_finite() => v,
        Some(v) => {
            diags.push(Diagnostic { field, supplied: v });
            default
        }
        None => default,
    }
}

/// Merge overrides onto the frozen defaults and clamp every field into range.
///
/// Always returns a valid configuration; the diagnostics list records any
/// override that was discarded for being non-finite.
pub fn normalize(overrides: &ConfigOverrides) -> (SamplerConfig, Vec<Diagnostic>) {
    let d = SamplerConfig::default();
    let mut diags = Vec::new();

    let cfg = SamplerConfig {
        text_len: merge("text_len", d.text_len, overrides.text_len, &mut diags).max(0.0),
        impulsivity: merge("impulsivity", d.impulsivity, overrides.impulsivity, &mut diags)
            .clamp(0.0, 1.0),
        age: merge("age", d.age, overrides.age, &mut diags).clamp(18.0, 70.0),
        mood: merge("mood", d.mood, overrides.mood, &mut diags).clamp(-2.0, 2.0),
        half_life: merge("half_life", d.half_life, overrides.half_life, &mut diags).max(1.0),
        ou_kappa: merge("ou_kappa", d.ou_kappa, overrides.ou_kappa, &mut diags).max(0.01),
        ou_sigma: merge("ou_sigma", d.ou_sigma, overrides.ou_sigma, &mut diags).max(0.01),
        gev_xi: merge("gev_xi", d.gev_xi, overrides.gev_xi, &mut diags).clamp(-0.5, 0.5),
    };

    (cfg, diags)
}
