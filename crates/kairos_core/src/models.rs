//! Physiological sub-models
//!
//! The building blocks the sampling engine composes into one delay:
//!
//! - **Circadian modulation**: sinusoidal alertness rhythm over the 24h day
//! - **Cognitive stage/penalty**: Hick–Hyman-style reading-load classifier
//! - **Mean-reverting step**: discrete-time Ornstein–Uhlenbeck recursion,
//!   shared by the σ channel and the neural-noise channel
//! - **Attention lapse**: Bernoulli-gated, exponentially-distributed
//!   distraction events
//! - **Baseline delay (PAEE)**: impulsivity/age/mood/environment offsets
//! - **Heavy-tail correction**: truncated-normal draw reshaped through a
//!   GEV quantile transform
//!
//! Every function here is pure in its explicit inputs plus the sequence
//! points it consumes; all state lives in the engine.

use crate::sobol::{standard_normal, SobolPair};
use crate::special::{gev_quantile, normal_cdf};

/// Milliseconds in a day.
const DAY_MS: f64 = 86_400_000.0;

/// Circadian modulation of alertness, in milliseconds of delay offset.
///
/// Periodic with period 24h: a dominant diurnal harmonic plus a smaller
/// semidiurnal one (the post-lunch dip).
pub fn circadian(t: f64) -> f64 {
    let phi = ((t / DAY_MS) % 1.0 + 1.0) % 1.0;
    let tau = std::f64::consts::TAU;
    12.0 * (tau * phi).sin() + 2.0 * (2.0 * tau * phi).sin()
}

/// Cognitive processing stage for a stimulus of `text_len` characters.
///
/// Reading time grows logarithmically with length; the Weibull-shaped
/// completion probability is quantized into four stages, 0 (barely read)
/// through 3 (fully processed).
pub fn cognitive_stage(text_len: f64) -> u8 {
    let rt = 80.0 * (1.0 + text_len.max(0.0)).ln();
    let p = 1.0 - (-(rt / 120.0).powf(1.5)).exp();
    ((4.0 * p).floor() as i64).clamp(0, 3) as u8
}

/// Delay penalty for incomplete cognitive processing: 300ms at stage 0,
/// linearly down to 0 at stage 3.
pub fn cognitive_penalty(stage: u8) -> f64 {
    300.0 * f64::from(3u8.saturating_sub(stage)) / 3.0
}

/// One discrete step of a mean-reverting (Ornstein–Uhlenbeck) process.
///
/// Exact discretization over `dt_ms`: α = exp(−κ·Δt/1000), new value is
/// `last·α + mean·(1−α) + diffusion·√(1−α²)·Z` with Z standard normal.
/// Used with (κ=0.5, μ=90, s=4) for the σ channel and
/// (κ=ou_kappa, μ=0, s=ou_sigma) for the neural-noise channel.
pub fn ou_step(last: f64, dt_ms: f64, kappa: f64, mean: f64, diffusion: f64, seq: &SobolPair) -> f64 {
    let z = standard_normal(seq);
    let alpha = (-kappa * dt_ms / 1000.0).exp();
    last * alpha + mean * (1.0 - alpha) + diffusion * (1.0 - alpha * alpha).sqrt() * z
}

/// Attention-lapse duration within a window of `dt_ms`.
///
/// A time-dependent Bernoulli gate (rate 1/120s) decides whether a lapse
/// occurs; if it does, its duration is exponentially distributed with mean
/// 120ms, capped at the window length. Returns 0 when no lapse fires.
pub fn attention_lapse(dt_ms: f64, seq: &SobolPair) -> f64 {
    let (u, u2) = seq.next_point();
    if u < 1.0 - (-dt_ms / 120_000.0).exp() {
        let duration = -u2.max(1e-300).ln() * 120.0;
        duration.min(dt_ms)
    } else {
        0.0
    }
}

/// Baseline delay (PAEE): person- and environment-dependent offsets.
///
/// Impulsive users commit earlier, ages past 30 slow down linearly, mood
/// shifts the baseline either way, and an environment term decays
/// hyperbolically with the timestamp on the configured half-life.
pub fn baseline_delay(
    t: f64,
    impulsivity: f64,
    age: f64,
    mood: f64,
    half_life: f64,
    seq: &SobolPair,
) -> f64 {
    let (u, _) = seq.next_point();
    let impulse = 0.30 - 0.20 * impulsivity;
    let age_slowdown = (age - 30.0).max(0.0) * 0.12;
    let mood_factor = 1.0 + 0.10 * mood;
    let mut env = u * half_life / (t + half_life);
    if !env.is_finite() {
        env = 0.0;
    }
    let env = env.max(0.0);
    impulse * 100.0 - age_slowdown + 520.0 * (mood_factor - 1.0) + env
}

/// Heavy-tail correction: reshape a truncated-normal innovation through the
/// GEV quantile so rare draws land in a longer tail.
///
/// Capped at 300ms. Returns exactly 0 for a negative σ or any non-finite
/// input rather than letting garbage propagate.
pub fn heavy_tail_correction(eps: f64, sigma: f64, xi: f64) -> f64 {
    if !eps.is_finite() || !sigma.is_finite() || sigma < 0.0 {
        return 0.0;
    }
    let trunc = eps.clamp(-3.7, 3.7);
    let reshaped = gev_quantile(normal_cdf(trunc), xi, 0.0, 1.0);
    (sigma * (reshaped - trunc)).min(300.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_circadian_periodicity() {
        for t in [0.0, 12_345.0, 5e9, -3.7e8] {
            let a = circadian(t);
            let b = circadian(t + DAY_MS);
            assert!((a - b).abs() < 1e-6, "period broken at t={t}");
        }
    }

    #[test]
    fn test_circadian_bounded() {
        for i in 0..2400 {
            let v = circadian(i as f64 * 36_000.0);
            assert!(v.abs() <= 14.0);
        }
    }

    #[test]
    fn test_cognitive_stage_bounds_and_known_points() {
        assert_eq!(cognitive_stage(0.0), 0);
        assert_eq!(cognitive_stage(12.0), 3);
        assert_eq!(cognitive_stage(-5.0), 0); // negative lengths treated as empty
    }

    #[test]
    fn test_cognitive_penalty_linear() {
        assert_eq!(cognitive_penalty(0), 300.0);
        assert_eq!(cognitive_penalty(1), 200.0);
        assert_eq!(cognitive_penalty(2), 100.0);
        assert_eq!(cognitive_penalty(3), 0.0);
    }

    #[test]
    fn test_ou_step_reverts_to_mean() {
        let seq = SobolPair::new();
        let mut v = 0.0;
        for _ in 0..500 {
            v = ou_step(v, 100.0, 0.5, 90.0, 4.0, &seq);
        }
        assert!((v - 90.0).abs() < 30.0, "σ channel drifted to {v}");
    }

    #[test]
    fn test_ou_step_zero_kappa_is_random_walk_free() {
        // κ=0 → α=1 → the step keeps the previous value exactly
        let seq = SobolPair::new();
        let v = ou_step(42.0, 100.0, 0.0, 90.0, 4.0, &seq);
        assert_eq!(v, 42.0);
    }

    #[test]
    fn test_attention_lapse_within_window() {
        let seq = SobolPair::new();
        for _ in 0..5000 {
            let d = attention_lapse(100.0, &seq);
            assert!((0.0..=100.0).contains(&d));
        }
    }

    #[test]
    fn test_heavy_tail_guards() {
        assert_eq!(heavy_tail_correction(f64::NAN, 50.0, 0.10), 0.0);
        assert_eq!(heavy_tail_correction(1.0, f64::INFINITY, 0.10), 0.0);
        assert_eq!(heavy_tail_correction(1.0, -0.001, 0.10), 0.0);
    }

    #[test]
    fn test_baseline_delay_components() {
        let seq = SobolPair::new();
        // age below 30 contributes no slowdown; mood 0 contributes nothing
        let v = baseline_delay(0.0, 0.5, 25.0, 0.0, 30_000.0, &seq);
        // impulse term is 20, env ∈ [0,1) at t=0 with u ∈ [0,1)
        assert!(v >= 20.0 && v < 21.0, "unexpected baseline {v}");
    }

    proptest! {
        #[test]
        fn prop_heavy_tail_capped(eps in -10.0f64..10.0, sigma in 0.0f64..1000.0) {
            prop_assert!(heavy_tail_correction(eps, sigma, 0.10) <= 300.0);
        }

        #[test]
        fn prop_cognitive_stage_monotone(a in 0.0f64..1e6, b in 0.0f64..1e6) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(cognitive_stage(lo) <= cognitive_stage(hi));
            prop_assert!(cognitive_stage(hi) <= 3);
        }

        #[test]
        fn prop_circadian_periodic(t in -1e12f64..1e12) {
            let a = circadian(t);
            let b = circadian(t + DAY_MS);
            prop_assert!((a - b).abs() < 1e-4);
        }
    }
}
