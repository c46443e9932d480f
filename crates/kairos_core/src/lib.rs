//! # Kairos Core
//!
//! Synthetic human reaction-time sampling. Given a timestamp and a few
//! behavioral parameters (text length, impulsivity, age, mood), produces a
//! plausible click latency in milliseconds together with the log-likelihood
//! of the underlying noise draw — a parameterized, reproducible replacement
//! for fixed sleep values in test harnesses and simulation studies.
//!
//! The model composes several coupled processes:
//!
//! - a truncated-normal AR(1) innovation (**Kahneman/Ratcliff**-style trial
//!   to trial carry-over)
//! - two mean-reverting Ornstein–Uhlenbeck channels (noise scale and neural
//!   noise)
//! - a circadian alertness rhythm
//! - a cognitive-load penalty driven by stimulus length
//! - Bernoulli-gated attention lapses
//! - a heavy-tail correction via a GEV quantile transform
//!
//! All randomness comes from a deterministic two-dimensional low-discrepancy
//! sequence, so every output is reproducible from the sequence's starting
//! counter. Nothing here does I/O, suspends, or fails: invalid inputs are
//! clamped or substituted at every boundary.
//!
//! ```
//! use kairos_core::{ConfigOverrides, DelaySampler, SobolPair};
//! use std::sync::Arc;
//!
//! let mut sampler = DelaySampler::with_sequence(Arc::new(SobolPair::new()));
//! let s = sampler.sample(Some(0.0), &ConfigOverrides::default());
//! assert!((200..=2500).contains(&s.delay));
//! ```

mod batch;
mod config;
mod engine;
pub mod models;
mod sobol;
pub mod special;

pub use batch::{export_outliers, export_outliers_with, reproduce, reproduce_with};
pub use config::{normalize, ConfigOverrides, Diagnostic, SamplerConfig};
pub use engine::{DelaySampler, GeneratorState, Sample};
pub use sobol::{point_at, standard_normal, SobolPair};
