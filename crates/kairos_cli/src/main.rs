use clap::{Parser, Subcommand};
use kairos_core::{export_outliers_with, reproduce_with, ConfigOverrides, DelaySampler, SobolPair};
use std::io::{self, Write};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Reproducible synthetic human reaction-time samples", long_about = None)]
struct Args {
    /// Starting index of the quasi-random sequence
    #[arg(long, default_value_t = 1)]
    seed_index: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw samples from one engine, printed as JSON lines
    Sample {
        /// Number of samples
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        /// Timestamp in epoch milliseconds (wall clock if omitted)
        #[arg(long)]
        timestamp: Option<f64>,
        #[arg(long)]
        text_len: Option<f64>,
        #[arg(long)]
        impulsivity: Option<f64>,
        #[arg(long)]
        age: Option<f64>,
        #[arg(long)]
        mood: Option<f64>,
        #[arg(long)]
        half_life: Option<f64>,
        #[arg(long)]
        ou_kappa: Option<f64>,
        #[arg(long)]
        ou_sigma: Option<f64>,
        #[arg(long)]
        gev_xi: Option<f64>,
    },
    /// The fixed-scenario reproduction run (timestamp 0 every call)
    Reproduce {
        #[arg(short = 'n', long, default_value_t = 1000)]
        count: usize,
    },
    /// Export rare samples: timestamps 0..n-1, keep logPDF below threshold
    Outliers {
        #[arg(short = 'n', long, default_value_t = 1000)]
        count: usize,
        #[arg(short, long, default_value_t = -10.0, allow_hyphen_values = true)]
        threshold: f64,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let seq = Arc::new(SobolPair::with_start(args.seed_index));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Sample {
            count,
            timestamp,
            text_len,
            impulsivity,
            age,
            mood,
            half_life,
            ou_kappa,
            ou_sigma,
            gev_xi,
        } => {
            let overrides = ConfigOverrides {
                text_len,
                impulsivity,
                age,
                mood,
                half_life,
                ou_kappa,
                ou_sigma,
                gev_xi,
            };
            let mut engine = DelaySampler::with_sequence(seq);
            for _ in 0..count {
                let s = engine.sample(timestamp, &overrides);
                writeln!(out, "{}", serde_json::to_string(&s)?)?;
            }
        }
        Command::Reproduce { count } => {
            info!(count, "running fixed-scenario reproduction");
            for s in reproduce_with(seq, count) {
                writeln!(out, "{}", serde_json::to_string(&s)?)?;
            }
        }
        Command::Outliers { count, threshold } => {
            let samples = export_outliers_with(seq, count, threshold);
            info!(kept = samples.len(), total = count, threshold, "outlier export");
            for s in samples {
                writeln!(out, "{}", serde_json::to_string(&s)?)?;
            }
        }
    }

    Ok(())
}
