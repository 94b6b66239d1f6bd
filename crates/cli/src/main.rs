//! # anomaly-stream
//!
//! Command-line driver for windowed anomaly detection. Pulls observations
//! from a synthetic generator or a recorded series, evaluates each against
//! the trailing window and writes one JSON verdict per line.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anomaly::{AlertSink, EvaluatorConfig, RunSummary, StreamEvaluator, SyntheticSource};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod input;
mod output;

use input::load_data;
use output::JsonLinesSink;

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "anomaly-stream")]
#[command(
    about = "Flag outliers in a numeric stream with z-score and MAD detectors",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a synthetic noisy sine wave with injected spikes
    Simulate {
        /// Number of observations to evaluate
        #[arg(short = 'n', long, default_value = "500")]
        steps: usize,

        /// RNG seed for a reproducible stream
        #[arg(long)]
        seed: Option<u64>,

        /// Pause between observations in milliseconds
        #[arg(long, default_value = "0")]
        delay_ms: u64,

        #[command(flatten)]
        detection: DetectionArgs,
    },

    /// Evaluate a recorded series from a CSV or JSON file
    Replay {
        /// Input file (CSV or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Column name or index holding the values
        #[arg(short, long)]
        column: Option<String>,

        #[command(flatten)]
        detection: DetectionArgs,
    },
}

#[derive(Args)]
struct DetectionArgs {
    /// JSON evaluator configuration; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Trailing window size [default: 30]
    #[arg(short, long)]
    window_size: Option<usize>,

    /// Two-sided z-score threshold [default: 2.0]
    #[arg(short, long)]
    z_threshold: Option<f64>,

    /// One-sided MAD score threshold [default: 3.0]
    #[arg(short, long)]
    mad_threshold: Option<f64>,

    /// Output file for JSON-lines verdicts (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only write verdicts flagged as anomalous
    #[arg(long)]
    anomalies_only: bool,
}

impl DetectionArgs {
    /// Resolve the evaluator configuration: defaults, then file, then flags.
    fn evaluator_config(&self) -> CliResult<EvaluatorConfig> {
        let base = match &self.config {
            Some(path) => read_config(path)?,
            None => EvaluatorConfig::default(),
        };
        let config = apply_overrides(
            base,
            self.window_size,
            self.z_threshold,
            self.mad_threshold,
        );
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }

    fn writer(&self) -> CliResult<Box<dyn Write>> {
        match &self.output {
            Some(path) => {
                let file =
                    File::create(path).map_err(|e| format!("Failed to create output: {}", e))?;
                Ok(Box::new(BufWriter::new(file)))
            }
            None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
        }
    }
}

fn read_config(path: &Path) -> CliResult<EvaluatorConfig> {
    let text = fs::read_to_string(path).map_err(|e| format!("Failed to read config: {}", e))?;
    EvaluatorConfig::from_json_str(&text).map_err(|e| e.to_string())
}

fn apply_overrides(
    mut config: EvaluatorConfig,
    window_size: Option<usize>,
    z_threshold: Option<f64>,
    mad_threshold: Option<f64>,
) -> EvaluatorConfig {
    if let Some(size) = window_size {
        config.window_size = size;
    }
    if let Some(threshold) = z_threshold {
        config.zscore.threshold = threshold;
    }
    if let Some(threshold) = mad_threshold {
        config.mad.threshold = threshold;
    }
    config
}

/// Sleeps before yielding each value; pacing stays outside the evaluator.
struct Paced<I> {
    inner: I,
    delay: Duration,
}

impl<I: Iterator<Item = f64>> Iterator for Paced<I> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.inner.next()
    }
}

fn evaluate<I>(
    source: I,
    limit: Option<usize>,
    detection: &DetectionArgs,
) -> CliResult<RunSummary>
where
    I: Iterator<Item = f64>,
{
    let config = detection.evaluator_config()?;
    let mut evaluator = StreamEvaluator::new(config).map_err(|e| e.to_string())?;

    let mut source = source;
    let mut sink = AlertSink::new(JsonLinesSink::new(
        detection.writer()?,
        detection.anomalies_only,
    ));
    let summary = evaluator
        .run(&mut source, &mut sink, limit)
        .map_err(|e| e.to_string())?;

    let (mut lines, alerts) = sink.into_parts();
    lines.flush().map_err(|e| e.to_string())?;
    info!(alerts = alerts.len(), "alerts raised");
    Ok(summary)
}

fn run_simulate(
    steps: usize,
    seed: Option<u64>,
    delay_ms: u64,
    detection: DetectionArgs,
) -> CliResult<RunSummary> {
    let source = match seed {
        Some(seed) => SyntheticSource::new(seed),
        None => SyntheticSource::from_entropy(),
    };
    info!(steps, seed = ?seed, "simulating synthetic stream");

    let paced = Paced {
        inner: source,
        delay: Duration::from_millis(delay_ms),
    };
    evaluate(paced, Some(steps), &detection)
}

fn run_replay(
    input: PathBuf,
    column: Option<String>,
    detection: DetectionArgs,
) -> CliResult<RunSummary> {
    let data = load_data(&input, column.as_deref())?;
    info!(points = data.len(), input = %input.display(), "loaded series");
    evaluate(data.into_iter(), None, &detection)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anomaly_stream=info,anomaly_core=info".into()),
        )
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            steps,
            seed,
            delay_ms,
            detection,
        } => run_simulate(steps, seed, delay_ms, detection),

        Commands::Replay {
            input,
            column,
            detection,
        } => run_replay(input, column, detection),
    };

    match result {
        Ok(summary) => info!(
            steps = summary.steps,
            anomalies = summary.anomalies,
            "done"
        ),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
