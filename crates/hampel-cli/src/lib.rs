//! Hampel Filter Command-Line Front End
//!
//! Reads a sequence, runs the Hampel filter and writes the result as JSON.

use anyhow::Context;
use clap::Parser;
use hampel::{filter_input, FilterOutput, HampelFilter, SeriesInput};
use num_traits::Float;
use serde::Serialize;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod input;
mod settings;

pub use input::{parse, InputFormat};
pub use settings::Settings;

/// Command-line options
#[derive(Parser, Debug)]
#[command(name = "hampel", version, about = "Detect and replace outliers with a Hampel filter")]
pub struct Opts {
    /// Input file; stdin when absent or `-`
    pub input: Option<PathBuf>,

    /// Output file; stdout when absent
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Window radius (samples on each side of the center)
    #[arg(short, long)]
    pub window_size: Option<String>,

    /// Multiplier applied to the scaled MAD
    #[arg(short, long)]
    pub n_sigma: Option<String>,

    /// Configuration file (TOML, JSON, YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Input format
    #[arg(short, long, value_enum, default_value_t = InputFormat::Lines)]
    pub format: InputFormat,

    /// Compute in double precision instead of single
    #[arg(long)]
    pub double: bool,

    /// Split work across threads (needs the `parallel` feature)
    #[arg(long)]
    pub parallel: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Run summary written next to the data
#[derive(Debug, Serialize)]
pub struct FilterMeta {
    pub count: usize,
    pub outliers: usize,
    pub window_size: usize,
    pub n_sigma: f64,
    pub precision: &'static str,
}

/// JSON document written by the CLI
#[derive(Debug, Serialize)]
pub struct FilterResponse<T> {
    pub meta: FilterMeta,
    pub data: FilterOutput<String, T>,
}

/// Initialize logging on stderr
pub fn init_logging(level: &str) -> anyhow::Result<()> {
    let level = Level::from_str(level)
        .with_context(|| format!("Invalid log level `{level}`"))?;
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Read, filter and write according to `opts` and `settings`
pub fn run(opts: &Opts, settings: &Settings) -> anyhow::Result<()> {
    let text = read_input(opts.input.as_ref())?;
    let input = parse(&text, opts.format)?;
    let filter = HampelFilter::from_config(&settings.filter_config())?;
    info!(
        window_size = filter.window_size(),
        n_sigma = filter.n_sigma(),
        format = ?opts.format,
        "Filtering input"
    );

    let json = if opts.double {
        render(&filter, input, "f64", opts.pretty)?
    } else {
        render(&filter, to_single(input), "f32", opts.pretty)?
    };

    match &opts.output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

/// Filter `input` and encode the response as JSON
pub fn render<T>(
    filter: &HampelFilter,
    input: SeriesInput<String, T>,
    precision: &'static str,
    pretty: bool,
) -> anyhow::Result<String>
where
    T: Float + Send + Sync + Serialize,
{
    let data = filter_input(filter, input)?;
    let result = data.result();
    let response = FilterResponse {
        meta: FilterMeta {
            count: result.len(),
            outliers: result.outlier_count(),
            window_size: filter.window_size(),
            n_sigma: filter.n_sigma(),
            precision,
        },
        data,
    };
    info!(
        count = response.meta.count,
        outliers = response.meta.outliers,
        "Filter complete"
    );

    let json = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    Ok(json)
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn to_single(input: SeriesInput<String, f64>) -> SeriesInput<String, f32> {
    match input {
        SeriesInput::Labeled(series) => {
            let (labels, values) = series.into_parts();
            labels
                .into_iter()
                .zip(values.into_iter().map(|v| v as f32))
                .collect::<hampel::LabeledSeries<_, _>>()
                .into()
        }
        other => {
            let (values, _) = other.into_parts();
            SeriesInput::Values(values.into_iter().map(|v| v as f32).collect())
        }
    }
}
