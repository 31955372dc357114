//! Layered Settings
//!
//! Defaults, then an optional config file, then `HAMPEL_*` environment
//! variables, then command-line flags.

use anyhow::Context;
use config::{Config, Environment, File};
use hampel::{
    HampelConfig, RawParam, Validator, WindowStrategy, DEFAULT_N_SIGMA, DEFAULT_WINDOW_SIZE,
};
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::Opts;

/// Effective CLI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub window_size: usize,
    pub n_sigma: f64,
    pub strategy: WindowStrategy,
    pub parallel: bool,
    /// Minimum log level written to stderr
    pub log_level: String,
}

impl Settings {
    /// Resolve settings from every layer
    pub fn load(opts: &Opts) -> anyhow::Result<Self> {
        Self::load_with_env(opts, Environment::with_prefix("HAMPEL"))
    }

    fn load_with_env(opts: &Opts, env: Environment) -> anyhow::Result<Self> {
        let validator = Validator;
        let mut builder = Config::builder()
            .set_default("window_size", DEFAULT_WINDOW_SIZE as i64)?
            .set_default("n_sigma", DEFAULT_N_SIGMA)?
            .set_default("strategy", "sorted")?
            .set_default("parallel", false)?
            .set_default("log_level", "warn")?;

        if let Some(path) = &opts.config {
            builder = builder.add_source(File::from(path.as_path()));
        }
        builder = builder.add_source(env);

        if let Some(raw) = &opts.window_size {
            let window_size = validator.window_size(&RawParam::parse(raw))?;
            builder = builder.set_override("window_size", window_size as i64)?;
        }
        if let Some(raw) = &opts.n_sigma {
            let n_sigma = validator.n_sigma(&RawParam::parse(raw))?;
            builder = builder.set_override("n_sigma", n_sigma)?;
        }
        if opts.parallel {
            builder = builder.set_override("parallel", true)?;
        }
        if let Some(level) = verbosity_level(opts.verbose) {
            builder = builder.set_override("log_level", level)?;
        }

        let settings: Settings = builder
            .build()
            .and_then(Config::try_deserialize)
            .context("Failed to load settings")?;
        settings.filter_config().validate()?;
        settings
            .log_level
            .parse::<Level>()
            .with_context(|| format!("Invalid log_level `{}`", settings.log_level))?;
        Ok(settings)
    }

    /// Filter configuration derived from these settings
    pub fn filter_config(&self) -> HampelConfig {
        HampelConfig {
            window_size: self.window_size,
            n_sigma: self.n_sigma,
            strategy: self.strategy,
            parallel: self.parallel,
        }
    }
}

fn verbosity_level(count: u8) -> Option<&'static str> {
    match count {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}
