//! Hampel Filter - Command-Line Entry Point

use clap::Parser;
use hampel_cli::{init_logging, run, Opts, Settings};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    let settings = Settings::load(&opts)?;
    init_logging(&settings.log_level)?;

    info!("=== Hampel filter v{} ===", env!("CARGO_PKG_VERSION"));
    run(&opts, &settings)
}
