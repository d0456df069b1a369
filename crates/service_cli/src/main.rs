//! trs-sim - Direct Ownership vs Total Return Swap Scenario Sweep
//!
//! Compares the PnL of holding an asset outright with the same exposure
//! taken through a financed total return swap, over a range of market moves.
//!
//! # Outputs
//!
//! Under `--output-dir` (default: current directory):
//!
//! - `data/trs_results.csv` - one row per market move
//! - `images/trs_pnl.png` - direct vs swap net PnL
//! - `images/trs_return_on_collateral.png` - swap return on collateral
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate resolves configuration,
//! runs the `pricer_trs` kernel and hands the results to `service_report`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::simulate::{PrintFormat, RunOptions};
use config::{Overrides, SimConfig};

/// TRS vs direct ownership PnL scenario simulator
#[derive(Parser)]
#[command(name = "trs-sim")]
#[command(author, version, about, long_about = None)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Notional exposure of both positions
    #[arg(long)]
    notional: Option<f64>,

    /// Annual financing rate of the swap (0.05 = 5%)
    #[arg(long, alias = "financing_rate")]
    financing_rate: Option<f64>,

    /// Holding period in years
    #[arg(long, alias = "period_years")]
    period_years: Option<f64>,

    /// Collateral posted against the swap
    #[arg(long)]
    collateral: Option<f64>,

    /// First market move of the sweep (inclusive)
    #[arg(long, alias = "move_start")]
    move_start: Option<f64>,

    /// End of the sweep (exclusive)
    #[arg(long, alias = "move_stop")]
    move_stop: Option<f64>,

    /// Increment between market moves
    #[arg(long, alias = "move_step")]
    move_step: Option<f64>,

    /// Root directory for data/ and images/
    #[arg(long, alias = "output_dir")]
    output_dir: Option<PathBuf>,

    /// Configuration file path (used only if present)
    #[arg(short, long, default_value = "trs.toml")]
    config: PathBuf,

    /// Echo the results to stdout
    #[arg(long, value_enum, default_value_t = PrintFormat::None)]
    print: PrintFormat,

    /// Evaluate scenarios in parallel
    #[arg(long)]
    parallel: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            notional: self.notional,
            financing_rate: self.financing_rate,
            period_years: self.period_years,
            collateral: self.collateral,
            move_start: self.move_start,
            move_stop: self.move_stop,
            move_step: self.move_step,
            output_dir: self.output_dir.clone(),
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "trs_sim={level},pricer_trs={level},service_report={level}"
        ))
    });

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Resolve defaults, config file, environment and flags, in that order.
fn resolve_config(cli: &Cli) -> Result<SimConfig> {
    let config = SimConfig::load_or_default(Path::new(&cli.config))?
        .with_env_override()?
        .with_overrides(&cli.overrides());
    config.validate()?;

    debug!(
        notional = config.parameters.notional,
        financing_rate = config.parameters.financing_rate,
        period_years = config.parameters.period_years,
        collateral = config.parameters.collateral,
        move_start = config.parameters.move_start,
        move_stop = config.parameters.move_stop,
        move_step = config.parameters.move_step,
        output_dir = %config.output.dir.display(),
        "Configuration resolved"
    );
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let config = resolve_config(&cli).context("failed to resolve configuration")?;
    let options = RunOptions {
        parallel: cli.parallel,
        print: cli.print,
    };

    let stdout = std::io::stdout();
    commands::simulate::run(&config, options, &mut stdout.lock())
        .context("simulation failed")?;
    Ok(())
}
