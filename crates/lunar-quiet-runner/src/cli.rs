//! Command-line arguments.

use clap::{Args, Parser, Subcommand, ValueEnum};
use lunar_quiet_model::ExtrapolationPolicy;
use std::path::PathBuf;

/// Width of the radio-quiet region on the lunar far side.
#[derive(Debug, Parser)]
#[command(name = "lunar-quiet", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate the quiet-region width with uncertainties.
    Estimate(EstimateArgs),
    /// Geometric (diffraction-free) width only.
    Geometry(GeometryArgs),
    /// Show the derived parameters of a diffraction run.
    SimSetup(SimSetupArgs),
}

#[derive(Debug, Args)]
pub struct EstimateArgs {
    /// Coefficient grid file (.json, .yaml or .yml).
    #[arg(long)]
    pub grid: PathBuf,

    /// Transmission frequency (kHz).
    #[arg(long, default_value_t = 534.0)]
    pub frequency_khz: f64,

    /// Receiver height above the lunar surface (km).
    #[arg(long, default_value_t = 73.5, allow_negative_numbers = true)]
    pub height_km: f64,

    /// Quiet-region intensity threshold (dB).
    #[arg(long, default_value_t = -85.0, allow_negative_numbers = true)]
    pub threshold_db: f64,

    /// Model parameter file (YAML).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Reject queries outside 0-150 km and -90 to -50 dB.
    #[arg(long)]
    pub strict: bool,

    /// Behavior outside the sampled grid (overrides the config file).
    #[arg(long, value_enum)]
    pub extrapolation: Option<ExtrapolationArg>,

    /// Print the estimate as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct GeometryArgs {
    /// Receiver height above the lunar surface (km).
    #[arg(long, allow_negative_numbers = true)]
    pub height_km: f64,

    /// Print the width as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct SimSetupArgs {
    /// Simulation config file (YAML); defaults to the 10 kHz run.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Describe the free-space reference run instead.
    #[arg(long)]
    pub free_space: bool,

    /// Print the setup as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExtrapolationArg {
    /// Use the nearest grid edge.
    Clamp,
    /// Produce NaN (the query then fails validation).
    Nan,
}

impl From<ExtrapolationArg> for ExtrapolationPolicy {
    fn from(arg: ExtrapolationArg) -> Self {
        match arg {
            ExtrapolationArg::Clamp => ExtrapolationPolicy::Clamp,
            ExtrapolationArg::Nan => ExtrapolationPolicy::NotANumber,
        }
    }
}
