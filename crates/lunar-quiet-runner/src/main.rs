//! `lunar-quiet` command-line driver.

mod cli;

use clap::Parser;
use cli::{Cli, Command, EstimateArgs, GeometryArgs, SimSetupArgs};
use lunar_quiet_model::{try_geometric_width, WidthError, WidthModel, WidthModelParams};
use lunar_quiet_sim::{SimError, SimulationConfig};
use serde::Serialize;
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum RunnerError {
    #[error(transparent)]
    Width(#[from] WidthError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Estimate(args) => run_estimate(args),
        Command::Geometry(args) => run_geometry(args),
        Command::SimSetup(args) => run_sim_setup(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_estimate(args: EstimateArgs) -> Result<(), RunnerError> {
    let mut params = match &args.config {
        Some(path) => WidthModelParams::from_path(path)?,
        None => WidthModelParams::default(),
    };
    if args.strict {
        params = params.strict();
    }
    if let Some(extrapolation) = args.extrapolation {
        params.extrapolation = extrapolation.into();
    }

    let model = WidthModel::from_path(&args.grid, params)?;
    let estimate = model
        .estimate_width(args.frequency_khz, args.height_km, args.threshold_db)?
        .validate()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        println!(
            "Freq = {:.1} kHz, h = {:.1} km, threshold = {:.1} dB:",
            args.frequency_khz, args.height_km, args.threshold_db
        );
        println!("Width of radio quiet region = {}", estimate);
    }
    Ok(())
}

fn run_geometry(args: GeometryArgs) -> Result<(), RunnerError> {
    let width = try_geometric_width(args.height_km)?;

    if args.json {
        println!(
            "{}",
            serde_json::json!({ "height_km": args.height_km, "geometric_width_deg": width })
        );
    } else {
        println!("Geometric width at h = {:.1} km = {:.2} deg", args.height_km, width);
    }
    Ok(())
}

/// Derived quantities of a diffraction run.
#[derive(Debug, Serialize)]
struct SimSetupReport {
    frequency_khz: f64,
    simulation_frequency: f64,
    wavelength_km: f64,
    period: f64,
    grid_points: (usize, usize),
    output_times: Vec<f64>,
    with_moon: bool,
}

fn run_sim_setup(args: SimSetupArgs) -> Result<(), RunnerError> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| RunnerError::Read {
                path: path.display().to_string(),
                source,
            })?;
            SimulationConfig::from_yaml_str(&text)?
        }
        None => SimulationConfig::default(),
    };
    if args.free_space {
        config = config.free_space();
    }
    config.validate()?;

    let report = SimSetupReport {
        frequency_khz: config.frequency_khz,
        simulation_frequency: config.simulation_frequency(),
        wavelength_km: config.wavelength_km(),
        period: config.period(),
        grid_points: config.grid_points(),
        output_times: config.output_times(),
        with_moon: config.medium.is_some(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Frequency            = {:.3} kHz", report.frequency_khz);
        println!("Simulation frequency = {:.6}", report.simulation_frequency);
        println!("Wavelength           = {:.3} km", report.wavelength_km);
        println!("Period               = {:.3}", report.period);
        println!("Grid points          = {} x {}", report.grid_points.0, report.grid_points.1);
        println!("With moon            = {}", report.with_moon);
        let times: Vec<String> = report.output_times.iter().map(|t| format!("{:.2}", t)).collect();
        println!("Output times         = {}", times.join(", "));
    }
    Ok(())
}
