//! Example: Width of the radio-quiet region for one query.
//!
//! Usage: cargo run --example calc_width -- <grid> [freq_khz] [height_km] [threshold_db]

use lunar_quiet_model::{WidthModel, WidthModelParams};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <grid> [freq_khz] [height_km] [threshold_db]", args[0]);
        eprintln!("Example: {} coefficient_grid.json 534 73.5 -85", args[0]);
        std::process::exit(1);
    }

    let nu: f64 = args.get(2).map_or(534.0, |s| s.parse().expect("Invalid frequency"));
    let h: f64 = args.get(3).map_or(73.5, |s| s.parse().expect("Invalid height"));
    let db: f64 = args.get(4).map_or(-85.0, |s| s.parse().expect("Invalid threshold"));

    let model = WidthModel::from_path(&args[1], WidthModelParams::default())
        .expect("Failed to load coefficient grid");

    println!("Freq = {:.1} kHz, h = {:.1} km, threshold = {:.1} dB:", nu, h, db);
    match model.estimate_width(nu, h, db).and_then(|e| e.validate()) {
        Ok(estimate) => println!("Width of radio quiet region = {}", estimate),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
