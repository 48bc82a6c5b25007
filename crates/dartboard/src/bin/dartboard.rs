use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dartboard::core::{parse_level, RadiusRounding};
use dartboard::quick::{parse_pair, score_point, zone_table};
use dartboard::{replay_session, CalibrationParams, SessionScript};
use nalgebra::Point2;
use serde::Serialize;

#[cfg(not(feature = "tracing"))]
use dartboard::core::init_with_level;
#[cfg(not(feature = "tracing"))]
use log::{info, warn};

#[cfg(feature = "tracing")]
use dartboard::core::init_tracing;
#[cfg(feature = "tracing")]
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "dartboard", version, about = "Dartboard calibration and scoring tools")]
struct Cli {
    /// Log level: off, error, warn, info, debug or trace.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    /// Emit JSON log lines (tracing builds only).
    #[cfg(feature = "tracing")]
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Replay a recorded session script and print the report
    Replay {
        script: PathBuf,
        /// Write the report here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print zone radii and sector spokes for a board radius
    Zones {
        #[arg(long)]
        radius: f64,
        /// Round boundaries to whole pixels.
        #[arg(long)]
        nearest_pixel: bool,
    },
    /// Classify and score one point
    Score {
        #[arg(long, value_parser = parse_pair, allow_hyphen_values = true)]
        center: Point2<f64>,
        #[arg(long)]
        radius: f64,
        #[arg(long, value_parser = parse_pair, allow_hyphen_values = true)]
        point: Point2<f64>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    #[cfg(not(feature = "tracing"))]
    init_with_level(parse_level(&cli.log_level))?;

    #[cfg(feature = "tracing")]
    {
        tracing_log::LogTracer::init()?;
        init_tracing(parse_level(&cli.log_level), cli.log_json);
    }

    run(cli.cmd)
}

fn run(cmd: Cmd) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Cmd::Replay { script, out } => {
            let session = SessionScript::load_json(&script)?;
            info!(
                "replaying {} ({} steps)",
                script.display(),
                session.steps.len()
            );
            let report = replay_session(&session);
            match out {
                Some(path) => {
                    report.write_json(&path)?;
                    info!("report written to {}", path.display());
                }
                None => print_json(&report)?,
            }
            if let Some(err) = report.error {
                warn!("replay stopped early");
                return Err(err.into());
            }
        }
        Cmd::Zones {
            radius,
            nearest_pixel,
        } => {
            let params = CalibrationParams {
                rounding: if nearest_pixel {
                    RadiusRounding::NearestPixel
                } else {
                    RadiusRounding::Exact
                },
                ..CalibrationParams::default()
            };
            print_json(&zone_table(radius, &params)?)?;
        }
        Cmd::Score {
            center,
            radius,
            point,
        } => {
            let scored = score_point(center, radius, point, &CalibrationParams::default())?;
            print_json(&scored)?;
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
