//! # Piping CLI
//!
//! Command line front end for the fitting calculation engine. Reads a
//! request (JSON file or flags), prints the result as JSON, and answers
//! catalogue questions against the built-in data or an exported snapshot.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use env_logger::Env;

use piping_core::errors::{CalcError, CalcResult};
use piping_core::file_io::load_snapshot;
use piping_core::fittings::{
    available_angle_ranges, available_fitting_types, available_sizes, calculate_fitting_with,
    schedule_candidates, FittingRequest, FittingStandard, FittingType,
};
use piping_core::reference::{builtin_snapshot, ReferenceSnapshot};
use piping_core::settings::EstimatingSettings;

#[derive(Parser)]
#[command(name = "piping_cli")]
#[command(about = "Steel fitting mass and weld estimator", long_about = None)]
#[command(version)]
struct Cli {
    /// Reference snapshot JSON (defaults to the built-in data)
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    data: Option<PathBuf>,

    /// Estimating constants TOML
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    settings: Option<PathBuf>,

    /// Log lookups and pipeline steps
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate fitting mass and weld metrics
    Calc(CalcArgs),

    /// List fitting types available for a standard
    Types {
        #[arg(value_parser = parse_standard)]
        standard: FittingStandard,
    },

    /// List nominal diameters available for a fitting type
    Sizes {
        #[arg(value_parser = parse_standard)]
        standard: FittingStandard,
        #[arg(value_parser = parse_fitting_type)]
        fitting_type: FittingType,
    },

    /// List SABS62 angle ranges for a fitting type and size
    Angles {
        #[arg(value_parser = parse_fitting_type)]
        fitting_type: FittingType,
        nominal_diameter_mm: u32,
    },

    /// Show the lookup candidates for a schedule designation
    Schedules { schedule: String },
}

#[derive(Args)]
struct CalcArgs {
    /// Request JSON file; other calc flags are ignored when given
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    request: Option<PathBuf>,

    #[arg(long, value_parser = parse_standard, required_unless_present = "request")]
    standard: Option<FittingStandard>,

    #[arg(long = "type", value_parser = parse_fitting_type, required_unless_present = "request")]
    fitting_type: Option<FittingType>,

    /// Nominal diameter (mm)
    #[arg(long = "nd", required_unless_present = "request")]
    nominal_diameter_mm: Option<u32>,

    #[arg(long)]
    angle_range: Option<String>,

    #[arg(long)]
    schedule: Option<String>,

    /// Run pipe length A (mm)
    #[arg(long = "length-a")]
    pipe_length_a_mm: Option<f64>,

    /// Run pipe length B (mm)
    #[arg(long = "length-b")]
    pipe_length_b_mm: Option<f64>,

    #[arg(long = "steel-spec")]
    steel_specification_id: Option<u32>,

    #[arg(long)]
    flange_standard: Option<u32>,

    #[arg(long)]
    pressure_class: Option<u32>,

    #[arg(short, long, default_value_t = 1)]
    quantity: u32,
}

fn parse_standard(s: &str) -> Result<FittingStandard, String> {
    FittingStandard::from_code(s).ok_or_else(|| format!("unknown standard '{}' (expected SABS62 or SABS719)", s))
}

fn parse_fitting_type(s: &str) -> Result<FittingType, String> {
    FittingType::from_code(s).ok_or_else(|| format!("unknown fitting type '{}'", s))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG still wins over the default filter
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> CalcResult<String> {
    match &cli.command {
        Commands::Calc(args) => {
            let store = load_store(cli.data.as_deref())?;
            let settings = load_settings(cli.settings.as_deref())?;
            let request = build_request(args)?;
            let result = calculate_fitting_with(&store, &request, &settings)?;
            to_json(&result)
        }
        Commands::Types { standard } => {
            let store = load_store(cli.data.as_deref())?;
            let codes: Vec<&str> = available_fitting_types(&store, *standard)?
                .iter()
                .map(|t| t.code())
                .collect();
            to_json(&codes)
        }
        Commands::Sizes {
            standard,
            fitting_type,
        } => {
            let store = load_store(cli.data.as_deref())?;
            to_json(&available_sizes(&store, *standard, *fitting_type)?)
        }
        Commands::Angles {
            fitting_type,
            nominal_diameter_mm,
        } => {
            let store = load_store(cli.data.as_deref())?;
            to_json(&available_angle_ranges(&store, *fitting_type, *nominal_diameter_mm)?)
        }
        Commands::Schedules { schedule } => to_json(&schedule_candidates(schedule)),
    }
}

fn load_store(path: Option<&Path>) -> CalcResult<ReferenceSnapshot> {
    match path {
        Some(path) => load_snapshot(path),
        None => {
            log::debug!("no --data given, using built-in reference data");
            Ok(builtin_snapshot())
        }
    }
}

fn load_settings(path: Option<&Path>) -> CalcResult<EstimatingSettings> {
    match path {
        Some(path) => EstimatingSettings::load(path),
        None => Ok(EstimatingSettings::default()),
    }
}

fn build_request(args: &CalcArgs) -> CalcResult<FittingRequest> {
    if let Some(path) = &args.request {
        let text = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        return serde_json::from_str(&text).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid request in {}: {}", path.display(), e),
        });
    }

    let standard = args
        .standard
        .ok_or_else(|| CalcError::missing_field("standard", "required without --request"))?;
    let fitting_type = args
        .fitting_type
        .ok_or_else(|| CalcError::missing_field("type", "required without --request"))?;
    let nominal_diameter_mm = args
        .nominal_diameter_mm
        .ok_or_else(|| CalcError::missing_field("nd", "required without --request"))?;

    Ok(FittingRequest {
        angle_range: args.angle_range.clone(),
        schedule: args.schedule.clone(),
        pipe_length_a_mm: args.pipe_length_a_mm,
        pipe_length_b_mm: args.pipe_length_b_mm,
        steel_specification_id: args.steel_specification_id,
        flange_standard_id: args.flange_standard,
        flange_pressure_class_id: args.pressure_class,
        quantity: args.quantity,
        ..FittingRequest::new(standard, fitting_type, nominal_diameter_mm)
    })
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> CalcResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })
}
