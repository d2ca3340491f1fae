//! # Takeoff CLI
//!
//! Runs a takeoff from JSON files and prints a report followed by the JSON
//! estimate. The input file holds one room or a job of several rooms.
//!
//! ```text
//! takeoff_cli [--extra <percent>] <input.json> <catalog.json> [settings.json]
//! ```
//!
//! `--extra` overrides the contingency of every room; text like `7.5%` is
//! accepted, and unreadable text keeps the file's value.
//!
//! Log output goes to stderr and is filtered with `RUST_LOG`.

use std::path::PathBuf;
use std::process::ExitCode;

use takeoff_core::calculations::PanelCalcResult;
use takeoff_core::file_io::{load_catalog, load_job, load_settings};
use takeoff_core::settings::{parse_extra_percent, EstimateSettings};
use takeoff_core::{run_job, BuildingInput, CalcError, JobEstimate};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "takeoff_core=info,takeoff_cli=info,warn".into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn usage() {
    eprintln!("Usage: takeoff_cli [--extra <percent>] <input.json> <catalog.json> [settings.json]");
}

struct Args {
    input: PathBuf,
    catalog: PathBuf,
    settings: Option<PathBuf>,
    extra: Option<String>,
}

fn parse_args(raw: &[String]) -> Option<Args> {
    let mut extra = None;
    let mut paths = Vec::new();
    let mut iter = raw.iter();
    while let Some(arg) = iter.next() {
        if arg == "--extra" {
            extra = Some(iter.next()?.clone());
        } else {
            paths.push(PathBuf::from(arg));
        }
    }
    if !(2..=3).contains(&paths.len()) {
        return None;
    }
    let settings = paths.get(2).cloned();
    let mut paths = paths.into_iter();
    Some(Args {
        input: paths.next()?,
        catalog: paths.next()?,
        settings,
        extra,
    })
}

/// Apply a typed contingency to every room, keeping each room's value (or
/// the configured default) when the text does not parse.
fn apply_extra(rooms: &mut [BuildingInput], text: &str, settings: &EstimateSettings) {
    for room in rooms {
        let last_good = room.extra_percent.or(Some(settings.default_extra_percent));
        room.extra_percent = Some(parse_extra_percent(text, last_good));
    }
}

fn run(args: &Args) -> Result<(Vec<BuildingInput>, JobEstimate), CalcError> {
    let mut rooms = load_job(&args.input)?;
    let catalog = load_catalog(&args.catalog)?;
    let settings = match &args.settings {
        Some(path) => load_settings(path)?,
        None => EstimateSettings::default(),
    };
    if let Some(text) = &args.extra {
        apply_extra(&mut rooms, text, &settings);
    }

    let job = run_job(&rooms, &catalog, &settings)?;
    Ok((rooms, job))
}

fn main() -> ExitCode {
    init_logging();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let Some(args) = parse_args(&raw) else {
        usage();
        return ExitCode::from(2);
    };

    match run(&args) {
        Ok((rooms, job)) => {
            print_report(&rooms, &job);

            println!();
            println!("JSON Output:");
            if let Ok(json) = serde_json::to_string_pretty(&job) {
                println!("{}", json);
            }

            if job.bom.missing {
                ExitCode::from(3)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            tracing::error!(code = e.error_code(), "takeoff failed");
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

fn print_panels(label: &str, panels: &PanelCalcResult) {
    println!(
        "  {:<9} {:>4} base → {:>4} ordered (+{:.1}%, extras {:.1}%{}) {}",
        label,
        panels.base_panels,
        panels.rounded_panels,
        panels.overage_percent_rounded,
        panels.extra_percent_applied,
        if panels.manual_extra_override { ", manual" } else { "" },
        status_icon(!panels.warn_exceeds_configured)
    );
}

fn print_report(rooms: &[BuildingInput], job: &JobEstimate) {
    println!("═══════════════════════════════════════");
    println!("  PANEL TAKEOFF");
    println!("═══════════════════════════════════════");

    for (i, (input, calc)) in rooms.iter().zip(&job.rooms).enumerate() {
        println!();
        println!("Room {}:", i + 1);
        println!(
            "  Size:      {:.1} x {:.1} ft, {:.1} ft high ({:?})",
            input.length_ft, input.width_ft, input.height_ft, input.mode
        );
        println!("  Perimeter: {:.1} ft", input.perimeter_ft());
        println!("  Net area:  {:.1} sf", input.net_wall_area_sf());
        println!("  Openings:  {}", input.openings.iter().map(|o| o.count).sum::<u32>());
        print_panels("Walls", &calc.panels);
        if let Some(ceiling) = &calc.ceiling {
            print_panels("Ceiling", &ceiling.panels);
            println!(
                "  Layout:   {} row(s) x {} panels at {} ft{} ({:?})",
                ceiling.layout.rows,
                ceiling.layout.panels_per_row,
                ceiling.layout.ship_length_ft,
                if ceiling.layout.custom_length { " custom" } else { "" },
                ceiling.layout.orientation
            );
        }
        println!("  J-trim:         {:.1} lf", calc.trims.j_trim_lf);
        if let Some(transition) = calc.trims.ceiling_transition {
            println!("  {:<15} {:.1} lf", format!("{}:", transition), calc.trims.ceiling_trim_lf);
        }
        println!("  Inside corners: {}", calc.inside_corners);
    }

    println!();
    println!("Bill of Materials ({} panels):", job.total_rounded_panels());
    for line in &job.bom.lines {
        let price = line
            .extended_price()
            .map(|p| format!("{:>10.2}", p))
            .unwrap_or_else(|| format!("{:>10}", "-"));
        println!(
            "  {:<20} {:<28} {:>6} {:<4} {}",
            line.part_number, line.name, line.quantity, line.unit, price
        );
    }
    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  TOTAL: {:.2}  {}",
        job.bom.total_price(),
        if job.bom.missing { "[MISSING PARTS]" } else { "[OK]" }
    );
    println!("═══════════════════════════════════════");
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[WARN]" }
}
