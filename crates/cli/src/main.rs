//! sprawlgis CLI - urban-sprawl metrics from classified land-use rasters

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use sprawlgis_algorithms::align::overlay_clip;
use sprawlgis_algorithms::area::selected_area;
use sprawlgis_algorithms::dispersion::{dispersion_field_cancellable, DispersionParams};
use sprawlgis_algorithms::metrics;
use sprawlgis_algorithms::pipeline::{self, SprawlParams};
use sprawlgis_core::io::{read_geotiff, write_geotiff};
use sprawlgis_core::{CancelToken, Raster};

// Defaults shared with the library parameter structs
const DEFAULT_RADIUS: f64 = 2000.0;
const DEFAULT_NO_DATA: i32 = 0;
const DEFAULT_BUILD_UP: i32 = 1;
const DEFAULT_SSA: f64 = 1.0;

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "sprawlgis")]
#[command(author, version, about = "Urban-sprawl metrics (SI, DIS, LUP, WUP)", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a classified raster file
    Info {
        /// Input raster file
        input: PathBuf,
    },
    /// Overlay a clipped sub-extent raster onto the full raster frame
    Align {
        /// Full-extent classified raster
        raster: PathBuf,
        /// Clipped sub-extent raster (output of an external polygon clip)
        clipped: PathBuf,
        /// Output file
        output: PathBuf,
        /// No-data value for cells outside the clip footprint
        #[arg(short, long, default_value_t = DEFAULT_NO_DATA)]
        no_data: i32,
    },
    /// Calculate the per-pixel dispersion field (SI)
    Si {
        /// Full-extent classified raster
        raster: PathBuf,
        /// Aligned clip mask raster (see `align`)
        clipped: PathBuf,
        /// Output SI raster
        output: PathBuf,
        /// Horizon of perception in ground units
        #[arg(short, long, default_value_t = DEFAULT_RADIUS)]
        radius: f64,
        /// Raster no-data value
        #[arg(short, long, default_value_t = DEFAULT_NO_DATA)]
        no_data: i32,
        /// Raster build-up value
        #[arg(short, long, default_value_t = DEFAULT_BUILD_UP)]
        build_up: i32,
    },
    /// Calculate the degree of urban dispersion (DIS) from an SI raster
    Dis {
        /// SI raster (see `si`)
        si_raster: PathBuf,
    },
    /// Calculate land uptake per person (LUP)
    Lup {
        /// Aligned clip mask raster (see `align`)
        clipped: PathBuf,
        /// Residents inside the boundary
        #[arg(long)]
        residents: i64,
        /// Employees inside the boundary
        #[arg(long, default_value_t = 0)]
        employees: i64,
        /// Raster build-up value
        #[arg(short, long, default_value_t = DEFAULT_BUILD_UP)]
        build_up: i32,
    },
    /// Calculate weighted urban proliferation (WUP) from scalar inputs
    Wup {
        /// Degree of urban dispersion (DIS)
        #[arg(long)]
        dis: f64,
        /// Land uptake per person (LUP)
        #[arg(long)]
        lup: f64,
        /// Share of settlement area, in [0, 1]
        #[arg(long, default_value_t = DEFAULT_SSA)]
        ssa: f64,
    },
    /// Run the full pipeline: align, SI, DIS, LUP, WUP
    Calculate {
        /// Full-extent classified raster
        raster: PathBuf,
        /// Clipped sub-extent raster (output of an external polygon clip)
        clipped: PathBuf,
        /// Output SI raster
        output: PathBuf,
        /// Residents inside the boundary
        #[arg(long)]
        residents: i64,
        /// Employees inside the boundary
        #[arg(long, default_value_t = 0)]
        employees: i64,
        /// Share of settlement area, in [0, 1]
        #[arg(long, default_value_t = DEFAULT_SSA)]
        ssa: f64,
        /// Horizon of perception in ground units
        #[arg(short, long, default_value_t = DEFAULT_RADIUS)]
        radius: f64,
        /// Raster no-data value
        #[arg(short, long, default_value_t = DEFAULT_NO_DATA)]
        no_data: i32,
        /// Raster build-up value
        #[arg(short, long, default_value_t = DEFAULT_BUILD_UP)]
        build_up: i32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Info { input } => {
            let raster = read_classified(&input)?;
            let (rows, cols) = raster.shape();
            let bounds = raster.bounds();
            let stats = raster.statistics();

            println!("File: {}", input.display());
            println!("Dimensions: {} x {} ({} cells)", cols, rows, raster.len());
            println!("Cell size: {}", raster.cell_size());
            println!(
                "Bounds: ({:.6}, {:.6}) - ({:.6}, {:.6})",
                bounds.0, bounds.1, bounds.2, bounds.3
            );
            if let Some(min) = stats.min {
                println!("Min: {}", min);
            }
            if let Some(max) = stats.max {
                println!("Max: {}", max);
            }
            println!("Valid cells: {}", stats.valid_count);
        }

        Commands::Align {
            raster,
            clipped,
            output,
            no_data,
        } => {
            let full = read_classified(&raster)?;
            let clip = read_classified(&clipped)?;
            let start = Instant::now();
            let aligned =
                overlay_clip(&full, &clip, no_data).context("Failed to align clipped raster")?;
            let elapsed = start.elapsed();
            write_result(&aligned, &output)?;
            done("Align", elapsed);
        }

        Commands::Si {
            raster,
            clipped,
            output,
            radius,
            no_data,
            build_up,
        } => {
            let full = read_classified(&raster)?;
            let mask = read_classified(&clipped)?;
            let cancel = CancelToken::new();

            let pb = spinner("Calculating dispersion field...");
            let start = Instant::now();
            let si = dispersion_field_cancellable(
                &full,
                &mask,
                &DispersionParams {
                    radius,
                    no_data_value: no_data as f64,
                    build_up_value: build_up,
                },
                &cancel,
            )
            .context("Failed to calculate dispersion field")?;
            let elapsed = start.elapsed();
            pb.finish_and_clear();

            write_si(&si, &output)?;
            done("SI", elapsed);
        }

        Commands::Dis { si_raster } => {
            let si: Raster<f64> = read_si(&si_raster)?;
            let dis = metrics::dis(&si).context("Failed to calculate DIS")?;
            println!("DIS: {}", dis);
        }

        Commands::Lup {
            clipped,
            residents,
            employees,
            build_up,
        } => {
            let mask = read_classified(&clipped)?;
            let area = selected_area(&mask, |v| v == build_up)
                .context("Failed to measure build-up area")?;
            let lup = metrics::lup(area, residents, employees).context("Failed to calculate LUP")?;
            println!("Build-up area: {}", area);
            println!("LUP: {}", lup);
        }

        Commands::Wup { dis, lup, ssa } => {
            let wup = metrics::wup(dis, lup, ssa).context("Failed to calculate WUP")?;
            println!("WUP: {}", wup);
        }

        Commands::Calculate {
            raster,
            clipped,
            output,
            residents,
            employees,
            ssa,
            radius,
            no_data,
            build_up,
        } => {
            let full = read_classified(&raster)?;
            let clip = read_classified(&clipped)?;
            let cancel = CancelToken::new();

            let pb = spinner("Running sprawl pipeline...");
            let start = Instant::now();
            let report = pipeline::run(
                &full,
                &clip,
                &SprawlParams {
                    radius,
                    no_data_value: no_data,
                    build_up_value: build_up,
                    ssa,
                    resident_count: residents,
                    employee_count: employees,
                },
                &cancel,
            )
            .context("Pipeline failed")?;
            let elapsed = start.elapsed();
            pb.finish_and_clear();

            write_si(&report.si, &output)?;
            println!("Build-up area: {}", report.build_up_area);
            println!("DIS: {}", report.dis);
            println!("LUP: {}", report.lup);
            println!("WUP: {}", report.wup);
            done("Calculate", elapsed);
        }
    }

    Ok(())
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn read_classified(path: &PathBuf) -> Result<Raster<i32>> {
    let pb = spinner("Reading raster...");
    let raster: Raster<i32> = read_geotiff(path).context("Failed to read raster")?;
    pb.finish_and_clear();
    info!("Input: {} x {}", raster.cols(), raster.rows());
    Ok(raster)
}

fn read_si(path: &PathBuf) -> Result<Raster<f64>> {
    let pb = spinner("Reading raster...");
    let raster: Raster<f64> = read_geotiff(path).context("Failed to read SI raster")?;
    pb.finish_and_clear();
    Ok(raster)
}

fn write_result(raster: &Raster<i32>, path: &PathBuf) -> Result<()> {
    let pb = spinner("Writing output...");
    write_geotiff(raster, path).context("Failed to write output")?;
    pb.finish_and_clear();
    Ok(())
}

fn write_si(raster: &Raster<f64>, path: &PathBuf) -> Result<()> {
    let pb = spinner("Writing output...");
    write_geotiff(raster, path).context("Failed to write output")?;
    pb.finish_and_clear();
    Ok(())
}

fn done(what: &str, elapsed: Duration) {
    info!("{} completed in {:.2?}", what, elapsed);
}
