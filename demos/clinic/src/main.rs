//! clinic — run a multi-replication trial of the nurse clinic model.
//!
//! Patients arrive at random, queue for one of a pool of nurses, consult,
//! and leave.  Parameters come from defaults, an optional JSON file, and
//! command-line overrides, in that order.  Results go to four CSV tables.
//!
//! ```text
//! clinic --config base.json --runs 10 --cores 0 --out ./output
//! RUST_LOG=debug clinic --nurses 6
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clinic_core::Param;
use clinic_output::{CsvWriter, write_trial};
use clinic_trial::{Trial, TrialResults};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "clinic")]
#[command(about = "Discrete-event simulation of patient flow through a nurse clinic", long_about = None)]
struct Args {
    /// JSON parameter file; missing fields take defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of replications
    #[arg(short, long)]
    runs: Option<u32>,

    /// Number of nurses
    #[arg(short, long)]
    nurses: Option<usize>,

    /// Worker threads (1 = sequential, 0 = all logical cores)
    #[arg(long)]
    cores: Option<usize>,

    /// Scenario label carried into the run table
    #[arg(short, long)]
    scenario: Option<String>,

    /// Directory for patient.csv, interval.csv, run.csv and overall.csv
    #[arg(short, long, default_value = "output")]
    out: PathBuf,

    /// Print the resolved parameters as JSON and exit
    #[arg(long)]
    show_params: bool,
}

impl Args {
    fn param(&self) -> Result<Param> {
        let base = match &self.config {
            Some(path) => Param::from_json_path(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => Param::default(),
        };

        let mut builder = base.to_builder();
        if let Some(runs) = self.runs {
            builder = builder.number_of_runs(runs);
        }
        if let Some(nurses) = self.nurses {
            builder = builder.number_of_nurses(nurses);
        }
        if let Some(cores) = self.cores {
            builder = builder.cores(if cores == 0 { None } else { Some(cores) });
        }
        if let Some(name) = &self.scenario {
            builder = builder.scenario_name(name.clone());
        }
        Ok(builder.build()?)
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

fn print_report(results: &TrialResults) {
    println!();
    println!("{:<28} {:>10} {:>10} {:>10} {:>10}", "metric", "mean", "std_dev", "lower_95", "upper_95");
    for row in &results.overall {
        println!(
            "{:<28} {:>10.3} {:>10.3} {:>10.3} {:>10.3}",
            row.metric, row.mean, row.std_dev, row.lower_95_ci, row.upper_95_ci
        );
    }

    let inconsistent = results.runs.iter().filter(|r| !r.utilisation_consistent(0.001)).count();
    if inconsistent > 0 {
        println!();
        println!("warning: {inconsistent} run(s) where utilisation figures disagree");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let param = args.param()?;

    if args.show_params {
        println!("{}", serde_json::to_string_pretty(&param)?);
        return Ok(());
    }

    println!("=== clinic — nurse clinic DES ===");
    println!(
        "Scenario: {}  |  Nurses: {}  |  Runs: {}  |  Horizon: {}",
        param.scenario_name(),
        param.number_of_nurses(),
        param.number_of_runs(),
        param.run_length()
    );

    let start = Instant::now();
    let results = Trial::new(param).run_reps()?;
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "trial finished");

    print_report(&results);

    let mut writer = CsvWriter::new(&args.out)
        .with_context(|| format!("creating output in {}", args.out.display()))?;
    write_trial(&mut writer, &results)?;
    println!();
    println!("Wrote {} patient rows to {}", results.patients.len(), args.out.display());

    Ok(())
}
