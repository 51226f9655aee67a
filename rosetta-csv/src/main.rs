//! rosetta-csv CLI - Generate Rosetta ingest manifests from DROID reports
//!
//! # Main Command
//!
//! ```bash
//! rosetta-csv generate --csv droid.csv --ros schema.json --cfg mapping.cfg
//! rosetta-csv generate --csv droid.csv --ros schema.json --cfg mapping.cfg --stats stats.json
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! rosetta-csv parse droid.csv        # Filtered records as JSON
//! rosetta-csv folders droid.csv      # Folder paths in the report
//! ```

use clap::{Parser, Subcommand};
use rosetta_csv::logs::{self, log_error, log_info, log_success};
use rosetta_csv::{
    filter_records, folder_names, folder_paths, generate_manifest, read_droid_report,
    ManifestInputs,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rosetta-csv")]
#[command(about = "Generate Rosetta ingest CSV manifests from DROID reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a manifest: DROID report + schema + mapping → Rosetta CSV
    Generate {
        /// DROID report
        #[arg(long)]
        csv: PathBuf,

        /// Rosetta JSON table schema
        #[arg(long)]
        ros: PathBuf,

        /// INI mapping configuration
        #[arg(long)]
        cfg: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write run statistics as JSON to this file
        #[arg(long)]
        stats: Option<PathBuf>,
    },

    /// Parse a DROID report and output the filtered records as JSON
    Parse {
        /// Input DROID report
        input: PathBuf,

        /// Keep archive entries instead of on-disk files
        #[arg(long)]
        include_archives: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the folders found in a DROID report
    Folders {
        /// Input DROID report
        input: PathBuf,

        /// Print folder names instead of full paths
        #[arg(long)]
        names: bool,
    },
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();
    logs::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            csv,
            ros,
            cfg,
            output,
            stats,
        } => cmd_generate(&csv, &ros, &cfg, output.as_deref(), stats.as_deref()),

        Commands::Parse {
            input,
            include_archives,
            output,
        } => cmd_parse(&input, include_archives, output.as_deref()),

        Commands::Folders { input, names } => cmd_folders(&input, names),
    };

    if let Err(e) = result {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn cmd_generate(
    csv: &Path,
    ros: &Path,
    cfg: &Path,
    output: Option<&Path>,
    stats: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = generate_manifest(&ManifestInputs::new(csv, ros, cfg))?;

    if let Some(stats_path) = stats {
        fs::write(stats_path, serde_json::to_string_pretty(&result.stats)?)?;
        log_success(format!("Statistics written to: {}", stats_path.display()));
    }

    write_output(&result.csv, output)?;
    Ok(())
}

fn cmd_parse(
    input: &Path,
    include_archives: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    log_info(format!("Parsing DROID report: {}", input.display()));

    let parsed = read_droid_report(input)?;
    log_info(format!("Encoding: {}", parsed.encoding));
    log_info(format!("Columns: {}", parsed.headers.join(", ")));

    let filtered = filter_records(parsed.records, include_archives);
    if let Some(ref name) = filtered.archive_name {
        log_info(format!("Archive: {}", name));
    }
    log_success(format!(
        "Kept {} records ({} folders, {} others removed)",
        filtered.records.len(),
        filtered.folders_removed,
        filtered.others_removed
    ));

    let records: Vec<Value> = filtered.records.iter().map(|r| r.to_json()).collect();
    let json = serde_json::to_string_pretty(&records)?;
    write_output(&format!("{}\n", json), output)?;

    Ok(())
}

fn cmd_folders(input: &Path, names: bool) -> Result<(), Box<dyn std::error::Error>> {
    let parsed = read_droid_report(input)?;

    let folders = if names {
        folder_names(&parsed.records)
    } else {
        folder_paths(&parsed.records)
    };
    log_success(format!("{} folders", folders.len()));

    for folder in folders {
        println!("{}", folder);
    }
    Ok(())
}

/// Write `content` verbatim to `path`, or to stdout.
fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            log_success(format!("Output written to: {}", p.display()));
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
