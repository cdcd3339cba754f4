mod config;
mod data;
mod error;
mod hla;
mod processor;
mod writer;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use config::{DEFAULT_MHC_CLASS, DEFAULT_ORGANISM, DEFAULT_OUTPUT_DIR, RunConfig};

/// Convert a table of solved TCR/peptide/MHC complexes into one TCRdock
/// target file per row.
#[derive(Parser, Debug)]
#[command(name = "tcrdock-targets", version, about)]
struct Cli {
    /// Input table (.csv, .tsv, .json or .parquet) with columns
    /// Peptide, HLA, Va, Ja, CDR3a, Vb, Jb, CDR3b
    input: PathBuf,

    /// Directory receiving one <row_index>.tsv per converted row
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Value written to the organism column
    #[arg(long, default_value = DEFAULT_ORGANISM)]
    organism: String,

    /// Value written to the mhc_class column
    #[arg(long, default_value_t = DEFAULT_MHC_CLASS)]
    mhc_class: u8,

    /// Validate and normalize rows without writing anything
    #[arg(long)]
    dry_run: bool,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        RunConfig {
            output_dir: cli.output_dir,
            organism: cli.organism,
            mhc_class: cli.mhc_class,
            dry_run: cli.dry_run,
            ..RunConfig::new(cli.input)
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RunConfig::from(Cli::parse());
    processor::run(&config)?;
    Ok(())
}
