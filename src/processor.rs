use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::RunConfig;
use crate::data::loader::load_file;
use crate::data::model::{RawRow, RawTable, Target};
use crate::data::validate::validate;
use crate::error::RowError;
use crate::hla;
use crate::writer::{target_path, write_target};

// ---------------------------------------------------------------------------
// Per-row conversion
// ---------------------------------------------------------------------------

/// Validate a raw row, normalize its allele and build the target record.
pub fn build_target(row: &RawRow, organism: &str, mhc_class: u8) -> Result<Target, RowError> {
    let input = validate(row)?;
    let mhc = hla::normalize(&input.hla)?;
    Ok(Target::from_row(input, mhc, organism, mhc_class))
}

/// What happened to a single input row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Target written (or, on a dry run, due to be written) at `path`.
    Written(PathBuf),
    Skipped(RowError),
}

// ---------------------------------------------------------------------------
// Run summary
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RunSummary {
    /// Rows read from the input table.
    pub rows: usize,
    /// Output files, in input order.
    pub written: Vec<PathBuf>,
    /// Skipped rows with the reason, in input order.
    pub skipped: Vec<(usize, RowError)>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows: {} targets, {} skipped",
            self.rows,
            self.written.len(),
            self.skipped.len()
        )
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Load `config.input` and convert every row.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let table = load_file(&config.input)
        .with_context(|| format!("loading {}", config.input.display()))?;
    if table.is_empty() {
        log::warn!("{} contains no rows", config.input.display());
    } else {
        log::info!("Read {} rows from {}", table.len(), config.input.display());
    }
    process_table(&table, config)
}

/// Convert every row of an already-loaded table.
///
/// Row failures are logged and recorded in the summary; only I/O errors on
/// the output side abort the run.
pub fn process_table(table: &RawTable, config: &RunConfig) -> Result<RunSummary> {
    if !config.dry_run {
        std::fs::create_dir_all(&config.output_dir).with_context(|| {
            format!("creating output directory {}", config.output_dir.display())
        })?;
    }

    let mut summary = RunSummary {
        rows: table.len(),
        ..RunSummary::default()
    };

    for row in &table.rows {
        match process_row(row, config)? {
            RowOutcome::Written(path) => summary.written.push(path),
            RowOutcome::Skipped(reason) => summary.skipped.push((row.index, reason)),
        }
    }

    log::info!("{summary}");
    Ok(summary)
}

fn process_row(row: &RawRow, config: &RunConfig) -> Result<RowOutcome> {
    let target = match build_target(row, &config.organism, config.mhc_class) {
        Ok(target) => target,
        Err(err) => {
            log_skip(row, &err);
            return Ok(RowOutcome::Skipped(err));
        }
    };

    let path = target_path(&config.output_dir, row.index);
    if config.dry_run {
        log::info!("Would write: {} -> HLA={}", path.display(), target.mhc);
    } else {
        write_target(&path, &target)?;
        log::info!("Wrote: {} -> HLA={}", path.display(), target.mhc);
    }

    Ok(RowOutcome::Written(path))
}

fn log_skip(row: &RawRow, err: &RowError) {
    match err {
        RowError::MissingField { .. } => {
            log::warn!("Skipping row {}: {err}", row.index);
        }
        RowError::UnrecognizedHla { .. } => {
            log::warn!(
                "Skipping row {}: bad HLA {:?} ({err})",
                row.index,
                row.get("HLA").unwrap_or_default()
            );
        }
    }
}
