use std::path::PathBuf;

pub const DEFAULT_OUTPUT_DIR: &str = "user_targets";
pub const DEFAULT_ORGANISM: &str = "human";
pub const DEFAULT_MHC_CLASS: u8 = 1;

/// Everything one conversion run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Input table (.csv, .tsv, .json or .parquet).
    pub input: PathBuf,
    /// Directory receiving one `<row_index>.tsv` per converted row.
    pub output_dir: PathBuf,
    /// Written verbatim into every target's `organism` column.
    pub organism: String,
    /// Written verbatim into every target's `mhc_class` column.
    pub mhc_class: u8,
    /// Validate and normalize only; touch nothing on disk.
    pub dry_run: bool,
}

impl RunConfig {
    /// Config for `input` with default output directory and constants.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        RunConfig {
            input: input.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            organism: DEFAULT_ORGANISM.to_string(),
            mhc_class: DEFAULT_MHC_CLASS,
            dry_run: false,
        }
    }
}
