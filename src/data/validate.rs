use crate::error::RowError;

use super::model::{InputRow, RawRow, REQUIRED_COLUMNS};

/// Check that every required column is present and non-blank.
///
/// A cell fails when:
/// * the column is not in the table, or the cell is null / NA
/// * the cell text is empty after trimming whitespace
///
/// All failing columns are reported together, in [`REQUIRED_COLUMNS`] order.
pub fn validate(row: &RawRow) -> Result<InputRow, RowError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| row.get(col).map_or(true, |v| v.trim().is_empty()))
        .map(|col| col.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(RowError::MissingField { columns: missing });
    }

    // Every required column is present past this point.
    let field = |col: &str| row.get(col).unwrap_or_default().to_string();

    Ok(InputRow {
        peptide: field("Peptide"),
        hla: field("HLA"),
        va: field("Va"),
        ja: field("Ja"),
        cdr3a: field("CDR3a"),
        vb: field("Vb"),
        jb: field("Jb"),
        cdr3b: field("CDR3b"),
    })
}
