use std::collections::BTreeMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// Input columns every row must carry, in the order they are reported when
/// missing.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Peptide", "HLA", "Va", "Ja", "CDR3a", "Vb", "Jb", "CDR3b",
];

// ---------------------------------------------------------------------------
// RawRow – one row as read from disk
// ---------------------------------------------------------------------------

/// A single input row before validation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRow {
    /// Zero-based ordinal of the row in the input table.
    pub index: usize,
    /// column_name → cell text. `None` marks a null / NA cell.
    pub cells: BTreeMap<String, Option<String>>,
}

impl RawRow {
    pub fn new(index: usize) -> Self {
        RawRow {
            index,
            cells: BTreeMap::new(),
        }
    }

    /// Cell text for `column`, or `None` when the column is absent or null.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).and_then(|v| v.as_deref())
    }
}

/// All rows of a loaded table plus its header order.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// InputRow – a validated row
// ---------------------------------------------------------------------------

/// A row whose required fields are all present and non-blank.
/// Values are kept exactly as read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRow {
    pub peptide: String,
    pub hla: String,
    pub va: String,
    pub ja: String,
    pub cdr3a: String,
    pub vb: String,
    pub jb: String,
    pub cdr3b: String,
}

// ---------------------------------------------------------------------------
// Target – one output record
// ---------------------------------------------------------------------------

/// One TCRdock target. Field order is the output column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    pub organism: String,
    pub mhc_class: u8,
    pub mhc: String,
    pub peptide: String,
    pub va: String,
    pub ja: String,
    pub cdr3a: String,
    pub vb: String,
    pub jb: String,
    pub cdr3b: String,
}

impl Target {
    /// Build a target from a validated row and its normalized allele.
    pub fn from_row(row: InputRow, mhc: String, organism: &str, mhc_class: u8) -> Self {
        Target {
            organism: organism.to_string(),
            mhc_class,
            mhc,
            peptide: row.peptide,
            va: row.va,
            ja: row.ja,
            cdr3a: row.cdr3a,
            vb: row.vb,
            jb: row.jb,
            cdr3b: row.cdr3b,
        }
    }
}
