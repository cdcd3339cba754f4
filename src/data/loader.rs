use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{RawRow, RawTable};

/// Cell texts the pandas CSV reader treats as NA by default.
const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an input table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`          – comma-separated with a header row
/// * `.tsv` / `.txt` – tab-separated with a header row
/// * `.json`         – `[{ "Peptide": "...", "HLA": "...", ... }, ...]`
/// * `.parquet`      – any flat schema; every cell is read as text
pub fn load_file(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_delimited(path, b',')?,
        "tsv" | "txt" => load_delimited(path, b'\t')?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    log::debug!(
        "Loaded {} rows with columns [{}] from {}",
        table.len(),
        table.columns.join(", "),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Header row with column names, one record per line.  Blank lines are
/// skipped and NA tokens become null cells.  Short records leave their
/// trailing columns absent; a repeated header name keeps its first cell.
fn load_delimited(path: &Path, delimiter: u8) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let columns: Vec<String> = reader
        .headers()
        .context("reading header row")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("row {row_no}"))?;

        let mut row = RawRow::new(row_no);
        for (col, value) in columns.iter().zip(record.iter()) {
            row.cells
                .entry(col.clone())
                .or_insert_with(|| cell_from_text(value));
        }
        rows.push(row);
    }

    Ok(RawTable { columns, rows })
}

fn cell_from_text(s: &str) -> Option<String> {
    if NA_TOKENS.contains(&s) {
        None
    } else {
        Some(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Peptide": "GILGFVFTL", "HLA": "HLA-A*02:01", "Va": "TRAV27*01", ... },
///   ...
/// ]
/// ```
///
/// Strings are kept verbatim, numbers and booleans are rendered as text and
/// `null` becomes a null cell.
fn load_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut row = RawRow::new(i);
        for (key, val) in obj {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
            row.cells.insert(key.clone(), json_to_cell(val));
        }
        rows.push(row);
    }

    Ok(RawTable { columns, rows })
}

fn json_to_cell(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by **Pandas** (`df.to_parquet()`) or
/// **Polars** (`df.write_parquet()`).  Row indices run continuously across
/// record batches.
fn load_parquet(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        for row in 0..batch.num_rows() {
            let mut raw = RawRow::new(rows.len());
            for (col_idx, col_name) in columns.iter().enumerate() {
                let cell = extract_cell(batch.column(col_idx).as_ref(), row)
                    .with_context(|| format!("Row {}: failed to read '{col_name}'", raw.index))?;
                raw.cells.insert(col_name.clone(), cell);
            }
            rows.push(raw);
        }
    }

    Ok(RawTable { columns, rows })
}

/// Render a single Arrow cell as text; nulls and float NaN map to `None`.
fn extract_cell(col: &dyn Array, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let nan = match col.data_type() {
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row).is_nan(),
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row).is_nan(),
        _ => false,
    };
    if nan {
        return Ok(None);
    }
    let text = array_value_to_string(col, row)
        .with_context(|| format!("unsupported column type {:?}", col.data_type()))?;
    Ok(Some(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn csv_rows_keep_their_ordinal() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "meta.csv",
            "Peptide,HLA,Extra\nGILGFVFTL,HLA-A0201,x\nNLVPMVATV,B0702,y\n",
        );

        let table = load_file(&path).unwrap();
        assert_eq!(table.columns, vec!["Peptide", "HLA", "Extra"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].index, 1);
        assert_eq!(table.rows[1].get("HLA"), Some("B0702"));
    }

    #[test]
    fn na_tokens_become_null() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "meta.csv", "Peptide,HLA,Va\nNA,,n/a\n");

        let table = load_file(&path).unwrap();
        let row = &table.rows[0];
        assert_eq!(row.cells.get("Peptide"), Some(&None));
        assert_eq!(row.cells.get("HLA"), Some(&None));
        assert_eq!(row.cells.get("Va"), Some(&None));
    }

    #[test]
    fn whitespace_is_not_an_na_token() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "meta.csv", "Peptide,HLA\n  ,A0201\n");

        let table = load_file(&path).unwrap();
        assert_eq!(table.rows[0].get("Peptide"), Some("  "));
    }

    #[test]
    fn tsv_uses_tab_delimiter() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "meta.tsv", "Peptide\tHLA\nGIL,GFV\tA0201\n");

        let table = load_file(&path).unwrap();
        assert_eq!(table.rows[0].get("Peptide"), Some("GIL,GFV"));
    }

    #[test]
    fn json_records_are_loaded() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "meta.json",
            r#"[{"Peptide": "GILGFVFTL", "HLA": null, "Score": 2}, {"Peptide": "NA"}]"#,
        );

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].get("HLA"), None);
        assert_eq!(table.rows[0].get("Score"), Some("2"));
        assert_eq!(table.rows[1].get("Peptide"), Some("NA"));
        assert!(table.columns.contains(&"Score".to_string()));
    }

    #[test]
    fn json_columns_keep_file_order() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "meta.json",
            r#"[{"Peptide": "GILGFVFTL", "HLA": "A0201", "CDR3b": "CASS"}, {"Va": "TRAV27*01"}]"#,
        );

        let table = load_file(&path).unwrap();
        assert_eq!(table.columns, vec!["Peptide", "HLA", "CDR3b", "Va"]);
    }

    #[test]
    fn json_must_be_an_array() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "meta.json", r#"{"Peptide": "GILGFVFTL"}"#);
        assert!(load_file(&path).is_err());
    }

    #[test]
    fn parquet_cells_are_read_as_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("meta.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("HLA", DataType::Utf8, true),
            Field::new("Count", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![Some("HLA-A0201"), None])),
                Arc::new(Int64Array::from(vec![7, 8])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.columns, vec!["HLA", "Count"]);
        assert_eq!(table.rows[0].get("HLA"), Some("HLA-A0201"));
        assert_eq!(table.rows[1].get("HLA"), None);
        assert_eq!(table.rows[1].get("Count"), Some("8"));
        assert_eq!(table.rows[1].index, 1);
    }

    #[test]
    fn short_csv_record_leaves_trailing_cells_absent() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "meta.csv",
            "Peptide,HLA,Va\nGILGFVFTL,A0201\nNLVPMVATV,B0702,TRAV24*01\n",
        );

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert!(!table.rows[0].cells.contains_key("Va"));
        assert_eq!(table.rows[1].get("Va"), Some("TRAV24*01"));
    }

    #[test]
    fn repeated_header_keeps_first_cell() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "meta.csv", "Peptide,HLA,HLA\nGILGFVFTL,A0201,B0702\n");

        let table = load_file(&path).unwrap();
        assert_eq!(table.rows[0].get("HLA"), Some("A0201"));
    }

    #[test]
    fn parquet_float_nan_is_null() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("meta.parquet");

        let schema = Arc::new(Schema::new(vec![Field::new("Score", DataType::Float64, true)]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![Arc::new(Float64Array::from(vec![f64::NAN, 1.5]))],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.rows[0].get("Score"), None);
        assert_eq!(table.rows[1].get("Score"), Some("1.5"));
    }

    #[test]
    fn unsupported_extension_is_fatal() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "meta.xlsx", "");
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempdir().unwrap();
        assert!(load_file(&dir.path().join("absent.csv")).is_err());
    }
}
