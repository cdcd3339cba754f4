use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const COLUMNS: [&str; 9] = [
    "Peptide", "HLA", "Va", "Ja", "CDR3a", "Vb", "Jb", "CDR3b", "Epitope.species",
];

/// A mix of allele spellings, one blank CDR3b and one class II allele, so
/// a conversion run exercises every skip path.
const ROWS: [[&str; 9]; 6] = [
    ["GILGFVFTL", "HLA-A*02:01", "TRAV27*01", "TRAJ42*01", "CAGAGSQGNLIF", "TRBV19*01", "TRBJ2-7*01", "CASSIRSSYEQYF", "InfluenzaA"],
    ["NLVPMVATV", "HLA-A0201", "TRAV24*01", "TRAJ49*01", "CAFNTGNQFYF", "TRBV7-6*01", "TRBJ1-2*01", "CASSLAPGATNEKLFF", "CMV"],
    ["RPHERNGFTVL", "B0702", "TRAV12-1*01", "TRAJ33*01", "CVVNMDSNYQLIW", "TRBV7-9*01", "TRBJ2-3*01", "CASSLAGTDTQYF", "CMV"],
    ["RAKFKQLL", "HLA-B*0801", "TRAV26-2*01", "TRAJ52*01", "CILRDGAGGTSYGKLTF", "TRBV7-8*01", "TRBJ2-7*01", "CASSLGQAYEQYF", "EBV"],
    ["YVLDHLIVV", "HLA-A*02:01", "TRAV12-2*01", "TRAJ24*01", "CAVTTDSWGKLQF", "TRBV2*01", "TRBJ1-1*01", "", "EBV"],
    ["PKYVKQNTLKLAT", "HLA-DRB1*04:01", "TRAV8-4*01", "TRAJ48*01", "CAVSESPFGNEKLTF", "TRBV28*01", "TRBJ2-7*01", "CASSFRGGHEQYF", "InfluenzaA"],
];

fn write_csv(path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(COLUMNS)?;
    for row in &ROWS {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(
        COLUMNS
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));

    // Blank cells become nulls, as pandas writes NaN.
    let arrays: Vec<ArrayRef> = (0..COLUMNS.len())
        .map(|col| {
            let values: Vec<Option<&str>> = ROWS
                .iter()
                .map(|row| Some(row[col]).filter(|v| !v.is_empty()))
                .collect();
            Arc::new(StringArray::from(values)) as ArrayRef
        })
        .collect();

    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let csv_path = "sample_targets.csv";
    write_csv(csv_path)?;
    log::info!("Wrote {} rows to {csv_path}", ROWS.len());

    let parquet_path = "sample_targets.parquet";
    write_parquet(parquet_path)?;
    log::info!("Wrote {} rows to {parquet_path}", ROWS.len());
    Ok(())
}
