use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::data::model::Target;

/// Output path for the row at `index`: `<dir>/<index>.tsv`.
pub fn target_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("{index}.tsv"))
}

/// Write `target` as a header plus one tab-separated data row, replacing any
/// existing file at `path`.
pub fn write_target(path: &Path, target: &Target) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer
        .serialize(target)
        .with_context(|| format!("writing {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn target() -> Target {
        Target {
            organism: "human".into(),
            mhc_class: 1,
            mhc: "A*02:01".into(),
            peptide: "GILGFVFTL".into(),
            va: "TRAV27*01".into(),
            ja: "TRAJ42*01".into(),
            cdr3a: "CAGGGSQGNLIF".into(),
            vb: "TRBV19*01".into(),
            jb: "TRBJ2-7*01".into(),
            cdr3b: "CASSIRSSYEQYF".into(),
        }
    }

    #[test]
    fn writes_header_and_single_row() {
        let dir = tempdir().unwrap();
        let path = target_path(dir.path(), 3);
        assert!(path.ends_with("3.tsv"));

        write_target(&path, &target()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "organism\tmhc_class\tmhc\tpeptide\tva\tja\tcdr3a\tvb\tjb\tcdr3b",
                "human\t1\tA*02:01\tGILGFVFTL\tTRAV27*01\tTRAJ42*01\tCAGGGSQGNLIF\tTRBV19*01\tTRBJ2-7*01\tCASSIRSSYEQYF",
            ]
        );
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let path = target_path(&dir.path().join("nope"), 0);
        assert!(write_target(&path, &target()).is_err());
    }
}
