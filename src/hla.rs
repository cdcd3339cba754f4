use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::RowError;

// ---------------------------------------------------------------------------
// Accepted allele shapes
// ---------------------------------------------------------------------------

/// Shapes accepted after whitespace and the `HLA-` / `HLA_` prefix are
/// stripped. Every pattern captures (locus, allele group, protein).
///
/// * `A*02:01` – canonical
/// * `B0702`   – no separators
/// * `A*0201`  – star but no colon
static ALLELE_SHAPES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^([ABCE])\*([0-9]{2}):([0-9]{2})$",
        r"^([ABCE])([0-9]{2})([0-9]{2})$",
        r"^([ABCE])\*([0-9]{2})([0-9]{2})$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("allele pattern is valid"))
    .collect()
});

const PREFIXES: [&str; 2] = ["HLA-", "HLA_"];

// ---------------------------------------------------------------------------
// Locus
// ---------------------------------------------------------------------------

/// Class I loci understood by the target format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locus {
    A,
    B,
    C,
    E,
}

impl Locus {
    fn from_letter(s: &str) -> Option<Self> {
        match s {
            "A" => Some(Locus::A),
            "B" => Some(Locus::B),
            "C" => Some(Locus::C),
            "E" => Some(Locus::E),
            _ => None,
        }
    }
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Locus::A => "A",
            Locus::B => "B",
            Locus::C => "C",
            Locus::E => "E",
        };
        f.write_str(letter)
    }
}

// ---------------------------------------------------------------------------
// HlaAllele
// ---------------------------------------------------------------------------

/// A two-field HLA allele such as `A*02:01`.
///
/// `group` and `protein` keep their leading zeros, so they are stored as
/// text rather than integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HlaAllele {
    pub locus: Locus,
    pub group: String,
    pub protein: String,
}

impl FromStr for HlaAllele {
    type Err = RowError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let bare = PREFIXES
            .iter()
            .find_map(|p| trimmed.strip_prefix(p))
            .unwrap_or(trimmed);

        let caps = ALLELE_SHAPES
            .iter()
            .find_map(|re| re.captures(bare))
            .ok_or_else(|| RowError::UnrecognizedHla {
                value: bare.to_string(),
            })?;

        let locus = Locus::from_letter(&caps[1]).ok_or_else(|| RowError::UnrecognizedHla {
            value: bare.to_string(),
        })?;

        Ok(HlaAllele {
            locus,
            group: caps[2].to_string(),
            protein: caps[3].to_string(),
        })
    }
}

impl fmt::Display for HlaAllele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*{}:{}", self.locus, self.group, self.protein)
    }
}

/// Rewrite an allele string into canonical `LOCUS*NN:NN` form.
///
/// ```text
/// HLA-A0201    → A*02:01
/// HLA-B*0801   → B*08:01
/// B0702        → B*07:02
/// HLA-A*02:01  → A*02:01
/// ```
pub fn normalize(raw: &str) -> Result<String, RowError> {
    raw.parse::<HlaAllele>().map(|allele| allele.to_string())
}
