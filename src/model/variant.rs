use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zygosity {
    HomRef,
    Het,
    HomAlt,
}

impl Zygosity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Zygosity::HomRef => "hom_ref",
            Zygosity::Het => "het",
            Zygosity::HomAlt => "hom_alt",
        }
    }

    pub fn from_alt_copies(copies: usize, ploidy: usize) -> Self {
        if copies == 0 {
            Zygosity::HomRef
        } else if copies >= ploidy {
            Zygosity::HomAlt
        } else {
            Zygosity::Het
        }
    }

    pub fn is_variant(&self) -> bool {
        !matches!(self, Zygosity::HomRef)
    }
}

impl std::fmt::Display for Zygosity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenomicVariant {
    pub rsid: String,
    pub chromosome: String,
    pub position: u64,
    pub ref_allele: String,
    pub alt_allele: String,
    pub genotype: String,
    pub zygosity: Zygosity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gene: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    TooFewColumns,
    InvalidPosition,
    MissingGenotype,
    InvalidGenotype,
    Unannotated,
    Duplicate,
}

impl AnomalyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyKind::TooFewColumns => "too_few_columns",
            AnomalyKind::InvalidPosition => "invalid_position",
            AnomalyKind::MissingGenotype => "missing_genotype",
            AnomalyKind::InvalidGenotype => "invalid_genotype",
            AnomalyKind::Unannotated => "unannotated",
            AnomalyKind::Duplicate => "duplicate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseAnomaly {
    pub line: usize,
    pub kind: AnomalyKind,
}

/// Variants called for one sample, keyed by rsid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SampleProfile {
    pub sample_id: Option<String>,
    pub variants: HashMap<String, GenomicVariant>,
    pub anomalies: Vec<ParseAnomaly>,
    pub data_lines: usize,
}

impl SampleProfile {
    pub fn get(&self, rsid: &str) -> Option<&GenomicVariant> {
        self.variants.get(rsid)
    }

    pub fn records_used(&self) -> usize {
        self.variants.len()
    }

    pub fn missing_annotations(&self) -> usize {
        self.anomalies.len()
    }

    pub fn parsing_success(&self) -> bool {
        !self.variants.is_empty()
    }
}
