use std::collections::HashMap;
use std::collections::hash_map::Entry;

use thiserror::Error;
use tracing::{debug, warn};

use crate::input::vcf::{LineKind, classify_line, split_record};
use crate::kb::defs::KnowledgeBase;
use crate::model::variant::{AnomalyKind, GenomicVariant, ParseAnomaly, SampleProfile};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed variant input: {0}")]
    MalformedInput(String),
}

/// Parses VCF text for one sample. Individual bad records are skipped and
/// recorded as anomalies; only input without a single structurally valid
/// data record fails.
pub fn run_stage1(
    text: &str,
    kb: &KnowledgeBase,
    sample_index: usize,
) -> Result<SampleProfile, ParseError> {
    let mut sample_names: Vec<String> = Vec::new();
    let mut variants: HashMap<String, GenomicVariant> = HashMap::new();
    let mut anomalies = Vec::new();
    let mut data_lines = 0usize;
    let mut structural = 0usize;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let value = match classify_line(line) {
            LineKind::Blank | LineKind::Meta => continue,
            LineKind::Header(samples) => {
                sample_names = samples.into_iter().map(|s| s.trim().to_string()).collect();
                continue;
            }
            LineKind::Data(value) => value,
        };
        data_lines += 1;

        let record = match split_record(value) {
            Ok(record) => record,
            Err(kind) => {
                anomalies.push(ParseAnomaly { line: line_no, kind });
                continue;
            }
        };
        structural += 1;

        let (genotype, zygosity) = match record.zygosity(sample_index) {
            Ok(v) => v,
            Err(kind) => {
                anomalies.push(ParseAnomaly { line: line_no, kind });
                continue;
            }
        };

        let rsid = record
            .rsid()
            .or_else(|| kb.rsid_at(record.chrom, record.pos).map(|s| s.to_string()));
        let Some(rsid) = rsid else {
            anomalies.push(ParseAnomaly {
                line: line_no,
                kind: AnomalyKind::Unannotated,
            });
            continue;
        };

        match variants.entry(rsid) {
            Entry::Occupied(_) => anomalies.push(ParseAnomaly {
                line: line_no,
                kind: AnomalyKind::Duplicate,
            }),
            Entry::Vacant(slot) => {
                let variant = GenomicVariant {
                    rsid: slot.key().clone(),
                    chromosome: record.chrom.to_string(),
                    position: record.pos,
                    ref_allele: record.reference.to_string(),
                    alt_allele: record.alternate.to_string(),
                    genotype: genotype.to_string(),
                    zygosity,
                    gene: record.gene(),
                };
                slot.insert(variant);
            }
        }
    }

    if structural == 0 {
        let reason = if data_lines == 0 {
            "no variant records found".to_string()
        } else {
            format!("none of {data_lines} data lines is a valid VCF record")
        };
        return Err(ParseError::MalformedInput(reason));
    }

    if !anomalies.is_empty() {
        warn!(
            anomalies = anomalies.len(),
            records = variants.len(),
            "skipped variant records"
        );
    }
    for anomaly in &anomalies {
        debug!(line = anomaly.line, kind = anomaly.kind.as_str(), "record skipped");
    }

    Ok(SampleProfile {
        sample_id: sample_names.get(sample_index).cloned().filter(|s| !s.is_empty()),
        variants,
        anomalies,
        data_lines,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_parse.rs"]
mod tests;
