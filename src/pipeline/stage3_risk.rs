use crate::kb::defs::{KnowledgeBase, RiskLookup};
use crate::model::result::RiskAssessment;
use crate::model::risk::{RiskLabel, clamp01, round3};
use crate::model::thresholds::Thresholds;
use crate::pipeline::stage2_diplotype::MarkerEvidence;

/// Fraction of the gene's marker panel present in the sample.
pub fn coverage(evidence: &MarkerEvidence) -> f64 {
    if evidence.expected == 0 {
        1.0
    } else {
        clamp01(evidence.observed as f64 / evidence.expected as f64)
    }
}

/// Smallest score a supported drug can receive; 0.0 is reserved for unsupported drugs.
pub const MIN_SUPPORTED_CONFIDENCE: f64 = 0.001;

pub fn scaled_confidence(base: f64, evidence: &MarkerEvidence, thresholds: &Thresholds) -> f64 {
    let floor = if evidence.matched > 0 {
        thresholds.matched_floor
    } else {
        thresholds.default_floor
    };
    let factor = floor + (1.0 - floor) * coverage(evidence);
    round3(clamp01(base * factor)).max(MIN_SUPPORTED_CONFIDENCE)
}

pub fn assess(
    kb: &KnowledgeBase,
    drug: &str,
    phenotype: &str,
    evidence: &MarkerEvidence,
    thresholds: &Thresholds,
) -> RiskAssessment {
    let (label, base) = match kb.risk_rule_for(drug, phenotype) {
        RiskLookup::UnsupportedDrug => {
            return RiskAssessment {
                risk_label: RiskLabel::Unknown,
                confidence_score: 0.0,
                severity: RiskLabel::Unknown.severity(),
            };
        }
        RiskLookup::UnmappedPhenotype(_) => {
            (RiskLabel::Unknown, thresholds.unmapped_base_confidence)
        }
        RiskLookup::Rule(rule) => (rule.risk_label, rule.confidence),
    };

    RiskAssessment {
        risk_label: label,
        confidence_score: scaled_confidence(base, evidence, thresholds),
        severity: label.severity(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_risk.rs"]
mod tests;
