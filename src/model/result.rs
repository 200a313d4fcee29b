use serde::{Deserialize, Serialize};

use crate::model::risk::{ConfidenceLevel, RiskLabel, Severity};
use crate::model::variant::GenomicVariant;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub patient_id: String,
    pub drug: String,
    pub timestamp: String,
    pub risk_assessment: RiskAssessment,
    pub pharmacogenomic_profile: PharmacogenomicProfile,
    pub clinical_recommendation: ClinicalRecommendation,
    pub llm_generated_explanation: Explanation,
    pub quality_metrics: QualityMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub risk_label: RiskLabel,
    pub confidence_score: f64,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PharmacogenomicProfile {
    pub primary_gene: String,
    pub diplotype: String,
    pub phenotype: String,
    pub detected_variants: Vec<GenomicVariant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClinicalRecommendation {
    pub guideline_source: String,
    pub recommendation: String,
    pub alternative_drugs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Explanation {
    pub summary: String,
    pub mechanism: String,
    pub variant_impact: String,
}

impl Explanation {
    pub fn is_complete(&self) -> bool {
        !self.summary.trim().is_empty()
            && !self.mechanism.trim().is_empty()
            && !self.variant_impact.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityMetrics {
    pub vcf_parsing_success: bool,
    pub missing_annotations: usize,
    pub confidence_level: ConfidenceLevel,
}
