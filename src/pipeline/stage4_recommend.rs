use crate::kb::defs::{KnowledgeBase, RiskLookup};
use crate::model::result::ClinicalRecommendation;

pub const NO_GUIDELINE: &str = "none";

pub fn recommend(kb: &KnowledgeBase, drug: &str, phenotype: &str) -> ClinicalRecommendation {
    match kb.risk_rule_for(drug, phenotype) {
        RiskLookup::Rule(rule) => {
            let guideline_source = match &rule.guideline_source {
                Some(source) => source.clone(),
                None => kb
                    .drug(drug)
                    .map(|d| d.guideline_source.clone())
                    .unwrap_or_else(|| NO_GUIDELINE.to_string()),
            };
            ClinicalRecommendation {
                guideline_source,
                recommendation: rule.recommendation.clone(),
                alternative_drugs: rule.alternatives.clone(),
            }
        }
        RiskLookup::UnmappedPhenotype(def) => ClinicalRecommendation {
            guideline_source: def.guideline_source.clone(),
            recommendation: format!(
                "No phenotype-specific guidance for {} with phenotype {phenotype}. \
                 Use standard dosing with clinical monitoring.",
                def.name
            ),
            alternative_drugs: Vec::new(),
        },
        RiskLookup::UnsupportedDrug => ClinicalRecommendation {
            guideline_source: NO_GUIDELINE.to_string(),
            recommendation: format!(
                "No pharmacogenomic guideline is available for {}. \
                 Follow standard prescribing information.",
                drug.trim()
            ),
            alternative_drugs: Vec::new(),
        },
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_recommend.rs"]
mod tests;
