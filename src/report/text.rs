use std::collections::BTreeMap;

use crate::model::result::AnalysisResult;

pub fn render_report(results: &[AnalysisResult]) -> String {
    let mut out = String::new();
    out.push_str("Kira PGx Report\n");
    out.push_str("===============\n\n");
    out.push_str("This report summarizes genotype-guided drug risk from rule-based interpretation. ");
    out.push_str("It supports, and does not replace, clinical judgement.\n\n");

    let Some(first) = results.first() else {
        out.push_str("No drugs were assessed.\n");
        return out;
    };

    out.push_str("Patient overview:\n");
    out.push_str(&format!("- Patient: {}\n", first.patient_id));
    out.push_str(&format!("- Generated: {}\n", first.timestamp));
    out.push_str(&format!(
        "- VCF parsed: {}\n",
        if first.quality_metrics.vcf_parsing_success { "yes" } else { "no" }
    ));
    out.push_str(&format!(
        "- Skipped records: {}\n\n",
        first.quality_metrics.missing_annotations
    ));

    out.push_str("Risk overview:\n");
    for (label, count) in label_counts(results) {
        out.push_str(&format!("- {label}: {count}\n"));
    }
    out.push('\n');

    for result in results {
        let profile = &result.pharmacogenomic_profile;
        let risk = &result.risk_assessment;
        out.push_str(&format!("{}\n", result.drug));
        out.push_str(&format!(
            "- Gene: {} {} ({})\n",
            profile.primary_gene, profile.diplotype, profile.phenotype
        ));
        out.push_str(&format!(
            "- Risk: {} (severity {}, confidence {:.3}, {})\n",
            risk.risk_label,
            risk.severity.as_str(),
            risk.confidence_score,
            result.quality_metrics.confidence_level.as_str()
        ));
        if profile.detected_variants.is_empty() {
            out.push_str("- Variants: none detected\n");
        } else {
            let listed: Vec<String> = profile
                .detected_variants
                .iter()
                .map(|v| format!("{} {}", v.rsid, v.genotype))
                .collect();
            out.push_str(&format!("- Variants: {}\n", listed.join(", ")));
        }
        out.push_str(&format!(
            "- Recommendation ({}): {}\n",
            result.clinical_recommendation.guideline_source,
            result.clinical_recommendation.recommendation
        ));
        if !result.clinical_recommendation.alternative_drugs.is_empty() {
            out.push_str(&format!(
                "- Alternatives: {}\n",
                result.clinical_recommendation.alternative_drugs.join(", ")
            ));
        }
        out.push_str(&format!(
            "- Explanation: {}\n\n",
            result.llm_generated_explanation.summary
        ));
    }

    out
}

fn label_counts(results: &[AnalysisResult]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for result in results {
        *counts.entry(result.risk_assessment.risk_label.as_str()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
