use super::*;

fn ctx(variants: Vec<VariantNote>) -> ExplanationContext {
    ExplanationContext {
        drug: "CODEINE".to_string(),
        gene: "CYP2D6".to_string(),
        diplotype: "*4/*4".to_string(),
        phenotype: "Poor Metabolizer".to_string(),
        risk_label: RiskLabel::Ineffective,
        confidence_score: 0.699,
        recommendation: "Avoid codeine.".to_string(),
        mechanism: String::new(),
        variants,
    }
}

fn note() -> VariantNote {
    VariantNote {
        rsid: "rs3892097".to_string(),
        genotype: "1/1".to_string(),
        zygosity: "hom_alt".to_string(),
    }
}

#[test]
fn fallback_is_complete_and_deterministic() {
    let context = ctx(vec![note()]);
    let a = fallback_explanation(&context);
    let b = fallback_explanation(&context);
    assert_eq!(a, b);
    assert!(a.is_complete());
    assert!(a.summary.starts_with("Based on genetic analysis"));
    assert!(a.summary.contains("Ineffective"));
    assert!(a.variant_impact.contains("rs3892097 (1/1, hom_alt)"));
    assert!(a.mechanism.contains("CYP2D6"));
}

#[test]
fn fallback_without_variants_mentions_reference() {
    let explanation = fallback_explanation(&ctx(Vec::new()));
    assert!(explanation.variant_impact.contains("No actionable CYP2D6 variants"));
}

#[test]
fn context_serializes_for_external_narrators() {
    let json = serde_json::to_value(ctx(vec![note()])).expect("serialize");
    assert_eq!(json["risk_label"], "Ineffective");
    assert_eq!(json["variants"][0]["rsid"], "rs3892097");
}
