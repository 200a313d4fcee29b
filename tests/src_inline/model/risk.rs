use super::*;

#[test]
fn severity_follows_label() {
    assert_eq!(RiskLabel::Toxic.severity(), Severity::High);
    assert_eq!(RiskLabel::AdjustDosage.severity(), Severity::Moderate);
    assert_eq!(RiskLabel::Ineffective.severity(), Severity::Moderate);
    assert_eq!(RiskLabel::Safe.severity(), Severity::Low);
    assert_eq!(RiskLabel::Unknown.severity(), Severity::Unknown);
    assert!(Severity::High > Severity::Moderate);
    assert!(Severity::Low > Severity::Unknown);
}

#[test]
fn labels_serialize_with_display_names() {
    let json = serde_json::to_string(RiskLabel::ordered()).expect("serialize");
    assert_eq!(
        json,
        r#"["Safe","Adjust Dosage","Toxic","Ineffective","Unknown"]"#
    );
    let back: RiskLabel = serde_json::from_str(r#""Adjust Dosage""#).expect("parse");
    assert_eq!(back, RiskLabel::AdjustDosage);
    assert_eq!(
        serde_json::to_string(&Severity::Moderate).expect("serialize"),
        r#""moderate""#
    );
}

#[test]
fn clamp_and_round() {
    assert_eq!(clamp01(f64::NAN), 0.0);
    assert_eq!(clamp01(-0.2), 0.0);
    assert_eq!(clamp01(1.7), 1.0);
    assert_eq!(round3(0.6992), 0.699);
    assert_eq!(round3(0.9995), 1.0);
}
