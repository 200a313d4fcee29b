use super::*;
use crate::model::risk::RiskLabel;

struct Fixed(Result<Explanation, ()>);

impl Narrator for Fixed {
    fn name(&self) -> &str {
        "fixed"
    }

    fn explain(
        &self,
        _ctx: &ExplanationContext,
        _deadline: Instant,
    ) -> Result<Explanation, NarrativeError> {
        self.0.clone().map_err(|_| NarrativeError::Failed("exit status: 1".to_string()))
    }
}

struct Slow;

impl Narrator for Slow {
    fn name(&self) -> &str {
        "slow"
    }

    fn explain(
        &self,
        _ctx: &ExplanationContext,
        _deadline: Instant,
    ) -> Result<Explanation, NarrativeError> {
        thread::sleep(Duration::from_millis(500));
        Ok(good())
    }
}

struct Panics;

impl Narrator for Panics {
    fn name(&self) -> &str {
        "panics"
    }

    fn explain(
        &self,
        _ctx: &ExplanationContext,
        _deadline: Instant,
    ) -> Result<Explanation, NarrativeError> {
        panic!("narrator exploded")
    }
}

fn good() -> Explanation {
    Explanation {
        summary: "summary".to_string(),
        mechanism: "mechanism".to_string(),
        variant_impact: "impact".to_string(),
    }
}

fn ctx() -> ExplanationContext {
    ExplanationContext {
        drug: "WARFARIN".to_string(),
        gene: "CYP2C9".to_string(),
        diplotype: "*1/*1".to_string(),
        phenotype: "Normal Metabolizer".to_string(),
        risk_label: RiskLabel::Safe,
        confidence_score: 0.9,
        recommendation: "Standard dosing.".to_string(),
        mechanism: "CYP2C9 clears S-warfarin.".to_string(),
        variants: Vec::new(),
    }
}

const WAIT: Duration = Duration::from_millis(2_000);

#[test]
fn narrator_answer_is_used() {
    let explanation = explain_with_timeout(Arc::new(Fixed(Ok(good()))), &ctx(), WAIT);
    assert_eq!(explanation, good());
}

#[test]
fn failures_fall_back() {
    let expected = fallback_explanation(&ctx());

    let failed = explain_with_timeout(Arc::new(Fixed(Err(()))), &ctx(), WAIT);
    assert_eq!(failed, expected);

    let mut incomplete = good();
    incomplete.mechanism = " ".to_string();
    let blank = explain_with_timeout(Arc::new(Fixed(Ok(incomplete))), &ctx(), WAIT);
    assert_eq!(blank, expected);

    let panicked = explain_with_timeout(Arc::new(Panics), &ctx(), WAIT);
    assert_eq!(panicked, expected);
}

#[test]
fn slow_narrator_times_out() {
    let explanation = explain_with_timeout(Arc::new(Slow), &ctx(), Duration::from_millis(20));
    assert!(explanation.summary.starts_with("Based on genetic analysis"));
}
