use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::model::result::{AnalysisResult, Explanation};
use crate::narrative::{
    ExplanationContext, NarrativeError, Narrator, VariantNote, fallback_explanation,
};

pub fn context_for(result: &AnalysisResult, mechanism: &str) -> ExplanationContext {
    let profile = &result.pharmacogenomic_profile;
    ExplanationContext {
        drug: result.drug.clone(),
        gene: profile.primary_gene.clone(),
        diplotype: profile.diplotype.clone(),
        phenotype: profile.phenotype.clone(),
        risk_label: result.risk_assessment.risk_label,
        confidence_score: result.risk_assessment.confidence_score,
        recommendation: result.clinical_recommendation.recommendation.clone(),
        mechanism: mechanism.to_string(),
        variants: profile
            .detected_variants
            .iter()
            .map(|v| VariantNote {
                rsid: v.rsid.clone(),
                genotype: v.genotype.clone(),
                zygosity: v.zygosity.as_str().to_string(),
            })
            .collect(),
    }
}

/// Asks `narrator` for an explanation, waiting at most `timeout`. Any failure
/// yields the deterministic fallback. The narrator is handed the same deadline
/// so it can release what it holds once the wait is over.
pub fn explain_with_timeout(
    narrator: Arc<dyn Narrator>,
    ctx: &ExplanationContext,
    timeout: Duration,
) -> Explanation {
    match run_narrator(narrator.clone(), ctx, timeout) {
        Ok(explanation) => explanation,
        Err(err) => {
            warn!(
                narrator = narrator.name(),
                drug = %ctx.drug,
                error = %err,
                "narrative generation failed, using fallback"
            );
            fallback_explanation(ctx)
        }
    }
}

fn run_narrator(
    narrator: Arc<dyn Narrator>,
    ctx: &ExplanationContext,
    timeout: Duration,
) -> Result<Explanation, NarrativeError> {
    let deadline = Instant::now() + timeout;
    let (tx, rx) = mpsc::channel();
    let owned = ctx.clone();
    thread::Builder::new()
        .name("narrator".to_string())
        .spawn(move || {
            let _ = tx.send(narrator.explain(&owned, deadline));
        })?;

    let explanation = match rx.recv_timeout(timeout) {
        Ok(result) => result?,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            return Err(NarrativeError::Timeout(timeout.as_millis()));
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => return Err(NarrativeError::Panicked),
    };
    if !explanation.is_complete() {
        return Err(NarrativeError::Incomplete);
    }
    Ok(explanation)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_explain.rs"]
mod tests;
