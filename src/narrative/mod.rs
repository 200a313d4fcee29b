use std::time::Instant;

use serde::Serialize;
use thiserror::Error;

use crate::model::result::Explanation;
use crate::model::risk::RiskLabel;

pub mod command;
pub mod template;

pub use command::CommandNarrator;
pub use template::TemplateNarrator;

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("narrator output is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("narrator exited with status {0}")]
    Failed(String),
    #[error("narrator returned an incomplete explanation")]
    Incomplete,
    #[error("narrator did not answer within {0} ms")]
    Timeout(u128),
    #[error("narrator worker panicked")]
    Panicked,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantNote {
    pub rsid: String,
    pub genotype: String,
    pub zygosity: String,
}

/// Structured facts handed to a narrator for one drug result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplanationContext {
    pub drug: String,
    pub gene: String,
    pub diplotype: String,
    pub phenotype: String,
    pub risk_label: RiskLabel,
    pub confidence_score: f64,
    pub recommendation: String,
    pub mechanism: String,
    pub variants: Vec<VariantNote>,
}

pub trait Narrator: Send + Sync {
    fn name(&self) -> &str;

    /// Produces an explanation. Implementations holding external resources
    /// release them and return [`NarrativeError::Timeout`] once `deadline` passes.
    fn explain(
        &self,
        ctx: &ExplanationContext,
        deadline: Instant,
    ) -> Result<Explanation, NarrativeError>;
}

pub fn fallback_explanation(ctx: &ExplanationContext) -> Explanation {
    let mechanism = if ctx.mechanism.trim().is_empty() {
        format!("{} response depends on {} activity.", ctx.drug, ctx.gene)
    } else {
        ctx.mechanism.clone()
    };
    Explanation {
        summary: format!(
            "Based on genetic analysis, the patient carries {} {} ({}), \
             giving a {} risk assessment for {}.",
            ctx.gene,
            ctx.diplotype,
            ctx.phenotype,
            ctx.risk_label,
            ctx.drug
        ),
        mechanism,
        variant_impact: variant_impact_text(ctx),
    }
}

pub(crate) fn variant_impact_text(ctx: &ExplanationContext) -> String {
    if ctx.variants.is_empty() {
        return format!(
            "No actionable {} variants were detected; the reference diplotype was assumed.",
            ctx.gene
        );
    }
    let listed: Vec<String> = ctx
        .variants
        .iter()
        .map(|v| format!("{} ({}, {})", v.rsid, v.genotype, v.zygosity))
        .collect();
    format!(
        "Detected {} variant(s): {}. These determine the {} diplotype.",
        ctx.gene,
        listed.join(", "),
        ctx.diplotype
    )
}

#[cfg(test)]
#[path = "../../tests/src_inline/narrative/mod.rs"]
mod tests;
