use std::time::Instant;

use crate::model::result::Explanation;
use crate::model::risk::RiskLabel;
use crate::narrative::{ExplanationContext, NarrativeError, Narrator, variant_impact_text};

/// Deterministic narrator built from rule text only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNarrator;

impl Narrator for TemplateNarrator {
    fn name(&self) -> &str {
        "template"
    }

    fn explain(
        &self,
        ctx: &ExplanationContext,
        _deadline: Instant,
    ) -> Result<Explanation, NarrativeError> {
        let outlook = match ctx.risk_label {
            RiskLabel::Safe => "standard therapy is expected to work as intended",
            RiskLabel::AdjustDosage => "a dose adjustment is advised",
            RiskLabel::Toxic => "there is an elevated risk of toxicity",
            RiskLabel::Ineffective => "the drug is unlikely to be effective",
            RiskLabel::Unknown => "no genotype-guided conclusion can be drawn",
        };
        let summary = format!(
            "{} {} corresponds to {}; for {} {}. {}",
            ctx.gene, ctx.diplotype, ctx.phenotype, ctx.drug, outlook, ctx.recommendation
        );
        let mechanism = if ctx.mechanism.trim().is_empty() {
            format!("{} handling of {} is not described in the rule set.", ctx.gene, ctx.drug)
        } else {
            ctx.mechanism.clone()
        };
        Ok(Explanation {
            summary,
            mechanism,
            variant_impact: variant_impact_text(ctx),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/narrative/template.rs"]
mod tests;
