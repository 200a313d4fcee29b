use serde::Serialize;

use crate::kb::defs::{DiplotypeMatch, KnowledgeBase, UNKNOWN, VariantSignature};
use crate::model::variant::{GenomicVariant, SampleProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallSource {
    Rule,
    Default,
    UnknownGene,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarkerEvidence {
    pub observed: usize,
    pub matched: usize,
    pub expected: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiplotypeCall {
    pub gene: String,
    pub diplotype: String,
    pub phenotype: String,
    pub detected_variants: Vec<GenomicVariant>,
    pub matched_rsids: Vec<String>,
    pub source: CallSource,
    pub evidence: MarkerEvidence,
}

/// Resolves diplotype and phenotype for `gene`. Falls back to the gene's
/// wild-type diplotype when no rule matches.
pub fn call_diplotype(profile: &SampleProfile, gene: &str, kb: &KnowledgeBase) -> DiplotypeCall {
    let Some(def) = kb.gene(gene) else {
        return DiplotypeCall {
            gene: gene.to_string(),
            diplotype: UNKNOWN.to_string(),
            phenotype: UNKNOWN.to_string(),
            detected_variants: Vec::new(),
            matched_rsids: Vec::new(),
            source: CallSource::UnknownGene,
            evidence: MarkerEvidence::default(),
        };
    };

    let mut observed_markers = Vec::with_capacity(def.markers.len());
    for marker in &def.markers {
        if let Some(v) = profile.get(&marker.rsid) {
            observed_markers.push(v);
        }
    }

    let mut detected: Vec<GenomicVariant> = observed_markers
        .iter()
        .filter(|v| v.zygosity.is_variant())
        .map(|v| (*v).clone())
        .collect();
    let mut extra: Vec<&GenomicVariant> = profile
        .variants
        .values()
        .filter(|v| v.zygosity.is_variant())
        .filter(|v| v.gene.as_deref() == Some(gene))
        .filter(|v| !def.markers.iter().any(|m| m.rsid == v.rsid))
        .collect();
    extra.sort_by(|a, b| {
        (a.chromosome.as_str(), a.position, a.rsid.as_str())
            .cmp(&(b.chromosome.as_str(), b.position, b.rsid.as_str()))
    });
    detected.extend(extra.into_iter().cloned());

    let signatures: Vec<VariantSignature<'_>> = observed_markers
        .iter()
        .map(|v| VariantSignature {
            rsid: v.rsid.as_str(),
            zygosity: v.zygosity,
        })
        .collect();

    let matched = kb.diplotype_for(gene, &signatures);
    let (source, matched_rsids) = match &matched {
        DiplotypeMatch::Rule(rule) => (
            CallSource::Rule,
            rule.requires.iter().map(|c| c.rsid.clone()).collect(),
        ),
        DiplotypeMatch::Default(_) => (CallSource::Default, Vec::new()),
        DiplotypeMatch::UnknownGene => (CallSource::UnknownGene, Vec::new()),
    };
    let diplotype = matched.diplotype().to_string();
    let phenotype = kb.phenotype_for(gene, &diplotype).to_string();

    let evidence = MarkerEvidence {
        observed: observed_markers.len(),
        matched: matched_rsids.len(),
        expected: def.markers.len(),
    };

    DiplotypeCall {
        gene: gene.to_string(),
        diplotype,
        phenotype,
        detected_variants: detected,
        matched_rsids,
        source,
        evidence,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_diplotype.rs"]
mod tests;
