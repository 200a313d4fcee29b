use std::sync::Arc;
use std::time::Instant;

use chrono::{SecondsFormat, Utc};
use rayon::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::config::EngineConfig;
use crate::kb::defs::{KnowledgeBase, UNKNOWN, canonical_drug};
use crate::model::result::{AnalysisResult, PharmacogenomicProfile, QualityMetrics};
use crate::model::variant::SampleProfile;
use crate::narrative::{Narrator, TemplateNarrator};
use crate::pipeline::stage1_parse::{ParseError, run_stage1};
use crate::pipeline::stage2_diplotype::{CallSource, call_diplotype};
use crate::pipeline::stage3_risk::assess;
use crate::pipeline::stage4_recommend::recommend;
use crate::pipeline::stage5_explain::{context_for, explain_with_timeout};

pub const UNKNOWN_PATIENT: &str = "PATIENT_UNKNOWN";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("no drugs requested")]
    NoDrugs,
}

/// Splits a comma-separated drug list into canonical names, dropping blanks.
pub fn parse_drug_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(canonical_drug)
        .filter(|d| !d.is_empty())
        .collect()
}

pub struct Analyzer {
    kb: Arc<KnowledgeBase>,
    config: EngineConfig,
    narrator: Arc<dyn Narrator>,
}

impl Analyzer {
    pub fn new(kb: Arc<KnowledgeBase>, config: EngineConfig) -> Self {
        Self {
            kb,
            config,
            narrator: Arc::new(TemplateNarrator),
        }
    }

    pub fn with_narrator(mut self, narrator: Arc<dyn Narrator>) -> Self {
        self.narrator = narrator;
        self
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn analyze(
        &self,
        vcf_text: &str,
        patient_id: Option<&str>,
        drugs: &[String],
    ) -> Result<Vec<AnalysisResult>, AnalysisError> {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        self.analyze_at(vcf_text, patient_id, drugs, &timestamp)
    }

    /// Same as [`Analyzer::analyze`] with a caller-supplied timestamp.
    pub fn analyze_at(
        &self,
        vcf_text: &str,
        patient_id: Option<&str>,
        drugs: &[String],
        timestamp: &str,
    ) -> Result<Vec<AnalysisResult>, AnalysisError> {
        let drugs: Vec<String> = drugs
            .iter()
            .map(|d| canonical_drug(d))
            .filter(|d| !d.is_empty())
            .collect();
        if drugs.is_empty() {
            return Err(AnalysisError::NoDrugs);
        }

        let start = Instant::now();
        info!(stage = "stage1_parse", "starting stage");
        let profile = run_stage1(vcf_text, &self.kb, self.config.sample_index)?;
        info!(
            stage = "stage1_parse",
            elapsed_ms = start.elapsed().as_millis(),
            data_lines = profile.data_lines,
            records = profile.records_used(),
            anomalies = profile.missing_annotations(),
            "finished stage"
        );

        let patient_id = resolve_patient_id(patient_id, &profile);

        let start = Instant::now();
        info!(stage = "per_drug", drugs = drugs.len(), "starting stage");
        let results: Vec<AnalysisResult> = drugs
            .par_iter()
            .map(|drug| self.analyze_drug(&profile, &patient_id, drug, timestamp))
            .collect();
        info!(
            stage = "per_drug",
            elapsed_ms = start.elapsed().as_millis(),
            results = results.len(),
            "finished stage"
        );

        Ok(results)
    }

    fn analyze_drug(
        &self,
        profile: &SampleProfile,
        patient_id: &str,
        drug: &str,
        timestamp: &str,
    ) -> AnalysisResult {
        let thresholds = &self.config.thresholds;
        let drug_def = self.kb.drug(drug);
        let gene = drug_def.and_then(|d| d.primary_gene()).unwrap_or(UNKNOWN);

        let call = call_diplotype(profile, gene, &self.kb);
        let risk = assess(&self.kb, drug, &call.phenotype, &call.evidence, thresholds);
        let recommendation = recommend(&self.kb, drug, &call.phenotype);
        info!(
            drug,
            gene = %call.gene,
            diplotype = %call.diplotype,
            phenotype = %call.phenotype,
            source = ?call.source,
            risk = risk.risk_label.as_str(),
            confidence = risk.confidence_score,
            "drug assessed"
        );

        let detected_variants = match call.source {
            CallSource::UnknownGene => Vec::new(),
            CallSource::Rule | CallSource::Default => call.detected_variants,
        };
        let quality_metrics = QualityMetrics {
            vcf_parsing_success: profile.parsing_success(),
            missing_annotations: profile.missing_annotations(),
            confidence_level: thresholds.confidence_level(risk.confidence_score),
        };

        let mut result = AnalysisResult {
            patient_id: patient_id.to_string(),
            drug: drug.to_string(),
            timestamp: timestamp.to_string(),
            risk_assessment: risk,
            pharmacogenomic_profile: PharmacogenomicProfile {
                primary_gene: call.gene,
                diplotype: call.diplotype,
                phenotype: call.phenotype,
                detected_variants,
            },
            clinical_recommendation: recommendation,
            llm_generated_explanation: Default::default(),
            quality_metrics,
        };

        let mechanism = drug_def.map(|d| d.mechanism.as_str()).unwrap_or_default();
        let ctx = context_for(&result, mechanism);
        result.llm_generated_explanation =
            explain_with_timeout(self.narrator.clone(), &ctx, self.config.narrative_timeout());
        result
    }
}

fn resolve_patient_id(arg: Option<&str>, profile: &SampleProfile) -> String {
    arg.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| profile.sample_id.clone())
        .unwrap_or_else(|| UNKNOWN_PATIENT.to_string())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/orchestrator.rs"]
mod tests;
