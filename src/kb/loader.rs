use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crc::{CRC_64_ECMA_182, Crc};
use thiserror::Error;

use crate::kb::defs::{KnowledgeBase, RuleTables, canonical_drug};

const CRC64: Crc<u64> = Crc::<u64>::new(&CRC_64_ECMA_182);

const BUNDLED_RULES: &[(&str, &str)] = &[
    ("00_meta.toml", include_str!("../../assets/rules/00_meta.toml")),
    ("10_cyp2d6.toml", include_str!("../../assets/rules/10_cyp2d6.toml")),
    ("20_cyp2c9.toml", include_str!("../../assets/rules/20_cyp2c9.toml")),
    ("30_cyp2c19.toml", include_str!("../../assets/rules/30_cyp2c19.toml")),
    ("40_slco1b1.toml", include_str!("../../assets/rules/40_slco1b1.toml")),
    ("50_tpmt.toml", include_str!("../../assets/rules/50_tpmt.toml")),
    ("60_dpyd.toml", include_str!("../../assets/rules/60_dpyd.toml")),
];

#[derive(Debug, Error)]
pub enum RuleLoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml parse error in {file}: {source}")]
    Toml {
        file: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("no rules found in {0}")]
    Empty(String),
    #[error("invalid rule set: {0}")]
    Invalid(String),
}

pub fn load_rules_from_dir(dir: &Path) -> Result<KnowledgeBase, RuleLoadError> {
    let mut files = list_toml_files(dir)?;
    files.sort();

    let mut sources = Vec::with_capacity(files.len());
    for file in files {
        let text = fs::read_to_string(&file)?;
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        sources.push((name, text));
    }
    if sources.is_empty() {
        return Err(RuleLoadError::Empty(dir.to_string_lossy().to_string()));
    }
    load_rules_from_sources(&sources, &dir.to_string_lossy())
}

pub fn load_bundled_rules() -> Result<KnowledgeBase, RuleLoadError> {
    let sources: Vec<(String, String)> = BUNDLED_RULES
        .iter()
        .map(|(name, text)| (name.to_string(), text.to_string()))
        .collect();
    load_rules_from_sources(&sources, "bundled rules")
}

/// Parses, merges and validates rule files given as `(file name, text)` in load order.
pub fn load_rules_from_sources(
    sources: &[(String, String)],
    origin: &str,
) -> Result<KnowledgeBase, RuleLoadError> {
    let mut merged = RuleTables::default();
    let mut digest = CRC64.digest();

    for (name, text) in sources {
        digest.update(text.as_bytes());
        let parsed: RuleTables = toml::from_str(text).map_err(|source| RuleLoadError::Toml {
            file: name.clone(),
            source,
        })?;
        merge_meta(&mut merged, &parsed, name)?;
        merged.genes.extend(parsed.genes);
        merged.diplotypes.extend(parsed.diplotypes);
        merged.phenotypes.extend(parsed.phenotypes);
        merged.drugs.extend(parsed.drugs);
        merged.risks.extend(parsed.risks);
    }

    if merged.genes.is_empty() || merged.drugs.is_empty() {
        return Err(RuleLoadError::Empty(origin.to_string()));
    }
    validate(&merged)?;

    Ok(KnowledgeBase::from_tables(merged, digest.finalize()))
}

fn merge_meta(merged: &mut RuleTables, parsed: &RuleTables, file: &str) -> Result<(), RuleLoadError> {
    for (current, incoming, field) in [
        (&mut merged.meta.version, &parsed.meta.version, "version"),
        (&mut merged.meta.assembly, &parsed.meta.assembly, "assembly"),
    ] {
        if incoming.is_empty() {
            continue;
        }
        if current.is_empty() {
            *current = incoming.clone();
        } else if *current != *incoming {
            return Err(RuleLoadError::Invalid(format!(
                "{file}: meta {field} {incoming:?} conflicts with {current:?}"
            )));
        }
    }
    Ok(())
}

fn validate(tables: &RuleTables) -> Result<(), RuleLoadError> {
    let invalid = |msg: String| Err(RuleLoadError::Invalid(msg));

    let mut genes = HashSet::new();
    for gene in &tables.genes {
        if !genes.insert(gene.symbol.as_str()) {
            return invalid(format!("duplicate gene {}", gene.symbol));
        }
        if gene.default_diplotype.trim().is_empty() {
            return invalid(format!("gene {} has no default diplotype", gene.symbol));
        }
        let mut markers = HashSet::new();
        for marker in &gene.markers {
            if !markers.insert(marker.rsid.as_str()) {
                return invalid(format!("gene {} lists marker {} twice", gene.symbol, marker.rsid));
            }
        }
    }

    for rule in &tables.diplotypes {
        let Some(gene) = tables.genes.iter().find(|g| g.symbol == rule.gene) else {
            return invalid(format!("diplotype {} references unknown gene {}", rule.diplotype, rule.gene));
        };
        if rule.requires.is_empty() {
            return invalid(format!("diplotype {} {} has no conditions", rule.gene, rule.diplotype));
        }
        for cond in &rule.requires {
            if !gene.markers.iter().any(|m| m.rsid == cond.rsid) {
                return invalid(format!(
                    "diplotype {} {} requires {} which is not a {} marker",
                    rule.gene, rule.diplotype, cond.rsid, rule.gene
                ));
            }
        }
    }

    let mut phenotypes = HashSet::new();
    for p in &tables.phenotypes {
        if !genes.contains(p.gene.as_str()) {
            return invalid(format!("phenotype rule references unknown gene {}", p.gene));
        }
        if !phenotypes.insert((p.gene.as_str(), p.diplotype.as_str())) {
            return invalid(format!("duplicate phenotype rule {} {}", p.gene, p.diplotype));
        }
    }

    let mut drugs = HashSet::new();
    for drug in &tables.drugs {
        if canonical_drug(&drug.name) != drug.name {
            return invalid(format!("drug name {:?} is not canonical uppercase", drug.name));
        }
        if !drugs.insert(drug.name.as_str()) {
            return invalid(format!("duplicate drug {}", drug.name));
        }
        if drug.genes.is_empty() {
            return invalid(format!("drug {} lists no genes", drug.name));
        }
        if let Some(gene) = drug.genes.iter().find(|g| !genes.contains(g.as_str())) {
            return invalid(format!("drug {} references unknown gene {}", drug.name, gene));
        }
    }

    let mut risks = HashSet::new();
    for risk in &tables.risks {
        let drug = canonical_drug(&risk.drug);
        if !drugs.contains(drug.as_str()) {
            return invalid(format!("risk rule references unknown drug {}", risk.drug));
        }
        if !(risk.confidence > 0.0 && risk.confidence <= 1.0) {
            return invalid(format!(
                "risk rule {} {} confidence {} outside (0, 1]",
                risk.drug, risk.phenotype, risk.confidence
            ));
        }
        if !risks.insert((drug, risk.phenotype.clone())) {
            return invalid(format!("duplicate risk rule {} {}", risk.drug, risk.phenotype));
        }
    }

    Ok(())
}

fn list_toml_files(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            files.push(path);
        }
    }
    Ok(files)
}

#[cfg(test)]
#[path = "../../tests/src_inline/kb/loader.rs"]
mod tests;
