use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::input::vcf::normalize_chrom;
use crate::model::risk::{RiskLabel, Severity};
use crate::model::variant::Zygosity;

pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RuleMeta {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub assembly: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Marker {
    pub rsid: String,
    #[serde(default)]
    pub chrom: Option<String>,
    #[serde(default)]
    pub pos: Option<u64>,
    #[serde(default, rename = "ref")]
    pub ref_allele: Option<String>,
    #[serde(default, rename = "alt")]
    pub alt_allele: Option<String>,
    #[serde(default)]
    pub star: Option<String>,
    #[serde(default)]
    pub function: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneDef {
    pub symbol: String,
    pub default_diplotype: String,
    #[serde(default, rename = "marker")]
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariantSignature<'a> {
    pub rsid: &'a str,
    pub zygosity: Zygosity,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Condition {
    pub rsid: String,
    pub zygosity: Zygosity,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneRule {
    pub gene: String,
    pub diplotype: String,
    pub requires: Vec<Condition>,
}

impl GeneRule {
    pub fn matches(&self, observed: &HashMap<&str, Zygosity>) -> bool {
        self.requires
            .iter()
            .all(|c| observed.get(c.rsid.as_str()) == Some(&c.zygosity))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhenotypeRule {
    pub gene: String,
    pub diplotype: String,
    pub phenotype: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DrugDef {
    pub name: String,
    pub genes: Vec<String>,
    pub guideline_source: String,
    #[serde(default)]
    pub mechanism: String,
}

impl DrugDef {
    pub fn primary_gene(&self) -> Option<&str> {
        self.genes.first().map(|g| g.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrugRiskRule {
    pub drug: String,
    pub phenotype: String,
    pub risk_label: RiskLabel,
    pub confidence: f64,
    pub recommendation: String,
    #[serde(default)]
    pub alternatives: Vec<String>,
    #[serde(default)]
    pub guideline_source: Option<String>,
}

impl DrugRiskRule {
    pub fn severity(&self) -> Severity {
        self.risk_label.severity()
    }
}

/// Raw tables in declaration order, as read from rule files.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RuleTables {
    #[serde(default)]
    pub meta: RuleMeta,
    #[serde(default, rename = "gene")]
    pub genes: Vec<GeneDef>,
    #[serde(default, rename = "diplotype")]
    pub diplotypes: Vec<GeneRule>,
    #[serde(default, rename = "phenotype")]
    pub phenotypes: Vec<PhenotypeRule>,
    #[serde(default, rename = "drug")]
    pub drugs: Vec<DrugDef>,
    #[serde(default, rename = "risk")]
    pub risks: Vec<DrugRiskRule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiplotypeMatch<'a> {
    Rule(&'a GeneRule),
    Default(&'a str),
    UnknownGene,
}

impl DiplotypeMatch<'_> {
    pub fn diplotype(&self) -> &str {
        match self {
            DiplotypeMatch::Rule(rule) => &rule.diplotype,
            DiplotypeMatch::Default(d) => d,
            DiplotypeMatch::UnknownGene => UNKNOWN,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RiskLookup<'a> {
    Rule(&'a DrugRiskRule),
    UnmappedPhenotype(&'a DrugDef),
    UnsupportedDrug,
}

/// Immutable, indexed pharmacogenomic rule base.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    tables: RuleTables,
    fingerprint: u64,
    gene_by_symbol: HashMap<String, usize>,
    rules_by_gene: HashMap<String, Vec<usize>>,
    phenotype_by_key: HashMap<(String, String), usize>,
    drug_by_name: HashMap<String, usize>,
    risk_by_key: HashMap<(String, String), usize>,
    rsid_by_position: HashMap<(String, u64), String>,
}

impl KnowledgeBase {
    /// Builds the lookup indexes. Tables are expected to be validated already.
    pub fn from_tables(tables: RuleTables, fingerprint: u64) -> Self {
        let mut gene_by_symbol = HashMap::new();
        let mut rsid_by_position = HashMap::new();
        for (idx, gene) in tables.genes.iter().enumerate() {
            gene_by_symbol.insert(gene.symbol.clone(), idx);
            for marker in &gene.markers {
                if let (Some(chrom), Some(pos)) = (&marker.chrom, marker.pos) {
                    rsid_by_position
                        .entry((normalize_chrom(chrom).to_string(), pos))
                        .or_insert_with(|| marker.rsid.clone());
                }
            }
        }

        let mut rules_by_gene: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, rule) in tables.diplotypes.iter().enumerate() {
            rules_by_gene.entry(rule.gene.clone()).or_default().push(idx);
        }

        let phenotype_by_key = tables
            .phenotypes
            .iter()
            .enumerate()
            .map(|(idx, p)| ((p.gene.clone(), p.diplotype.clone()), idx))
            .collect();
        let drug_by_name = tables
            .drugs
            .iter()
            .enumerate()
            .map(|(idx, d)| (canonical_drug(&d.name), idx))
            .collect();
        let risk_by_key = tables
            .risks
            .iter()
            .enumerate()
            .map(|(idx, r)| ((canonical_drug(&r.drug), r.phenotype.clone()), idx))
            .collect();

        Self {
            tables,
            fingerprint,
            gene_by_symbol,
            rules_by_gene,
            phenotype_by_key,
            drug_by_name,
            risk_by_key,
            rsid_by_position,
        }
    }

    pub fn tables(&self) -> &RuleTables {
        &self.tables
    }

    pub fn version(&self) -> &str {
        &self.tables.meta.version
    }

    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    pub fn supported_drugs(&self) -> Vec<&str> {
        self.tables.drugs.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn drug(&self, drug: &str) -> Option<&DrugDef> {
        self.drug_by_name
            .get(&canonical_drug(drug))
            .map(|&idx| &self.tables.drugs[idx])
    }

    pub fn gene(&self, symbol: &str) -> Option<&GeneDef> {
        self.gene_by_symbol
            .get(symbol)
            .map(|&idx| &self.tables.genes[idx])
    }

    pub fn genes_for_drug(&self, drug: &str) -> Vec<&str> {
        self.drug(drug)
            .map(|d| d.genes.iter().map(|g| g.as_str()).collect())
            .unwrap_or_default()
    }

    /// Returns the rule with the most conditions among those fully satisfied
    /// by `variants`; equal counts keep the earlier rule in table order.
    pub fn diplotype_for(&self, gene: &str, variants: &[VariantSignature<'_>]) -> DiplotypeMatch<'_> {
        let Some(def) = self.gene(gene) else {
            return DiplotypeMatch::UnknownGene;
        };
        let observed: HashMap<&str, Zygosity> =
            variants.iter().map(|v| (v.rsid, v.zygosity)).collect();

        let mut best: Option<&GeneRule> = None;
        for &idx in self.rules_by_gene.get(gene).into_iter().flatten() {
            let rule = &self.tables.diplotypes[idx];
            if rule.requires.is_empty() || !rule.matches(&observed) {
                continue;
            }
            if best.is_none_or(|b| rule.requires.len() > b.requires.len()) {
                best = Some(rule);
            }
        }

        match best {
            Some(rule) => DiplotypeMatch::Rule(rule),
            None => DiplotypeMatch::Default(def.default_diplotype.as_str()),
        }
    }

    pub fn phenotype_for(&self, gene: &str, diplotype: &str) -> &str {
        self.phenotype_by_key
            .get(&(gene.to_string(), diplotype.to_string()))
            .map(|&idx| self.tables.phenotypes[idx].phenotype.as_str())
            .unwrap_or(UNKNOWN)
    }

    pub fn risk_rule_for(&self, drug: &str, phenotype: &str) -> RiskLookup<'_> {
        let Some(def) = self.drug(drug) else {
            return RiskLookup::UnsupportedDrug;
        };
        match self
            .risk_by_key
            .get(&(canonical_drug(drug), phenotype.to_string()))
        {
            Some(&idx) => RiskLookup::Rule(&self.tables.risks[idx]),
            None => RiskLookup::UnmappedPhenotype(def),
        }
    }

    pub fn rsid_at(&self, chrom: &str, pos: u64) -> Option<&str> {
        self.rsid_by_position
            .get(&(normalize_chrom(chrom).to_string(), pos))
            .map(|s| s.as_str())
    }

    pub fn marker_rsids(&self, gene: &str) -> HashSet<&str> {
        self.gene(gene)
            .map(|g| g.markers.iter().map(|m| m.rsid.as_str()).collect())
            .unwrap_or_default()
    }
}

pub fn canonical_drug(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}

#[cfg(test)]
#[path = "../../tests/src_inline/kb/defs.rs"]
mod tests;
