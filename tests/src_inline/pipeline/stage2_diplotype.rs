use super::*;
use crate::kb::loader::load_bundled_rules;
use crate::model::variant::Zygosity;

fn variant(rsid: &str, pos: u64, zygosity: Zygosity, gene: Option<&str>) -> GenomicVariant {
    let genotype = match zygosity {
        Zygosity::HomRef => "0/0",
        Zygosity::Het => "0/1",
        Zygosity::HomAlt => "1/1",
    };
    GenomicVariant {
        rsid: rsid.to_string(),
        chromosome: "22".to_string(),
        position: pos,
        ref_allele: "C".to_string(),
        alt_allele: "T".to_string(),
        genotype: genotype.to_string(),
        zygosity,
        gene: gene.map(|g| g.to_string()),
    }
}

fn profile(variants: Vec<GenomicVariant>) -> SampleProfile {
    SampleProfile {
        variants: variants.into_iter().map(|v| (v.rsid.clone(), v)).collect(),
        ..SampleProfile::default()
    }
}

#[test]
fn poor_metabolizer_call() {
    let kb = load_bundled_rules().expect("bundled rules");
    let sample = profile(vec![variant("rs3892097", 42128945, Zygosity::HomAlt, None)]);

    let call = call_diplotype(&sample, "CYP2D6", &kb);
    assert_eq!(call.diplotype, "*4/*4");
    assert_eq!(call.phenotype, "Poor Metabolizer");
    assert_eq!(call.source, CallSource::Rule);
    assert_eq!(call.matched_rsids, vec!["rs3892097".to_string()]);
    assert_eq!(
        call.evidence,
        MarkerEvidence {
            observed: 1,
            matched: 1,
            expected: 5
        }
    );
    assert_eq!(call.detected_variants.len(), 1);
}

#[test]
fn wild_type_when_nothing_matches() {
    let kb = load_bundled_rules().expect("bundled rules");
    let sample = profile(vec![
        variant("rs4244285", 94781859, Zygosity::HomRef, None),
        variant("rs4986893", 94780653, Zygosity::HomRef, None),
        variant("rs12248560", 94761900, Zygosity::HomRef, None),
    ]);

    let call = call_diplotype(&sample, "CYP2C19", &kb);
    assert_eq!(call.diplotype, "*1/*1");
    assert_eq!(call.phenotype, "Normal Metabolizer");
    assert_eq!(call.source, CallSource::Default);
    assert!(call.detected_variants.is_empty());
    assert!(call.matched_rsids.is_empty());
    assert_eq!(call.evidence.observed, 3);
    assert_eq!(call.evidence.expected, 3);
}

#[test]
fn detected_variants_follow_panel_then_position() {
    let kb = load_bundled_rules().expect("bundled rules");
    let sample = profile(vec![
        variant("rs99", 300, Zygosity::Het, Some("CYP2D6")),
        variant("rs98", 200, Zygosity::Het, Some("CYP2D6")),
        variant("rs97", 100, Zygosity::Het, Some("TPMT")),
        variant("rs3892097", 42128945, Zygosity::Het, None),
        variant("rs16947", 42127941, Zygosity::Het, None),
        variant("rs1065852", 42130692, Zygosity::HomRef, None),
    ]);

    let call = call_diplotype(&sample, "CYP2D6", &kb);
    let order: Vec<&str> = call.detected_variants.iter().map(|v| v.rsid.as_str()).collect();
    assert_eq!(order, vec!["rs16947", "rs3892097", "rs98", "rs99"]);
    assert_eq!(call.evidence.observed, 3);
}

#[test]
fn unknown_gene_yields_unknown_call() {
    let kb = load_bundled_rules().expect("bundled rules");
    let call = call_diplotype(&SampleProfile::default(), "NOPE", &kb);
    assert_eq!(call.source, CallSource::UnknownGene);
    assert_eq!(call.diplotype, UNKNOWN);
    assert_eq!(call.phenotype, UNKNOWN);
    assert_eq!(call.evidence.expected, 0);
}
