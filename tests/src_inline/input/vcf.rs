use super::*;

#[test]
fn classifies_lines() {
    assert_eq!(classify_line("   "), LineKind::Blank);
    assert_eq!(classify_line("##fileformat=VCFv4.2"), LineKind::Meta);
    assert_eq!(
        classify_line("#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tNA001\tNA002"),
        LineKind::Header(vec!["NA001", "NA002"])
    );
    assert_eq!(
        classify_line("#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO"),
        LineKind::Header(Vec::new())
    );
    assert_eq!(classify_line("22\t1\t.\r"), LineKind::Data("22\t1\t."));
}

#[test]
fn split_record_checks_structure() {
    assert_eq!(split_record("22\t100\trs1"), Err(AnomalyKind::TooFewColumns));
    assert_eq!(
        split_record("22\tabc\trs1\tA\tG\t.\tPASS\t."),
        Err(AnomalyKind::InvalidPosition)
    );
    assert_eq!(
        split_record("22\t0\trs1\tA\tG\t.\tPASS\t."),
        Err(AnomalyKind::InvalidPosition)
    );

    let record =
        split_record("chr22\t42128945\trs3892097\tC\tT\t50\tPASS\tGENE=cyp2d6\tGT:DP\t1/1:30")
            .expect("valid record");
    assert_eq!(record.chrom, "chr22");
    assert_eq!(record.pos, 42128945);
    assert_eq!(record.format, Some("GT:DP"));
    assert_eq!(record.samples, vec!["1/1:30"]);
    assert_eq!(record.zygosity(0), Ok(("1/1", Zygosity::HomAlt)));
    assert_eq!(record.gene().as_deref(), Some("CYP2D6"));
    assert_eq!(record.genotype(1), Err(AnomalyKind::MissingGenotype));
}

#[test]
fn genotype_classification() {
    assert_eq!(classify_genotype("0/0", 1), Ok(Zygosity::HomRef));
    assert_eq!(classify_genotype("0|1", 1), Ok(Zygosity::Het));
    assert_eq!(classify_genotype("1/2", 2), Ok(Zygosity::HomAlt));
    assert_eq!(classify_genotype("1", 1), Ok(Zygosity::HomAlt));
    assert_eq!(classify_genotype("./.", 1), Err(AnomalyKind::MissingGenotype));
    assert_eq!(classify_genotype("0/2", 1), Err(AnomalyKind::InvalidGenotype));
    assert_eq!(classify_genotype("A/G", 1), Err(AnomalyKind::InvalidGenotype));
}

#[test]
fn rsid_from_id_or_info() {
    let by_id = split_record("22\t1\t.;RS16947\tG\tA\t.\t.\t.").expect("record");
    assert_eq!(by_id.rsid().as_deref(), Some("rs16947"));

    let by_info = split_record("22\t1\t.\tG\tA\t.\t.\tDP=10;RS=1065852").expect("record");
    assert_eq!(by_info.rsid().as_deref(), Some("rs1065852"));

    let none = split_record("22\t1\tvar_7\tG\tA\t.\t.\t.").expect("record");
    assert_eq!(none.rsid(), None);
    let numeric_id = split_record("22\t1\t16947\tG\tA\t.\t.\t.").expect("record");
    assert_eq!(numeric_id.rsid(), None);

    assert_eq!(normalize_rsid("rsX1"), None);
    assert_eq!(normalize_chrom("Chr10"), "10");
    assert_eq!(normalize_chrom("10"), "10");
    assert_eq!(info_value("A=1;GENE=TPMT", "GENE"), Some("TPMT"));
}
