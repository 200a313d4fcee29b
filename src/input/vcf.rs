use crate::model::variant::{AnomalyKind, Zygosity};

const MIN_COLUMNS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Meta,
    Header(Vec<&'a str>),
    Data(&'a str),
}

pub fn classify_line(line: &str) -> LineKind<'_> {
    let value = line.trim_end_matches(['\n', '\r']);
    if value.trim().is_empty() {
        LineKind::Blank
    } else if value.starts_with("##") {
        LineKind::Meta
    } else if let Some(rest) = value.strip_prefix('#') {
        let columns: Vec<&str> = rest.split('\t').collect();
        let samples = if columns.len() > 9 {
            columns[9..].to_vec()
        } else {
            Vec::new()
        };
        LineKind::Header(samples)
    } else {
        LineKind::Data(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub chrom: &'a str,
    pub pos: u64,
    pub id: &'a str,
    pub reference: &'a str,
    pub alternate: &'a str,
    pub info: &'a str,
    pub format: Option<&'a str>,
    pub samples: Vec<&'a str>,
}

/// Splits a data line into columns. Only the column count and position are
/// checked here; genotype problems are reported by [`RawRecord::zygosity`].
pub fn split_record(line: &str) -> Result<RawRecord<'_>, AnomalyKind> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() < MIN_COLUMNS {
        return Err(AnomalyKind::TooFewColumns);
    }
    let pos = parts[1]
        .trim()
        .parse::<u64>()
        .map_err(|_| AnomalyKind::InvalidPosition)?;
    if pos == 0 {
        return Err(AnomalyKind::InvalidPosition);
    }
    Ok(RawRecord {
        chrom: parts[0].trim(),
        pos,
        id: parts[2].trim(),
        reference: parts[3].trim(),
        alternate: parts[4].trim(),
        info: parts[7].trim(),
        format: parts.get(8).map(|s| s.trim()),
        samples: parts.iter().skip(9).map(|s| s.trim()).collect(),
    })
}

impl<'a> RawRecord<'a> {
    pub fn genotype(&self, sample_index: usize) -> Result<&'a str, AnomalyKind> {
        let format = self.format.ok_or(AnomalyKind::MissingGenotype)?;
        let gt_idx = format
            .split(':')
            .position(|k| k == "GT")
            .ok_or(AnomalyKind::MissingGenotype)?;
        let sample = self
            .samples
            .get(sample_index)
            .ok_or(AnomalyKind::MissingGenotype)?;
        sample
            .split(':')
            .nth(gt_idx)
            .filter(|gt| !gt.is_empty())
            .ok_or(AnomalyKind::MissingGenotype)
    }

    pub fn zygosity(&self, sample_index: usize) -> Result<(&'a str, Zygosity), AnomalyKind> {
        let gt = self.genotype(sample_index)?;
        let n_alt = self.alternate.split(',').filter(|a| *a != ".").count();
        let zygosity = classify_genotype(gt, n_alt)?;
        Ok((gt, zygosity))
    }

    pub fn rsid(&self) -> Option<String> {
        self.id
            .split(';')
            .filter(|id| id.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("rs")))
            .find_map(normalize_rsid)
            .or_else(|| info_value(self.info, "RS").and_then(normalize_rsid))
    }

    pub fn gene(&self) -> Option<String> {
        info_value(self.info, "GENE")
            .filter(|g| !g.is_empty() && *g != ".")
            .map(|g| g.to_ascii_uppercase())
    }
}

/// Classifies a `GT` value against the number of alternate alleles in the record.
pub fn classify_genotype(gt: &str, n_alt: usize) -> Result<Zygosity, AnomalyKind> {
    let alleles: Vec<&str> = gt.split(['/', '|']).collect();
    let mut copies = 0usize;
    for allele in &alleles {
        if *allele == "." {
            return Err(AnomalyKind::MissingGenotype);
        }
        let index = allele
            .parse::<usize>()
            .map_err(|_| AnomalyKind::InvalidGenotype)?;
        if index > n_alt {
            return Err(AnomalyKind::InvalidGenotype);
        }
        if index > 0 {
            copies += 1;
        }
    }
    Ok(Zygosity::from_alt_copies(copies, alleles.len()))
}

pub fn normalize_rsid(raw: &str) -> Option<String> {
    let value = raw.trim();
    let digits = match value.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("rs") => &value[2..],
        _ => value,
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("rs{digits}"))
}

pub fn info_value<'a>(info: &'a str, key: &str) -> Option<&'a str> {
    info.split(';').find_map(|field| {
        let (k, v) = field.split_once('=')?;
        (k.trim() == key).then(|| v.trim())
    })
}

pub fn normalize_chrom(chrom: &str) -> &str {
    match chrom.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("chr") => &chrom[3..],
        _ => chrom,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/vcf.rs"]
mod tests;
