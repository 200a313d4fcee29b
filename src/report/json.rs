use std::path::Path;

use crate::model::result::AnalysisResult;

pub fn to_json(results: &[AnalysisResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}

pub fn write_results(out_dir: &Path, results: &[AnalysisResult]) -> anyhow::Result<()> {
    let json = to_json(results)?;
    let path = out_dir.join("results.json");
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
