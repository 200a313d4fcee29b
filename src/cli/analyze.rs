use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use tracing::info;

use crate::config::EngineConfig;
use crate::input::read_text;
use crate::narrative::CommandNarrator;
use crate::pipeline::orchestrator::{Analyzer, parse_drug_list};
use crate::report::json::{to_json, write_results};
use crate::report::text::render_report;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Input VCF (plain or gzip-compressed)
    #[arg(long)]
    pub(crate) vcf: PathBuf,

    /// Comma-separated drug names
    #[arg(long)]
    pub(crate) drugs: String,

    /// Patient identifier; defaults to the VCF sample name
    #[arg(long)]
    pub(crate) patient_id: Option<String>,

    /// Output directory for results.json and report.txt; prints JSON to stdout when absent
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,

    /// Rule directory overriding the bundled rules
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,

    /// Engine config TOML
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// External explanation program (JSON on stdin and stdout)
    #[arg(long)]
    pub(crate) narrator_cmd: Option<PathBuf>,
}

pub fn handle(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    let kb = super::knowledge_base(args.rules.as_deref())?;
    info!(
        rules_version = kb.version(),
        drugs = kb.supported_drugs().len(),
        "rules ready"
    );

    let start = Instant::now();
    info!(stage = "read_input", "starting stage");
    let text = read_text(&args.vcf)?;
    info!(
        stage = "read_input",
        elapsed_ms = start.elapsed().as_millis(),
        bytes = text.len(),
        "finished stage"
    );

    let mut analyzer = Analyzer::new(kb, config);
    if let Some(program) = &args.narrator_cmd {
        analyzer = analyzer.with_narrator(Arc::new(CommandNarrator::new(program.clone())));
    }

    let drugs = parse_drug_list(&args.drugs);
    let results = analyzer.analyze(&text, args.patient_id.as_deref(), &drugs)?;

    match &args.out {
        Some(out) => {
            std::fs::create_dir_all(out)?;
            write_results(out, &results)?;
            std::fs::write(out.join("report.txt"), render_report(&results))?;
            info!(out = %out.display(), results = results.len(), "wrote outputs");
        }
        None => println!("{}", to_json(&results)?),
    }
    Ok(())
}
