use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::kb::defs::{KnowledgeBase, canonical_drug};

#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Rule directory overriding the bundled rules
    #[arg(long)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: RulesCommand,
}

#[derive(Subcommand, Debug)]
enum RulesCommand {
    List,
    Dump(RulesDumpArgs),
}

#[derive(Args, Debug)]
pub struct RulesDumpArgs {
    /// Output directory
    #[arg(long)]
    out: PathBuf,
}

pub fn handle(args: RulesArgs) -> anyhow::Result<()> {
    let kb = super::knowledge_base(args.rules.as_deref())?;
    match args.command {
        RulesCommand::List => {
            print!("{}", list_rules(&kb));
            Ok(())
        }
        RulesCommand::Dump(dump) => {
            std::fs::create_dir_all(&dump.out)?;
            let json = serde_json::to_string_pretty(kb.tables())?;
            std::fs::write(dump.out.join("rules_manifest.json"), json)?;
            Ok(())
        }
    }
}

pub(crate) fn list_rules(kb: &KnowledgeBase) -> String {
    let tables = kb.tables();
    let mut out = String::from("drug\tgene\tn_markers\tn_diplotypes\tn_risks\n");
    for drug in &tables.drugs {
        let gene = drug.primary_gene().unwrap_or_default();
        let n_markers = kb.marker_rsids(gene).len();
        let n_diplotypes = tables.diplotypes.iter().filter(|d| d.gene == gene).count();
        let n_risks = tables
            .risks
            .iter()
            .filter(|r| canonical_drug(&r.drug) == drug.name)
            .count();
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\n",
            drug.name, gene, n_markers, n_diplotypes, n_risks
        ));
    }
    out
}
