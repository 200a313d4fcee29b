use std::path::Path;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::kb::defs::KnowledgeBase;
use crate::kb::loader::load_rules_from_dir;
use crate::kb::store;

mod analyze;
mod drugs;
mod health;
mod rules;

#[derive(Parser, Debug)]
#[command(name = "kira-pgx", version, about = "Kira pharmacogenomic risk CLI")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Analyze(analyze::AnalyzeArgs),
    Drugs(drugs::DrugsArgs),
    Health(health::HealthArgs),
    Rules(rules::RulesArgs),
}

impl Cli {
    pub fn dispatch(self) -> anyhow::Result<()> {
        match self.command {
            Command::Analyze(args) => analyze::handle(args),
            Command::Drugs(args) => drugs::handle(args),
            Command::Health(args) => health::handle(args),
            Command::Rules(args) => rules::handle(args),
        }
    }
}

/// Rule base from `dir` when given, otherwise the bundled rules.
pub(crate) fn knowledge_base(dir: Option<&Path>) -> anyhow::Result<Arc<KnowledgeBase>> {
    match dir {
        Some(dir) => Ok(store::install(load_rules_from_dir(dir)?)),
        None => Ok(store::current()?),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/cli/mod.rs"]
mod tests;
