use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct DrugsArgs {
    /// Rule directory overriding the bundled rules
    #[arg(long)]
    rules: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DrugsResponse<'a> {
    pub supported_drugs: Vec<&'a str>,
}

pub fn handle(args: DrugsArgs) -> anyhow::Result<()> {
    let kb = super::knowledge_base(args.rules.as_deref())?;
    let response = DrugsResponse {
        supported_drugs: kb.supported_drugs(),
    };
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
