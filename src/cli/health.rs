use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct HealthArgs {
    /// Rule directory overriding the bundled rules
    #[arg(long)]
    rules: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse<'a> {
    pub status: &'a str,
    pub rules_version: &'a str,
    pub rules_fingerprint: String,
}

pub fn handle(args: HealthArgs) -> anyhow::Result<()> {
    let kb = super::knowledge_base(args.rules.as_deref())?;
    let response = HealthResponse {
        status: "ok",
        rules_version: kb.version(),
        rules_fingerprint: format!("{:016x}", kb.fingerprint()),
    };
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
