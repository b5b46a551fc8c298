mod cli;
mod env;

use std::sync::Arc;

use anyhow::Context;
use audit_engine::{run_audit, InventoryApi, ReqwestInventoryApi};
use audit_logging::audit_info;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    audit_logging::initialize(cli.log_destination(), cli.log_level.into());

    let credentials = env::load_credentials(&cli.env_file).context("loading API credentials")?;
    let config = cli.audit_config();
    let api: Arc<dyn InventoryApi> = Arc::new(
        ReqwestInventoryApi::new(&config.api, &credentials).context("building API client")?,
    );

    audit_info!(
        "Auditing {} with {} workers",
        config.api.base_url,
        config.enrich.workers
    );
    run_audit(api, &config).await;
    Ok(())
}
