use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use log::info;

use salarydash::api::SalaryApi;
use salarydash::conf::Config;
use salarydash::core::{CliArgs, setup_logging};
use salarydash::service::SalaryService;

fn load_config(args: &CliArgs) -> anyhow::Result<Config> {
    let mut config = Config::load(args.config.as_deref().map(Path::new))?;
    if let Some(dir) = &args.data_dir {
        config.data.dir = PathBuf::from(dir);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();
    let args = CliArgs::parse();
    info!(args = args; "salarydash started.");

    let config = load_config(&args)?;
    let data_dir = config.data.dir.clone();
    let service = SalaryService::load(config)
        .with_context(|| format!("loading disclosures from {}", data_dir.display()))?;

    if let Some(query) = &args.query {
        let dashboard = service.dashboard(query)?;
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    let addr = service.config().server.addr();
    SalaryApi::new(service).serve(&addr).await?;
    Ok(())
}
