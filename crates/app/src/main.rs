//! `storefront` command-line entry point.

use std::sync::Arc;

use clap::Parser;
use storefront_app::{App, AppConfig, Cli};
use storefront_products::HttpProductSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env().with_cli(&cli);

    storefront_observability::tracing::init(config.log_format);
    tracing::info!(api_url = %config.api_url, ephemeral = config.ephemeral, "starting storefront");

    let persistence = config.persistence()?;
    let source = HttpProductSource::new(config.api_url.clone());
    let mut app = App::new(Arc::new(source), persistence);

    let result = app.execute(cli.command).await;
    app.shutdown();

    println!("{}", result?);
    Ok(())
}
