use std::net::ToSocketAddrs;
use std::sync::Arc;

use anyhow::{Context, Result};

use samovar_calendar::CalendarClient;
use samovar_disk::DiskClient;
use samovar_server::dispatch::{DispatchPolicy, Dispatcher};
use samovar_server::transport;
use samovar_translate::TranslateClient;

#[tokio::main]
async fn main() -> Result<()> {
    samovar_core::init()?;

    let config = samovar_core::Config::from_env();
    let validation = config.validate();
    if !validation.is_valid() {
        anyhow::bail!("Invalid configuration: {}", validation.error_summary());
    }
    for warning in &validation.warnings {
        tracing::warn!("Config warning: {}", warning);
    }

    let calendar = CalendarClient::new(&config.services.calendar_token)?;
    let disk = DiskClient::new(&config.services.disk_token)?;
    let translator = TranslateClient::new(&config.services.translate_key)?;

    let policy = DispatchPolicy::from_config(&config);
    let dispatcher = Arc::new(Dispatcher::new(calendar, disk, translator, policy));

    let addr = (config.server.host.as_str(), config.server.port)
        .to_socket_addrs()
        .context("Failed to resolve listen address")?
        .next()
        .context("Listen address resolved to nothing")?;

    tracing::info!("MCP server listening on http://{}", addr);
    tracing::info!("Available endpoints: POST /mcp, GET /health");

    transport::serve(dispatcher, addr).await;

    Ok(())
}
