//! Cloudflare DNS plugin entry point
//!
//! Speaks newline-delimited JSON on stdin/stdout with the orchestrator.
//! Logs go to stderr so they never corrupt the protocol stream.

use std::process::ExitCode;
use std::sync::Arc;

use cloudflare_dns_plugin::{CloudflareConnector, PluginSettings, RecordAdapter, host};
use cloudflare_dns_provider::create_http_client;
use tokio::io::BufReader;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries the host protocol
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let settings = PluginSettings::from_env();
    tracing::info!(
        "Starting Cloudflare DNS plugin (API: {}, env token: {})",
        settings.api_base_url,
        if settings.default_api_token.is_some() {
            "set"
        } else {
            "unset"
        }
    );

    let client = match create_http_client() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let connector = Arc::new(CloudflareConnector::new(
        client,
        settings.api_base_url.clone(),
    ));
    let adapter = Arc::new(RecordAdapter::new(connector, settings));

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    match host::serve(
        adapter,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        shutdown,
    )
    .await
    {
        Ok(_) => {
            tracing::info!("Input closed, exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Host loop failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
