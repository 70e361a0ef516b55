use anyhow::Result;
use nft_holdings::{
    config::ResolverConfig, ledger::RpcLedger, resolve::Resolver, server::create_router,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ResolverConfig::load()?;
    let ledger = RpcLedger::new(&config)?;

    info!(
        rpc = %ledger.url(),
        program = %config.metadata_program_id,
        max_concurrency = config.max_concurrency,
        fetch_timeout_ms = config.fetch_timeout_ms,
        "configuration loaded"
    );

    let resolver = Arc::new(Resolver::new(&config, ledger)?);
    let app = create_router(resolver, config.request_timeout());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(address = %config.bind_address, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("received ctrl-c, shutting down");
}
