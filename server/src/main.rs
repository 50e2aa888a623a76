use clap::Parser;
use pokegraph_server::{build_app, serve, Config};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();
    let config = Config::parse();
    info!(?config, "starting pokegraph");

    let app = build_app(&config)?;
    let listener = TcpListener::bind(config.addr()).await?;
    info!("🚀 Server ready at http://{}/", listener.local_addr()?);

    serve(listener, app, shutdown_signal()).await?;
    info!("shutdown");
    Ok(())
}

fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(?e, "failed to install Ctrl-C handler");
    }
}
