use clap::Parser;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use trackshare::{app::shutdown_on, config::ProxyArgs, handlers::ProxyState, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let args = ProxyArgs::parse();
    let state = ProxyState::new(&args.target);
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("proxying /api to {} on http://{addr}", args.target);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await?;

    Ok(())
}

