use anyhow::{Context, Result};
use clap::Parser;
use slidematch::MatchConfig;
use slidematch_server::{router, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "slidematch-server", version, about = "Slider captcha distance service")]
struct Args {
    /// Socket address to listen on.
    #[arg(long, default_value = "0.0.0.0:8080")]
    listen: String,
    /// Score surface rows in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "slidematch=info,slidematch_server=info,tower_http=info")]
    log_filter: String,
    /// Maximum accepted request body in bytes.
    #[arg(long, default_value_t = 16 * 1024 * 1024)]
    max_body_bytes: usize,
    /// Maximum target area (width * height) accepted for either image.
    #[arg(long, default_value_t = 4096 * 4096)]
    max_pixels: usize,
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let state = AppState {
        match_config: MatchConfig {
            parallel: args.parallel,
        },
        max_body_bytes: args.max_body_bytes,
        max_pixels: args.max_pixels,
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&args.listen)
        .await
        .with_context(|| format!("failed to bind {}", args.listen))?;
    info!(
        "listening on http://{} (parallel={}, max_body_bytes={}, max_pixels={})",
        args.listen, args.parallel, args.max_body_bytes, args.max_pixels
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}
