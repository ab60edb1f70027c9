use anyhow::Result;
use axum::Router;
use clap::Parser;
use coursematch_core::LoadError;
use coursematch_server::build_app;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Course catalog CSV
    #[arg(long, default_value = "./data/udemy_courses.csv")]
    data: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 5000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    // the index is built exactly once, here, before anything listens
    let app: Router = build_app(&args.data).inspect_err(|err| match err.downcast_ref::<LoadError>() {
        Some(LoadError::NotFound { path }) => {
            tracing::error!(path = %path.display(), "catalog CSV not found; check --data")
        }
        _ => tracing::error!(error = ?err, path = %args.data, "failed to initialize recommender"),
    })?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
