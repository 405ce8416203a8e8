use anyhow::{Context, Result};
use clap::Parser;
use larder_server::build_app;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

/// Serve keyword search over a recipe corpus.
#[derive(Parser)]
#[command(name = "larder-server")]
struct ServeArgs {
    /// Corpus path: a JSON/JSONL file or a directory of them
    #[arg(long, default_value = "./recipes.json")]
    corpus: String,
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

impl ServeArgs {
    fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = ServeArgs::parse();
    let addr = args.bind_addr()?;

    // The index is built before binding, so the port only opens once queries can be answered.
    let app = build_app(args.corpus.clone())
        .with_context(|| format!("building index from {}", args.corpus))?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, corpus = %args.corpus, "serving recipe search");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;
    Ok(())
}
