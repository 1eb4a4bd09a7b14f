mod catalog;
mod chat;
mod config;
mod error;
mod frontmatter;
mod model;
mod resolver;
mod server;
#[cfg(test)]
mod testing;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use portfolio_common::openai::{OpenAiClient, OpenAiClientConfig};

use catalog::Catalog;
use chat::ChatProxy;
use config::Config;
use resolver::ContentResolver;
use server::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting portfolio-api");

    let config = Config::from_env()?;
    info!(
        data_dir = %config.data_dir.display(),
        content_dir = %config.content_dir.display(),
        model = %config.model,
        "configuration loaded"
    );

    let catalog = Arc::new(Catalog::load(&config.data_dir)?);
    info!(
        posts = catalog.blog_len(),
        projects = catalog.projects_len(),
        "catalog loaded"
    );

    let openai_config = OpenAiClientConfig::from_env();
    info!(
        base_url = %openai_config.base_url,
        timeout_secs = openai_config.timeout.as_secs(),
        "openai client configured"
    );
    if openai_config.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set, /api/chat will answer 500");
    }
    let openai = Arc::new(OpenAiClient::new(openai_config)?);

    let chat = ChatProxy::new(openai, config.model.clone());
    let state = AppState {
        resolver: Arc::new(ContentResolver::new(
            config.content_dir.clone(),
            Arc::clone(&catalog),
        )),
        catalog,
        chat: Arc::new(chat),
    };

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %config.listen_addr, "portfolio-api ready");
    axum::serve(listener, server::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("portfolio-api shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
}
