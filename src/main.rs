use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{ApiClient, Backend};
use crate::app::App;
use crate::config::KeyResolver;
use crate::page::PageContext;
use crate::registry::PageRegistry;

mod api;
mod app;
mod cli;
mod commands;
mod config;
mod entity;
mod listing;
mod page;
mod receipt;
mod registry;
mod search;
mod theme;
mod tui;
mod ui;

pub use theme::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = initialize_logging()?;
    info!("Starting campusdesk");

    let args = cli::Args::parse();

    let mut config = config::load()?;
    if let Some(url) = args.api_url {
        config.api.base_url = url;
    }
    if let Some(timeout) = args.timeout {
        config.api.timeout_secs = timeout;
    }

    let backend: Arc<dyn Backend> = Arc::new(ApiClient::new(&config.api)?);
    let resolver = Arc::new(KeyResolver::new(Arc::new(config.keybindings.clone())));
    let theme = theme::theme_from_name(&config.theme.name);
    let api_host = config.api.base_url.host_str().unwrap_or("unknown").to_string();
    info!(base_url = %config.api.base_url, "using API");

    let mut registry = PageRegistry::new();
    entity::register_all(&mut registry);

    let page_size = config.list.page_size();
    let lookup_limit = config.api.lookup_limit;
    let mut app = App::new(
        registry,
        |app_tx| PageContext {
            backend,
            resolver,
            app_tx,
            page_size,
            lookup_limit,
        },
        &api_host,
        theme,
    );
    if let Some(page) = args.page.as_deref() {
        app.open_initial_page(page)?;
    }
    app.run().await?;

    Ok(())
}

fn initialize_logging() -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || std::path::PathBuf::from("logs"),
        |path| path.join("campusdesk").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "campusdesk.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .init();

    Ok(guard)
}
