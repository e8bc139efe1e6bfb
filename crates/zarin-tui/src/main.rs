//! `zarin`: terminal storefront for the Zarin gold and jewelry shop.
//!
//! One screen per route (`/`, `/category/:id`, `/product/:id`, `/cart`,
//! `/login`, `/register`, `/admin/*`, `/search?q=`), a category sidebar,
//! and a status bar with the signed-in identity and cart count. Number
//! keys 1-5 jump between the main pages; `g` opens any path.
//!
//! Logs go to a file (default `/tmp/zarin.log`) so they never draw over
//! the terminal UI.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use zarin_core::Storefront;

use crate::app::App;

#[derive(Parser, Debug)]
#[command(name = "zarin", version, about)]
struct Cli {
    /// Storefront API base address (e.g. https://zarin.gold/api)
    #[arg(short = 'u', long, env = "ZARIN_API_URL")]
    api_url: Option<String>,

    /// Config file (defaults to the platform config directory)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Write the effective settings (file, env and --api-url) back to the
    /// config file before starting
    #[arg(long)]
    save_config: bool,

    /// Log file path
    #[arg(long, default_value = "/tmp/zarin.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-only tracing. The guard must live until exit so buffered lines
/// are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "zarin={level},zarin_core={level},zarin_api={level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_name = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("zarin.log"));

    let appender = tracing_appender::rolling::never(log_dir, log_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Config file and `ZARIN_*` environment, then the command line on top.
fn load_store_config(cli: &Cli) -> Result<zarin_core::StoreConfig> {
    let mut config = match &cli.config {
        Some(path) => zarin_config::load_config_from(path),
        None => zarin_config::load_config(),
    }
    .wrap_err("failed to load configuration")?;

    if let Some(url) = &cli.api_url {
        config.api_url.clone_from(url);
    }
    let store_config = config.to_store_config()?;

    if cli.save_config {
        persist_config(&config, cli.config.as_deref())?;
    }
    Ok(store_config)
}

/// Write an already validated config to `path`, or the platform default.
fn persist_config(config: &zarin_config::Config, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => zarin_config::save_config_to(config, path),
        None => zarin_config::save_config(config),
    }
    .wrap_err("failed to save configuration")?;
    let saved_to = path.map_or_else(zarin_config::config_path, Path::to_path_buf);
    info!(path = %saved_to.display(), "configuration saved");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;
    let _log_guard = setup_tracing(&cli);

    let config = load_store_config(&cli)?;
    info!(
        api = %config.api_url,
        catalog_limit = config.catalog_limit,
        "starting zarin"
    );

    let store = Storefront::new(config)?;
    let mut app = App::new(store)?;
    app.run().await?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn save_config_flag_persists_the_overridden_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cli = Cli::parse_from([
            "zarin",
            "--config",
            path.to_str().unwrap(),
            "--api-url",
            "https://shop.example.com/api",
            "--save-config",
        ]);

        let store = load_store_config(&cli).unwrap();
        assert_eq!(store.api_url.as_str(), "https://shop.example.com/api");

        let saved = zarin_config::load_config_from(&path).unwrap();
        assert_eq!(saved.api_url, "https://shop.example.com/api");
    }

    #[test]
    fn invalid_config_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cli = Cli::parse_from([
            "zarin",
            "--config",
            path.to_str().unwrap(),
            "--api-url",
            "not a url",
            "--save-config",
        ]);

        assert!(load_store_config(&cli).is_err());
        assert!(!path.exists());
    }
}
