pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
pub use config::Config;
use metrics_exporter_prometheus::PrometheusHandle;
use state::SharedState;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub async fn run(config: Config) -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `init` has to work before there is any usable configuration.
    if matches!(cli.command, Some(Commands::Init)) {
        return cli::cmd_init();
    }

    config.validate()?;
    init_tracing(&config)?;
    let prometheus_handle = init_metrics(&config)?;

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    if !matches!(command, Commands::Trending { .. }) {
        config.validate_tmdb()?;
    }

    let state = Arc::new(SharedState::new(config).await?);

    match command {
        Commands::Search { query } => cli::cmd_search(&state, &query.join(" ")).await,
        Commands::Discover => cli::cmd_discover(&state).await,
        Commands::Trending { limit } => cli::cmd_trending(&state, limit).await,
        Commands::Interactive => cli::cmd_interactive(state).await,
        Commands::Serve { port } => cli::cmd_serve(state, port, prometheus_handle).await,
        Commands::Init => cli::cmd_init(),
    }
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if config.general.log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    result.context("Failed to initialize logging")
}

fn init_metrics(config: &Config) -> anyhow::Result<Option<PrometheusHandle>> {
    if !config.observability.metrics_enabled {
        return Ok(None);
    }

    use metrics_exporter_prometheus::PrometheusBuilder;
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics recorder initialized");
    Ok(Some(handle))
}
