//! fscd — the dashboard server daemon.
//!
//! Single binary that assembles the subsystems:
//! - Dataset store (embedded JSON, optionally overridden from disk)
//! - Chart registry and SVG renderer
//! - REST API + server-rendered dashboard + embed pages
//! - Traffic counters with Prometheus exposition
//!
//! # Usage
//!
//! ```text
//! fscd serve --port 8090 --base-url https://dashboard.example.org
//! fscd snippet workforce-gender --view female-share
//! fscd charts --format json
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::info;

use fsc_charts::query::ChartQuery;
use fsc_charts::registry;
use fsc_core::config::{DataConfig, ServerConfig, UiConfig};
use fsc_core::{DashboardConfig, EmbedOptions, Theme};
use fsc_data::DatasetStore;
use fsc_metrics::ViewCounters;

#[derive(Parser)]
#[command(
    name = "fscd",
    about = "Startup ecosystem dashboard server",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the dashboard server.
    Serve {
        /// Path to an fsc.toml config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on. Overrides the config file.
        #[arg(long)]
        port: Option<u16>,

        /// Public base URL baked into embed snippets. Overrides the
        /// config file.
        #[arg(long)]
        base_url: Option<String>,

        /// Default theme: light, dark, or system. Overrides the config file.
        #[arg(long)]
        default_theme: Option<String>,

        /// Directory of dataset JSON files overriding the embedded ones.
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Traffic summary log interval in seconds.
        #[arg(long, default_value = "300")]
        summary_interval: u64,
    },
    /// Print the paste-ready embed snippet for a chart.
    Snippet {
        /// Chart id, e.g. `workforce-gender`. Run `fscd charts` for the list.
        chart_id: String,

        /// Path to an fsc.toml config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Public base URL for the snippet. Overrides the config file.
        #[arg(long)]
        base_url: Option<String>,

        /// Filter selection, e.g. `startups`.
        #[arg(long)]
        filter: Option<String>,

        /// View selection, e.g. `female-share`.
        #[arg(long)]
        view: Option<String>,

        /// Omit the chart title inside the embed.
        #[arg(long)]
        no_title: bool,

        /// Omit the source attribution inside the embed.
        #[arg(long)]
        no_source: bool,

        /// Force a theme instead of following the embedding page.
        #[arg(long)]
        theme: Option<String>,

        /// Tighter paddings and a smaller title, for narrow columns.
        #[arg(long)]
        compact: bool,
    },
    /// List registered charts and their accepted controls.
    Charts {
        /// Output format: text or json.
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fscd=debug,fsc_data=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            port,
            base_url,
            default_theme,
            data_dir,
            summary_interval,
        } => {
            run_serve(
                config,
                port,
                base_url,
                default_theme,
                data_dir,
                summary_interval,
            )
            .await
        }
        Command::Snippet {
            chart_id,
            config,
            base_url,
            filter,
            view,
            no_title,
            no_source,
            theme,
            compact,
        } => run_snippet(
            &chart_id, config, base_url, filter, view, no_title, no_source, theme, compact,
        ),
        Command::Charts { format } => run_charts(&format),
    }
}

// ── Serve ──────────────────────────────────────────────────────

async fn run_serve(
    config_path: Option<PathBuf>,
    port: Option<u16>,
    base_url: Option<String>,
    default_theme: Option<String>,
    data_dir: Option<PathBuf>,
    summary_interval: u64,
) -> anyhow::Result<()> {
    info!("dashboard server starting");

    let mut config = load_config(config_path.as_deref())?;
    apply_overrides(&mut config, port, base_url, default_theme, data_dir)?;

    let store = Arc::new(open_store(&config)?);
    info!(datasets = store.len(), "dataset store loaded");

    let metrics = Arc::new(ViewCounters::new(&registry::chart_ids()));

    // ── Shutdown signal ────────────────────────────────────────

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Background tasks ───────────────────────────────────────

    let summary_handle = tokio::spawn(fsc_metrics::run_summary_logger(
        Arc::clone(&metrics),
        Duration::from_secs(summary_interval),
        shutdown_rx,
    ));

    // ── HTTP server ────────────────────────────────────────────

    let router = fsc_api::build_router(Arc::clone(&store), Arc::clone(&metrics), &config);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port()));

    info!(%addr, base_url = %config.base_url(), "server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Graceful shutdown on Ctrl-C.
    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
        info!("shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    server.await?;

    // Wait for background tasks.
    let _ = summary_handle.await;

    info!("dashboard server stopped");
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<DashboardConfig> {
    match path {
        Some(path) => DashboardConfig::from_file(path),
        None => Ok(DashboardConfig::default()),
    }
}

fn apply_overrides(
    config: &mut DashboardConfig,
    port: Option<u16>,
    base_url: Option<String>,
    default_theme: Option<String>,
    data_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    if port.is_some() || base_url.is_some() {
        let server = config.server.get_or_insert_with(|| ServerConfig {
            port: None,
            base_url: None,
        });
        if port.is_some() {
            server.port = port;
        }
        if base_url.is_some() {
            server.base_url = base_url;
        }
    }

    if let Some(raw) = default_theme {
        let theme = parse_theme(&raw)?;
        let ui = config.ui.get_or_insert_with(|| UiConfig {
            default_theme: None,
            title: None,
        });
        ui.default_theme = Some(theme);
    }

    if let Some(dir) = data_dir {
        config.data = Some(DataConfig {
            dir: Some(dir.display().to_string()),
        });
    }

    Ok(())
}

fn open_store(config: &DashboardConfig) -> anyhow::Result<DatasetStore> {
    let store = match config.data_dir() {
        Some(dir) => DatasetStore::with_overrides(Path::new(dir))?,
        None => DatasetStore::embedded()?,
    };
    Ok(store)
}

fn parse_theme(raw: &str) -> anyhow::Result<Theme> {
    raw.parse()
        .map_err(|()| anyhow::anyhow!("unknown theme {raw:?}: expected light, dark, or system"))
}

// ── Snippet ────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn run_snippet(
    chart_id: &str,
    config_path: Option<PathBuf>,
    base_url: Option<String>,
    filter: Option<String>,
    view: Option<String>,
    no_title: bool,
    no_source: bool,
    theme: Option<String>,
    compact: bool,
) -> anyhow::Result<()> {
    let config = load_config(config_path.as_deref())?;
    let base_url = base_url.unwrap_or_else(|| config.base_url());
    let store = open_store(&config)?;

    let descriptor = registry::find(chart_id).ok_or_else(|| {
        anyhow::anyhow!("unknown chart {chart_id:?}; run `fscd charts` to list ids")
    })?;

    let theme = theme.as_deref().map(parse_theme).transpose()?;
    let options = EmbedOptions {
        filter,
        view,
        show_title: !no_title,
        show_source: !no_source,
        theme,
        compact,
    };

    let query = ChartQuery::from_options(&options);
    let chart = registry::build(&store, descriptor.chart_id, &query)?;
    let snippet = fsc_embed::generate(&base_url, &chart.chart_id, &chart.title, &options)?;

    println!("{}", snippet.html);
    Ok(())
}

// ── Charts ─────────────────────────────────────────────────────

fn run_charts(format: &str) -> anyhow::Result<()> {
    let store = DatasetStore::embedded()?;

    match format {
        "json" => {
            let mut entries = Vec::new();
            for descriptor in registry::CHARTS {
                let chart = registry::build(&store, descriptor.chart_id, &ChartQuery::default())?;
                entries.push(serde_json::json!({
                    "chart_id": descriptor.chart_id,
                    "kind": descriptor.kind.as_str(),
                    "title": chart.title,
                    "unit": chart.unit,
                    "filters": descriptor.filters,
                    "views": descriptor.views,
                    "as_of": chart.as_of,
                }));
            }
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        "text" => {
            for descriptor in registry::CHARTS {
                let chart = registry::build(&store, descriptor.chart_id, &ChartQuery::default())?;
                let mut controls = String::new();
                if !descriptor.filters.is_empty() {
                    controls.push_str(&format!("  [filters: {}]", descriptor.filters.join(", ")));
                }
                if !descriptor.views.is_empty() {
                    controls.push_str(&format!("  [views: {}]", descriptor.views.join(", ")));
                }
                println!(
                    "{:<24} {:<4} {}{controls}",
                    descriptor.chart_id,
                    descriptor.kind.as_str(),
                    chart.title
                );
            }
        }
        other => anyhow::bail!("unknown format {other:?}: expected text or json"),
    }

    Ok(())
}
