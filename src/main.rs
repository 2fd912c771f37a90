use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use map_widget::config::Config;
use map_widget::controller::MapDisplayController;
use map_widget::logging;
use map_widget::models::MapView;
use map_widget::page::MapPage;
use map_widget::registry::MapRegistry;
use map_widget::server::{self, AppState};

#[derive(Parser)]
#[command(name = "map-widget")]
#[command(about = "Render and serve interactive map widgets")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a map view (JSON) to HTML on stdout
    Render {
        /// JSON file describing the map view
        #[arg(long)]
        view: PathBuf,
        /// Force the compact sidebar layout
        #[arg(long)]
        sidebar: bool,
        /// Wrap the fragment in a full HTML page
        #[arg(long)]
        page: bool,
    },
    /// Serve registered maps over HTTP
    Serve {
        /// Port to listen on (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// List registered map names
    Maps,
}

fn render_view(config: &Config, path: &Path, sidebar: bool, page: bool) -> anyhow::Result<String> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read map view '{}'", path.display()))?;
    let mut view: MapView = serde_json::from_str(&content)
        .with_context(|| format!("Invalid map view in '{}'", path.display()))?;
    if sidebar {
        view.options = view.options.sidebar(true);
    }

    let controller = MapDisplayController::new(config.map.clone());
    let rendered = controller.render(&view)?;
    info!(eid = %rendered.eid, mode = ?rendered.mode, "Rendered map view");

    if page {
        Ok(MapPage::new(view.eid.clone(), config.map.library_url.clone())
            .with_map(rendered)
            .render()?)
    } else {
        Ok(rendered.html)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::resolve(cli.config.as_deref()).context("Failed to load configuration")?;
    logging::init_logging(&config.logging);

    match cli.command {
        Commands::Render { view, sidebar, page } => match render_view(&config, &view, sidebar, page) {
            Ok(html) => println!("{html}"),
            Err(e) => {
                error!("Render failed: {:#}", e);
                return Err(e);
            }
        },
        Commands::Serve { port } => {
            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            let state = AppState::new(MapRegistry::with_defaults(), &config);
            server::start_server(state, &config).await?;
        }
        Commands::Maps => {
            for name in MapRegistry::with_defaults().names() {
                println!("{name}");
            }
        }
    }
    Ok(())
}
