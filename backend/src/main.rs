//! mindstats server - survey dashboard and CSV viewer
//!
//! ```bash
//! mindstats                                  # Serve on 0.0.0.0:3000
//! mindstats --port 8080 --data my.csv        # Custom port and dataset
//! MINDSTATS_UPLOAD_DIR=/tmp/up mindstats     # Settings from the environment
//! ```
//!
//! A `.env` file in the working directory is loaded first.

use clap::Parser;
use mindstats::config::{
    AppConfig, DEFAULT_DATA_PATH, DEFAULT_INDEX_PREVIEW_ROWS, DEFAULT_UPLOAD_DIR,
    DEFAULT_VIEWER_PREVIEW_ROWS,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mindstats")]
#[command(about = "Mental Health in Tech survey dashboard and CSV viewer", long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long, env = "MINDSTATS_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "MINDSTATS_PORT", default_value = "3000")]
    port: u16,

    /// Survey CSV shown on the dashboard
    #[arg(short, long, env = "MINDSTATS_DATA", default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Directory for uploaded files (created if missing)
    #[arg(short, long, env = "MINDSTATS_UPLOAD_DIR", default_value = DEFAULT_UPLOAD_DIR)]
    upload_dir: PathBuf,

    /// Maximum upload request size in MiB
    #[arg(long, env = "MINDSTATS_MAX_UPLOAD_MB", default_value = "16")]
    max_upload_mb: usize,

    /// Rows shown on the dashboard
    #[arg(long, default_value_t = DEFAULT_INDEX_PREVIEW_ROWS)]
    index_rows: usize,

    /// Rows shown by the file viewer
    #[arg(long, default_value_t = DEFAULT_VIEWER_PREVIEW_ROWS)]
    viewer_rows: usize,
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        AppConfig {
            host: cli.host,
            port: cli.port,
            data_path: cli.data,
            upload_dir: cli.upload_dir,
            max_body_bytes: cli.max_upload_mb * 1024 * 1024,
            index_preview_rows: cli.index_rows,
            viewer_preview_rows: cli.viewer_rows,
            ..AppConfig::default()
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindstats=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from(Cli::parse());

    if let Err(e) = mindstats::server::start_server(config).await {
        tracing::error!("server stopped: {}", e);
        std::process::exit(1);
    }
}
