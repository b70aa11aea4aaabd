use clap::Parser;
use std::path::PathBuf;

use hanko::config::{self, AppConfig, StampStyle};
use hanko::server::Server;
use hanko::storage::Storage;
use hanko::watermark::WatermarkProcessor;

/// Hanko - image upload server with server-side watermark compositing
#[derive(Parser, Debug)]
#[command(name = "hanko")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory where uploaded images are stored (created if absent)
    #[arg(default_value = "uploads")]
    upload_dir: PathBuf,

    /// Listen address as host:port
    #[arg(short, long, default_value = "localhost:8000")]
    listen: String,

    /// Override the URL prefix embedded in returned links
    #[arg(long)]
    base_url: Option<String>,

    /// Watermark variant applied by /upload
    #[arg(long, value_enum, default_value_t = StampStyle::CornerBadges)]
    stamp: StampStyle,

    /// Override the output JPEG quality (1-100)
    #[arg(long)]
    quality: Option<u8>,

    /// Directory holding the overlay assets (logo and brand icons)
    #[arg(long, default_value = "public")]
    assets_dir: PathBuf,
}

#[tokio::main]
async fn main() {
    // Initialize logging subsystem
    hanko::logging::init_subscriber().expect("Failed to initialize logging subsystem");

    // Parse command-line arguments
    let args = Args::parse();
    let (host, port) = config::parse_listen(&args.listen);

    let config = AppConfig {
        upload_dir: args.upload_dir,
        host,
        port,
        base_url: args.base_url,
        stamp: args.stamp,
        quality: args.quality,
        assets_dir: args.assets_dir,
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let storage = Storage::open(&config.upload_dir).unwrap_or_else(|e| {
        eprintln!("Failed to create upload directory: {}", e);
        std::process::exit(1);
    });

    // Overlay assets failing to load is not fatal: the server still runs
    // and uploads are saved unmodified.
    let processor = match WatermarkProcessor::from_config(&config) {
        Ok(processor) => Some(processor),
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Watermark assets unavailable, uploads will be saved unmodified"
            );
            None
        }
    };

    tracing::info!(
        upload_dir = %config.upload_dir.display(),
        base_url = %config.base_url(),
        stamp = ?config.stamp,
        "Configuration loaded successfully"
    );

    let server = Server::bind(config, storage, processor)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Failed to bind listener: {}", e);
            std::process::exit(1);
        });

    tracing::info!(address = %server.local_addr(), "Starting Hanko upload server");

    if let Err(e) = server.serve().await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
