// Configuration module

use std::path::PathBuf;

use clap::ValueEnum;

/// Default port when the listen address carries none (or an unparseable one).
pub const DEFAULT_PORT: u16 = 8000;

/// Default host for the listener.
pub const DEFAULT_HOST: &str = "localhost";

/// Which built-in overlay plan the upload pipeline uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StampStyle {
    /// Logo top-right plus two brand icons in the bottom corners
    CornerBadges,
    /// Single full-width translucent logo, centered
    CenteredStamp,
}

/// Immutable application configuration, constructed once at startup and
/// passed explicitly to the HTTP shell and the watermark pipeline.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory where uploaded images are persisted (created if absent)
    pub upload_dir: PathBuf,
    /// Host to bind the listener to
    pub host: String,
    /// Port to bind the listener to
    pub port: u16,
    /// Explicit override for the URL prefix embedded in returned links.
    /// When unset, links use `http://{host}:{port}`.
    pub base_url: Option<String>,
    /// Overlay plan selection for `/upload`
    pub stamp: StampStyle,
    /// Optional override of the plan's output JPEG quality (1-100)
    pub quality: Option<u8>,
    /// Directory holding the overlay assets (logo and brand icons)
    pub assets_dir: PathBuf,
}

impl AppConfig {
    /// URL prefix for links returned by `/upload` and `/list`.
    pub fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://{}:{}", self.host, self.port),
        }
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(q) = self.quality {
            if !(1..=100).contains(&q) {
                return Err(format!("Quality {} out of range, must be 1-100", q));
            }
        }

        if self.host.is_empty() {
            return Err("Listen host cannot be empty".to_string());
        }

        Ok(())
    }
}

/// Parse a `host:port` listen spec.
///
/// A missing port falls back to [`DEFAULT_PORT`]; an unparseable port is
/// logged and replaced by the default rather than aborting startup.
pub fn parse_listen(spec: &str) -> (String, u16) {
    match spec.split_once(':') {
        Some((host, port_str)) => {
            let port = match port_str.parse::<u16>() {
                Ok(p) => p,
                Err(_) => {
                    tracing::warn!(
                        port = port_str,
                        default = DEFAULT_PORT,
                        "Invalid port number, using default"
                    );
                    DEFAULT_PORT
                }
            };
            (host.to_string(), port)
        }
        None => (spec.to_string(), DEFAULT_PORT),
    }
}
