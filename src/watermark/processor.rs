//! Watermark processor: the bytes-in/bytes-out pipeline.
//!
//! Wraps decode → composite → encode behind one call so the HTTP shell
//! never touches pixel buffers. The processor owns the overlay plan loaded
//! at startup; it is immutable afterwards and safe to share across
//! concurrent requests.
//!
//! Failures are returned as [`WatermarkError`], never panics: the caller
//! decides whether to fall back to the unmodified upload.

use image::DynamicImage;

use super::error::WatermarkError;
use super::plan::OverlayPlan;
use crate::codec;
use crate::config::{AppConfig, StampStyle};

/// Applies the configured overlay plan to uploaded images.
#[derive(Debug, Clone)]
pub struct WatermarkProcessor {
    plan: OverlayPlan,
}

impl WatermarkProcessor {
    pub fn new(plan: OverlayPlan) -> Self {
        Self { plan }
    }

    /// Build the processor for the configured stamp style, loading overlay
    /// assets from the configured assets directory.
    pub fn from_config(config: &AppConfig) -> Result<Self, WatermarkError> {
        let plan = match config.stamp {
            StampStyle::CornerBadges => OverlayPlan::corner_badges(&config.assets_dir)?,
            StampStyle::CenteredStamp => OverlayPlan::centered_stamp(&config.assets_dir)?,
        };

        let plan = match config.quality {
            Some(quality) => plan.with_quality(quality),
            None => plan,
        };

        Ok(Self::new(plan))
    }

    /// Decode `data`, composite the plan's overlays onto it, and encode the
    /// result as JPEG at the plan's quality.
    pub fn apply(&self, data: &[u8]) -> Result<Vec<u8>, WatermarkError> {
        let base = codec::decode(data).map_err(|e| WatermarkError::DecodeError(e.to_string()))?;

        let composed = super::compositor::composite(&base, &self.plan)?;

        codec::encode_jpeg(&DynamicImage::ImageRgb8(composed), self.plan.quality())
            .map_err(|e| WatermarkError::EncodeError(e.to_string()))
    }
}
