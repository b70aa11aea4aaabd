//! Overlay plan definitions.
//!
//! An [`OverlayPlan`] is an ordered list of [`OverlaySpec`]s plus the output
//! quality for the variant, so both built-in watermark behaviors are
//! expressed as data over one compositing algorithm rather than as separate
//! code paths.
//!
//! Plans are built once at process start from static asset paths and shared
//! read-only across all requests; nothing here is mutated after load.

use std::path::Path;

use image::RgbaImage;

use super::error::WatermarkError;
use super::position::Anchor;
use crate::codec;

// Asset file names expected under the configured assets directory.
const LOGO_FILE: &str = "logo.png";
const LEFT_ICON_FILE: &str = "insta.jpg";
const RIGHT_ICON_FILE: &str = "link.png";

// Corner-badges plan: logo at 20% of base width inset 20px top-right,
// icons at 5% and 6% of base height flush in the bottom corners.
const BADGE_LOGO_WIDTH_FRACTION: f32 = 0.20;
const BADGE_LOGO_MARGIN: u32 = 20;
const LEFT_ICON_HEIGHT_FRACTION: f32 = 0.05;
const RIGHT_ICON_HEIGHT_FRACTION: f32 = 0.06;

// Centered-stamp plan: full-width logo with every pixel's alpha forced to 80.
const STAMP_ALPHA: u8 = 80;

const BADGES_JPEG_QUALITY: u8 = 100;
const STAMP_JPEG_QUALITY: u8 = 95;

/// How an overlay is scaled relative to the base image.
///
/// The scale rule fixes one target dimension; the other is always derived
/// from the overlay's aspect ratio, never specified independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleRule {
    /// Target width is `factor * base_width`
    FractionOfWidth,
    /// Target height is `factor * base_height`
    FractionOfHeight,
    /// Target width equals the base width (factor ignored)
    FullWidth,
}

/// A single overlay: its pixel data and the rules for sizing and placing it.
#[derive(Clone)]
pub struct OverlaySpec {
    /// The overlay image (RGBA)
    pub asset: RgbaImage,
    /// Scale rule relative to the base image
    pub scale: ScaleRule,
    /// Scale factor in (0, 1]
    pub factor: f32,
    /// Where the overlay is anchored on the base image
    pub anchor: Anchor,
    /// Margin from the anchored edges in pixels
    pub margin: u32,
    /// When set, every pixel's alpha is rewritten to this value
    pub opacity_override: Option<u8>,
}

impl std::fmt::Debug for OverlaySpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlaySpec")
            .field("dimensions", &(self.asset.width(), self.asset.height()))
            .field("scale", &self.scale)
            .field("factor", &self.factor)
            .field("anchor", &self.anchor)
            .field("margin", &self.margin)
            .field("opacity_override", &self.opacity_override)
            .finish()
    }
}

/// An ordered set of overlays plus the output quality for the variant.
///
/// Overlays are composited in definition order, so later entries stack on
/// top of earlier ones when they overlap.
#[derive(Debug, Clone)]
pub struct OverlayPlan {
    overlays: Vec<OverlaySpec>,
    quality: u8,
}

impl OverlayPlan {
    /// Build a plan from explicit overlay specs.
    pub fn from_overlays(overlays: Vec<OverlaySpec>, quality: u8) -> Self {
        Self {
            overlays,
            quality: quality.clamp(1, 100),
        }
    }

    /// Build the corner-badges plan: logo top-right with a 20px inset, the
    /// two brand icons flush in the bottom corners, all at native opacity.
    pub fn corner_badges(assets_dir: &Path) -> Result<Self, WatermarkError> {
        let logo = load_overlay_asset(&assets_dir.join(LOGO_FILE))?;
        let left_icon = load_overlay_asset(&assets_dir.join(LEFT_ICON_FILE))?;
        let right_icon = load_overlay_asset(&assets_dir.join(RIGHT_ICON_FILE))?;

        Ok(Self {
            overlays: vec![
                OverlaySpec {
                    asset: logo,
                    scale: ScaleRule::FractionOfWidth,
                    factor: BADGE_LOGO_WIDTH_FRACTION,
                    anchor: Anchor::TopRight,
                    margin: BADGE_LOGO_MARGIN,
                    opacity_override: None,
                },
                OverlaySpec {
                    asset: left_icon,
                    scale: ScaleRule::FractionOfHeight,
                    factor: LEFT_ICON_HEIGHT_FRACTION,
                    anchor: Anchor::BottomLeft,
                    margin: 0,
                    opacity_override: None,
                },
                OverlaySpec {
                    asset: right_icon,
                    scale: ScaleRule::FractionOfHeight,
                    factor: RIGHT_ICON_HEIGHT_FRACTION,
                    anchor: Anchor::BottomRight,
                    margin: 0,
                    opacity_override: None,
                },
            ],
            quality: BADGES_JPEG_QUALITY,
        })
    }

    /// Build the centered-stamp plan: the logo scaled to the full base
    /// width, forced to a uniform low alpha, centered on both axes.
    pub fn centered_stamp(assets_dir: &Path) -> Result<Self, WatermarkError> {
        let logo = load_overlay_asset(&assets_dir.join(LOGO_FILE))?;

        Ok(Self {
            overlays: vec![OverlaySpec {
                asset: logo,
                scale: ScaleRule::FullWidth,
                factor: 1.0,
                anchor: Anchor::Center,
                margin: 0,
                opacity_override: Some(STAMP_ALPHA),
            }],
            quality: STAMP_JPEG_QUALITY,
        })
    }

    /// Override the plan's output JPEG quality.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }

    pub fn overlays(&self) -> &[OverlaySpec] {
        &self.overlays
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }
}

/// Load an overlay asset from disk into an RGBA buffer.
///
/// A missing file is reported as `AssetMissing` so the caller can
/// distinguish a deployment problem from a corrupt asset.
fn load_overlay_asset(path: &Path) -> Result<RgbaImage, WatermarkError> {
    if !path.exists() {
        return Err(WatermarkError::AssetMissing(path.display().to_string()));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| WatermarkError::DecodeError(format!("{}: {}", path.display(), e)))?;

    codec::decode(&bytes)
        .map(|img| img.to_rgba8())
        .map_err(|e| WatermarkError::DecodeError(format!("{}: {}", path.display(), e)))
}
