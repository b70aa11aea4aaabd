//! Position calculation for overlay placement.
//!
//! This module provides functions to calculate where overlays should be
//! placed on images based on the configured anchor.
//!
//! # Anchors
//!
//! - **TopRight**: inset by the margin from the top and right edges
//! - **BottomLeft** / **BottomRight**: flush to the bottom edge (margin 0
//!   in the built-in plans)
//! - **Center**: centered on both axes
//!
//! # Example
//!
//! ```
//! use hanko::watermark::position::{calculate_position, ImageDimensions, OverlayDimensions};
//! use hanko::watermark::Anchor;
//!
//! let image = ImageDimensions { width: 800, height: 600 };
//! let overlay = OverlayDimensions { width: 100, height: 50 };
//!
//! let pos = calculate_position(Anchor::TopRight, &image, &overlay, 20);
//! assert_eq!((pos.x, pos.y), (680, 20)); // 800 - 100 - 20, 20
//! ```

/// Overlay anchor on the base image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

/// Dimensions of the base image.
#[derive(Debug, Clone, Copy)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Dimensions of the overlay to be placed.
#[derive(Debug, Clone, Copy)]
pub struct OverlayDimensions {
    pub width: u32,
    pub height: u32,
}

/// A single position where an overlay should be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementPosition {
    pub x: i32,
    pub y: i32,
}

impl PlacementPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Calculate the position for a single overlay placement.
///
/// # Arguments
///
/// * `anchor` - The configured anchor
/// * `image` - Dimensions of the base image
/// * `overlay` - Dimensions of the overlay
/// * `margin` - Margin from the anchored edges in pixels
///
/// # Returns
///
/// The (x, y) coordinates where the overlay should be placed.
/// Coordinates may be negative if the overlay is larger than the image.
pub fn calculate_position(
    anchor: Anchor,
    image: &ImageDimensions,
    overlay: &OverlayDimensions,
    margin: u32,
) -> PlacementPosition {
    let img_w = image.width as i32;
    let img_h = image.height as i32;
    let ov_w = overlay.width as i32;
    let ov_h = overlay.height as i32;
    let m = margin as i32;

    match anchor {
        Anchor::TopRight => PlacementPosition::new(img_w - ov_w - m, m),
        Anchor::BottomLeft => PlacementPosition::new(m, img_h - ov_h - m),
        Anchor::BottomRight => PlacementPosition::new(img_w - ov_w - m, img_h - ov_h - m),
        Anchor::Center => PlacementPosition::new((img_w - ov_w) / 2, (img_h - ov_h) / 2),
    }
}
