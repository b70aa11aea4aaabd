//! Watermark module for compositing overlay images onto uploads.
//!
//! This module implements the server-side watermarking applied to images
//! received by the upload endpoint. Overlay assets are loaded once at
//! process start and shared read-only across all requests.
//!
//! # Features
//!
//! - **Two built-in plans**: corner badges (logo plus two brand icons) and
//!   a centered translucent full-width stamp
//! - **Proportional resizing**: one target dimension per overlay, the other
//!   derived from the aspect ratio
//! - **Alpha override**: a plan can force a uniform opacity onto an overlay
//! - **Fail-open friendly**: every failure is a typed error the shell can
//!   translate into "save the original bytes"
//!
//! # Example
//!
//! ```ignore
//! use hanko::watermark::{OverlayPlan, WatermarkProcessor};
//!
//! let plan = OverlayPlan::corner_badges(Path::new("public"))?;
//! let processor = WatermarkProcessor::new(plan);
//!
//! let stamped = processor.apply(&uploaded_bytes)?;
//! ```

pub mod compositor;
pub mod error;
pub mod plan;
pub mod position;
pub mod processor;

// Re-export main types for convenience
pub use compositor::{build_overlay_layer, composite};
pub use error::WatermarkError;
pub use plan::{OverlayPlan, OverlaySpec, ScaleRule};
pub use position::{
    calculate_position, Anchor, ImageDimensions, OverlayDimensions, PlacementPosition,
};
pub use processor::WatermarkProcessor;
