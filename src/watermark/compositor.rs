//! Overlay compositor for blending watermark overlays onto images.
//!
//! This module implements the one algorithm both built-in plans share:
//!
//! 1. Build a fully transparent layer the exact size of the base image.
//! 2. For each overlay in plan order: resize it to the dimension implied by
//!    its scale rule (the other dimension is derived from the aspect ratio),
//!    apply the alpha override if the spec carries one, and blend it onto
//!    the layer at its anchor-computed position.
//! 3. Alpha-composite the layer over the base image (Porter-Duff "over").
//! 4. Flatten the result to RGB.
//!
//! The composited result always has the same dimensions as the base image
//! and never carries an alpha channel.

use image::{imageops, DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

use super::error::WatermarkError;
use super::plan::{OverlayPlan, OverlaySpec, ScaleRule};
use super::position::{calculate_position, ImageDimensions, OverlayDimensions};

/// Composite all overlays of `plan` onto `base`.
pub fn composite(base: &DynamicImage, plan: &OverlayPlan) -> Result<RgbImage, WatermarkError> {
    let dims = ImageDimensions {
        width: base.width(),
        height: base.height(),
    };

    let layer = build_overlay_layer(&dims, plan)?;

    let mut rgba = base.to_rgba8();
    blend_onto(&mut rgba, &layer, 0, 0);

    Ok(flatten(&rgba))
}

/// Build the transparent overlay layer for a plan.
///
/// The layer is the exact size of the base image with every overlay already
/// resized, alpha-adjusted and placed. Blending this layer over the base is
/// the final compositing step.
pub fn build_overlay_layer(
    base: &ImageDimensions,
    plan: &OverlayPlan,
) -> Result<RgbaImage, WatermarkError> {
    if base.width == 0 || base.height == 0 {
        return Err(WatermarkError::CompositeError(format!(
            "base image has zero dimension ({}x{})",
            base.width, base.height
        )));
    }

    let mut layer = RgbaImage::from_pixel(base.width, base.height, Rgba([0, 0, 0, 0]));

    for spec in plan.overlays() {
        let mut resized = resize_overlay(spec, base);

        if let Some(alpha) = spec.opacity_override {
            override_alpha(&mut resized, alpha);
        }

        let overlay_dims = OverlayDimensions {
            width: resized.width(),
            height: resized.height(),
        };
        let pos = calculate_position(spec.anchor, base, &overlay_dims, spec.margin);

        blend_onto(&mut layer, &resized, pos.x, pos.y);
    }

    Ok(layer)
}

/// Resize an overlay to the target implied by its scale rule, preserving
/// the aspect ratio. The derived dimension is truncated, never rounded up,
/// and both dimensions are kept at least 1.
fn resize_overlay(spec: &OverlaySpec, base: &ImageDimensions) -> RgbaImage {
    let src_w = spec.asset.width() as f32;
    let src_h = spec.asset.height() as f32;

    let (target_w, target_h) = match spec.scale {
        ScaleRule::FractionOfWidth => {
            let w = (base.width as f32 * spec.factor) as u32;
            (w, (src_h * (w as f32 / src_w)) as u32)
        }
        ScaleRule::FractionOfHeight => {
            let h = (base.height as f32 * spec.factor) as u32;
            ((src_w * (h as f32 / src_h)) as u32, h)
        }
        ScaleRule::FullWidth => {
            let w = base.width;
            (w, (src_h * (w as f32 / src_w)) as u32)
        }
    };

    let target_w = target_w.max(1);
    let target_h = target_h.max(1);

    if target_w == spec.asset.width() && target_h == spec.asset.height() {
        return spec.asset.clone();
    }

    imageops::resize(
        &spec.asset,
        target_w,
        target_h,
        imageops::FilterType::Lanczos3,
    )
}

/// Rewrite every pixel's alpha channel to a fixed value, regardless of the
/// source alpha.
fn override_alpha(image: &mut RgbaImage, alpha: u8) {
    for pixel in image.pixels_mut() {
        pixel[3] = alpha;
    }
}

/// Blend an overlay onto the target image at the given position.
///
/// The visible region is clamped to the target bounds, so overlays that
/// extend past an edge (or start at a negative origin) are clipped.
fn blend_onto(target: &mut RgbaImage, overlay: &RgbaImage, x: i32, y: i32) {
    let target_width = target.width() as i32;
    let target_height = target.height() as i32;

    let ov_width = overlay.width() as i32;
    let ov_height = overlay.height() as i32;

    let x_start = x.max(0);
    let y_start = y.max(0);
    let x_end = (x + ov_width).min(target_width);
    let y_end = (y + ov_height).min(target_height);

    for ty in y_start..y_end {
        for tx in x_start..x_end {
            let ox = (tx - x) as u32;
            let oy = (ty - y) as u32;

            let ov_pixel = overlay.get_pixel(ox, oy);
            let target_pixel = target.get_pixel(tx as u32, ty as u32);

            let blended = blend_pixels(*target_pixel, *ov_pixel);
            target.put_pixel(tx as u32, ty as u32, blended);
        }
    }
}

/// Blend two pixels using alpha compositing.
///
/// Uses the "over" operator: result = foreground + background * (1 - foreground.alpha)
fn blend_pixels(background: Rgba<u8>, foreground: Rgba<u8>) -> Rgba<u8> {
    // A fully transparent side contributes nothing; returning the other
    // pixel unchanged also keeps overridden alpha values exact.
    if background[3] == 0 {
        return foreground;
    }
    if foreground[3] == 0 {
        return background;
    }

    let fg_alpha = foreground[3] as f32 / 255.0;
    let bg_alpha = background[3] as f32 / 255.0;

    // Porter-Duff "over" operator
    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let fg_f = fg as f32 / 255.0;
        let bg_f = bg as f32 / 255.0;
        let result = (fg_f * fg_alpha + bg_f * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        (result * 255.0).clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0) as u8,
    ])
}

/// Drop the alpha channel, keeping the blended color values as-is.
fn flatten(rgba: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let p = rgba.get_pixel(x, y);
        Rgb([p[0], p[1], p[2]])
    })
}
