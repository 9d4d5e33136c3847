//! PNG artifacts: raw screenshots and the stacked per-account composite.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{imageops, DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::error::StoreError;

/// Writes already-encoded PNG bytes to `path`.
///
/// # Errors
///
/// Returns [`StoreError::Io`] on write failure.
pub fn write_png(path: &Path, png: &[u8]) -> Result<(), StoreError> {
    fs::write(path, png).map_err(|e| StoreError::io(path, e))
}

/// Stacks PNG images top to bottom on a white canvas as wide as the widest
/// input, returning the encoded result.
///
/// # Errors
///
/// Returns [`StoreError::EmptyComposite`] for no input, or
/// [`StoreError::Image`] if an input cannot be decoded.
pub fn compose_vertical(pngs: &[Vec<u8>]) -> Result<Vec<u8>, StoreError> {
    if pngs.is_empty() {
        return Err(StoreError::EmptyComposite);
    }

    let decoded = pngs
        .iter()
        .map(|bytes| {
            image::load_from_memory_with_format(bytes, ImageFormat::Png).map(|img| img.to_rgba8())
        })
        .collect::<Result<Vec<_>, _>>()?;

    let width = decoded.iter().map(RgbaImage::width).max().unwrap_or(0);
    let height = decoded.iter().map(RgbaImage::height).sum();
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));

    let mut top = 0_i64;
    for img in &decoded {
        imageops::overlay(&mut canvas, img, 0, top);
        top += i64::from(img.height());
    }

    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(canvas).write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Composes `pngs` with [`compose_vertical`] and writes the result.
///
/// # Errors
///
/// See [`compose_vertical`] and [`write_png`].
pub fn write_composite(path: &Path, pngs: &[Vec<u8>]) -> Result<(), StoreError> {
    let composite = compose_vertical(pngs)?;
    write_png(path, &composite)?;
    tracing::debug!(path = %path.display(), parts = pngs.len(), "composite written");
    Ok(())
}
