//! In-place downsampling of bundled theme images.
//!
//! Pidgin renders smileys inline with message text, so the bundle ships
//! small images even though the sources are rendered at 128px.

use std::path::Path;

use image::imageops::FilterType;
use image::GenericImageView;
use walkdir::WalkDir;

use crate::error::{Result, ThemeError};

/// Default output width in pixels.
pub const TARGET_WIDTH: u32 = 25;

/// Resize every `.png` in `theme_dir` to `target_width`, preserving aspect
/// ratio and overwriting each file in place. The manifest is excluded by
/// the extension check. Returns the number of images resized.
pub fn resize_all(theme_dir: &Path, target_width: u32) -> Result<usize> {
    let mut count = 0;

    for entry in WalkDir::new(theme_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| ThemeError::Io {
            path: theme_dir.to_path_buf(),
            message: format!("failed to list theme directory: {e}"),
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("png") {
            continue;
        }

        let img = image::open(path).map_err(|e| ThemeError::Io {
            path: path.to_path_buf(),
            message: format!("failed to open image: {e}"),
        })?;

        let ratio = f64::from(img.width()) / f64::from(target_width);
        let height = ((f64::from(img.height()) / ratio).round() as u32).max(1);

        img.resize_exact(target_width, height, FilterType::Lanczos3)
            .save(path)
            .map_err(|e| ThemeError::Io {
                path: path.to_path_buf(),
                message: format!("failed to write image: {e}"),
            })?;

        count += 1;
    }

    Ok(count)
}
