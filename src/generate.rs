//! Placeholder image generation.
//!
//! Each `PlaceholderSpec` becomes a solid-color PNG with a white label in the
//! middle, written under the assets root.

use crate::draw::{parse_color, Canvas};
use crate::error::{AssetError, Result};
use crate::fonts::{FontRole, FontSet};
use crate::models::plan::PlaceholderSpec;
use image::Rgb;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const LABEL_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedAsset {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bytes: u64,
}

/// Generate every placeholder in `plan` under `assets_root`.
pub fn run_generate(assets_root: &Path, plan: &[PlaceholderSpec], fonts: &FontSet) -> Result<Vec<GeneratedAsset>> {
    let mut out = Vec::with_capacity(plan.len());
    for spec in plan {
        let path = assets_root.join(&spec.path);
        out.push(write_placeholder(&path, spec, fonts)?);
    }
    Ok(out)
}

/// Render a single placeholder to `path`, creating parent directories.
pub fn write_placeholder(path: &Path, spec: &PlaceholderSpec, fonts: &FontSet) -> Result<GeneratedAsset> {
    let canvas = render_placeholder(spec, fonts)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| AssetError::io(parent, e))?;
    }
    canvas
        .into_image()
        .save(path)
        .map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })?;
    let bytes = fs::metadata(path).map_err(|e| AssetError::io(path, e))?.len();
    log::debug!("wrote {} ({} bytes)", path.display(), bytes);
    Ok(GeneratedAsset {
        path: path.to_path_buf(),
        width: spec.width,
        height: spec.height,
        bytes,
    })
}

pub fn render_placeholder(spec: &PlaceholderSpec, fonts: &FontSet) -> Result<Canvas> {
    if spec.width == 0 || spec.height == 0 {
        return Err(AssetError::InvalidRule {
            category: spec.path.clone(),
            reason: format!("placeholder size {}x{} is empty", spec.width, spec.height),
        });
    }
    let fill = parse_color(&spec.color)?;
    let mut canvas = Canvas::new(spec.width, spec.height, fill);
    let size = label_size(spec.width, spec.height);
    canvas.draw_text_centered(&spec.label, fonts.face(FontRole::Sans), size, LABEL_COLOR);
    Ok(canvas)
}

/// Label pixel size: 1/16 of the shorter side, at least 12px.
fn label_size(width: u32, height: u32) -> f32 {
    (width.min(height) as f32 / 16.0).max(12.0)
}
