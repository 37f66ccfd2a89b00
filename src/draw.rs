//! Minimal raster canvas on top of `image::RgbImage`.
//!
//! All primitives clip to the image bounds and take inclusive corner
//! coordinates, so `fill_rect(0, 0, w, 8, ..)` paints rows `0..=8`.

use crate::error::{AssetError, Result};
use crate::fonts::Face;
use image::{Rgb, RgbImage};
use regex::Regex;
use std::sync::OnceLock;

/// Parse `#RRGGBB` (case-insensitive) into an RGB pixel.
pub fn parse_color(s: &str) -> Result<Rgb<u8>> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^#([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})$").unwrap()
    });
    let caps = re
        .captures(s.trim())
        .ok_or_else(|| AssetError::InvalidColor(s.to_string()))?;
    let mut rgb = [0u8; 3];
    for (i, slot) in rgb.iter_mut().enumerate() {
        *slot = u8::from_str_radix(&caps[i + 1], 16)
            .map_err(|_| AssetError::InvalidColor(s.to_string()))?;
    }
    Ok(Rgb(rgb))
}

pub struct Canvas {
    img: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            img: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> i64 {
        i64::from(self.img.width())
    }

    pub fn height(&self) -> i64 {
        i64::from(self.img.height())
    }

    pub fn image(&self) -> &RgbImage {
        &self.img
    }

    pub fn into_image(self) -> RgbImage {
        self.img
    }

    /// Blend `color` over the pixel at `(x, y)` with `coverage` in `[0, 1]`.
    pub fn blend(&mut self, x: i64, y: i64, color: Rgb<u8>, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return;
        }
        let a = coverage.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let px = self.img.get_pixel_mut(x as u32, y as u32);
        for c in 0..3 {
            let dst = f32::from(px.0[c]);
            let src = f32::from(color.0[c]);
            px.0[c] = (dst + (src - dst) * a).round() as u8;
        }
    }

    pub fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
        let (xa, xb) = (x0.max(0), x1.min(self.width() - 1));
        let (ya, yb) = (y0.max(0), y1.min(self.height() - 1));
        for y in ya..=yb {
            for x in xa..=xb {
                self.img.put_pixel(x as u32, y as u32, color);
            }
        }
    }

    pub fn hline(&mut self, y: i64, color: Rgb<u8>) {
        let w = self.width();
        self.fill_rect(0, y, w - 1, y, color);
    }

    pub fn vline(&mut self, x: i64, color: Rgb<u8>) {
        let h = self.height();
        self.fill_rect(x, 0, x, h - 1, color);
    }

    /// Filled rectangle whose four corners are rounded with `radius`.
    pub fn fill_rounded_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, radius: i64, color: Rgb<u8>) {
        let r = radius.max(0).min((x1 - x0 + 1) / 2).min((y1 - y0 + 1) / 2);
        if r == 0 {
            self.fill_rect(x0, y0, x1, y1, color);
            return;
        }
        let rf = r as f32;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let cx = if x < x0 + r {
                    Some((x0 + r) as f32)
                } else if x > x1 - r {
                    Some((x1 - r + 1) as f32)
                } else {
                    None
                };
                let cy = if y < y0 + r {
                    Some((y0 + r) as f32)
                } else if y > y1 - r {
                    Some((y1 - r + 1) as f32)
                } else {
                    None
                };
                if let (Some(cx), Some(cy)) = (cx, cy) {
                    let dx = x as f32 + 0.5 - cx;
                    let dy = y as f32 + 0.5 - cy;
                    if dx * dx + dy * dy > rf * rf {
                        continue;
                    }
                }
                self.blend(x, y, color, 1.0);
            }
        }
    }

    /// Filled ellipse inscribed in the inclusive box `(x0, y0)-(x1, y1)`.
    pub fn fill_ellipse(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
        let rx = (x1 - x0 + 1) as f32 / 2.0;
        let ry = (y1 - y0 + 1) as f32 / 2.0;
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let cx = x0 as f32 + rx;
        let cy = y0 as f32 + ry;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let nx = (x as f32 + 0.5 - cx) / rx;
                let ny = (y as f32 + 0.5 - cy) / ry;
                if nx * nx + ny * ny <= 1.0 {
                    self.blend(x, y, color, 1.0);
                }
            }
        }
    }

    /// Draw `text` with its top-left corner at `(x, y)`.
    pub fn draw_text(&mut self, x: f32, y: f32, text: &str, face: &Face, size: f32, color: Rgb<u8>) {
        face.render(text, size, (x, y), |px, py, cov| self.blend(px, py, color, cov));
    }

    /// Draw `text` centered in the whole canvas.
    pub fn draw_text_centered(&mut self, text: &str, face: &Face, size: f32, color: Rgb<u8>) {
        let (tw, th) = face.measure(text, size);
        let x = (self.width() as f32 - tw) / 2.0;
        let y = (self.height() as f32 - th) / 2.0;
        self.draw_text(x, y, text, face, size, color);
    }
}
