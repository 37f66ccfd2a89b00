//! Font discovery and glyph rasterization.
//!
//! TrueType/OpenType faces are loaded with `ab_glyph` from a list of
//! well-known system paths per role. When none can be loaded the role falls
//! back to a built-in 5x7 bitmap face so generation never fails on a
//! font-less machine.

use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRole {
    Sans,
    SansRegular,
    Mono,
}

impl fmt::Display for FontRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FontRole::Sans => "sans",
            FontRole::SansRegular => "sans_regular",
            FontRole::Mono => "mono",
        };
        f.write_str(s)
    }
}

impl FontRole {
    fn system_candidates(&self) -> &'static [&'static str] {
        match self {
            FontRole::Sans => &[
                "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
                "/usr/share/fonts/truetype/lato/Lato-Bold.ttf",
                "/System/Library/Fonts/Helvetica.ttc",
                "C:\\Windows\\Fonts\\arial.ttf",
            ],
            FontRole::SansRegular => &[
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
                "/usr/share/fonts/truetype/lato/Lato-Regular.ttf",
                "/System/Library/Fonts/Helvetica.ttc",
                "C:\\Windows\\Fonts\\arial.ttf",
            ],
            FontRole::Mono => &[
                "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
                "/System/Library/Fonts/Courier.ttc",
                "C:\\Windows\\Fonts\\consola.ttf",
            ],
        }
    }
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
/// Extra font paths from config (`[fonts]`), tried before system paths.
pub struct FontPaths {
    pub sans: Vec<PathBuf>,
    pub sans_regular: Vec<PathBuf>,
    pub mono: Vec<PathBuf>,
}

impl FontPaths {
    fn for_role(&self, role: FontRole) -> &[PathBuf] {
        match role {
            FontRole::Sans => &self.sans,
            FontRole::SansRegular => &self.sans_regular,
            FontRole::Mono => &self.mono,
        }
    }
}

/// A renderable face.
pub enum Face {
    Outline(FontVec),
    Bitmap,
}

impl Face {
    /// Load the first usable font file among `paths`.
    pub fn load_first(paths: &[PathBuf]) -> Option<Face> {
        for path in paths {
            if !path.is_file() {
                continue;
            }
            match load_font(path) {
                Ok(font) => {
                    log::debug!("loaded font {}", path.display());
                    return Some(Face::Outline(font));
                }
                Err(e) => log::warn!("could not load font {}: {}", path.display(), e),
            }
        }
        None
    }

    pub fn is_bitmap(&self) -> bool {
        matches!(self, Face::Bitmap)
    }

    /// Text box `(width, height)` at pixel `size`.
    pub fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        match self {
            Face::Outline(font) => {
                let scaled = font.as_scaled(PxScale::from(size));
                let mut width = 0.0;
                let mut prev: Option<GlyphId> = None;
                for ch in text.chars() {
                    let id = scaled.glyph_id(ch);
                    if let Some(p) = prev {
                        width += scaled.kern(p, id);
                    }
                    width += scaled.h_advance(id);
                    prev = Some(id);
                }
                (width, scaled.ascent() - scaled.descent())
            }
            Face::Bitmap => {
                let scale = bitmap_scale(size);
                let n = text.chars().count() as i64;
                if n == 0 {
                    return (0.0, (GLYPH_ROWS * scale) as f32);
                }
                let w = n * GLYPH_ADVANCE * scale - scale;
                (w as f32, (GLYPH_ROWS * scale) as f32)
            }
        }
    }

    /// Rasterize `text` with its top-left corner at `origin`, calling
    /// `plot(x, y, coverage)` for every inked pixel.
    pub fn render(&self, text: &str, size: f32, origin: (f32, f32), mut plot: impl FnMut(i64, i64, f32)) {
        match self {
            Face::Outline(font) => {
                let scaled = font.as_scaled(PxScale::from(size));
                let mut caret = point(origin.0, origin.1 + scaled.ascent());
                let mut prev: Option<GlyphId> = None;
                for ch in text.chars() {
                    let id = scaled.glyph_id(ch);
                    if let Some(p) = prev {
                        caret.x += scaled.kern(p, id);
                    }
                    let glyph = id.with_scale_and_position(scaled.scale(), caret);
                    caret.x += scaled.h_advance(id);
                    prev = Some(id);
                    if let Some(outlined) = font.outline_glyph(glyph) {
                        let bounds = outlined.px_bounds();
                        let (bx, by) = (bounds.min.x as i64, bounds.min.y as i64);
                        outlined.draw(|gx, gy, cov| plot(bx + i64::from(gx), by + i64::from(gy), cov));
                    }
                }
            }
            Face::Bitmap => {
                let scale = bitmap_scale(size);
                let x0 = origin.0.round() as i64;
                let y0 = origin.1.round() as i64;
                for (i, ch) in text.chars().enumerate() {
                    let Some(rows) = bitmap_glyph(ch) else {
                        continue;
                    };
                    let gx = x0 + i as i64 * GLYPH_ADVANCE * scale;
                    for (row, bits) in rows.iter().enumerate() {
                        for col in 0..5i64 {
                            if bits & (0b10000 >> col) == 0 {
                                continue;
                            }
                            let px = gx + col * scale;
                            let py = y0 + row as i64 * scale;
                            for dy in 0..scale {
                                for dx in 0..scale {
                                    plot(px + dx, py + dy, 1.0);
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn load_font(path: &Path) -> Result<FontVec, String> {
    let data = fs::read(path).map_err(|e| e.to_string())?;
    let is_collection = path
        .extension()
        .map_or(false, |e| e.eq_ignore_ascii_case("ttc"));
    let font = if is_collection {
        FontVec::try_from_vec_and_index(data, 0)
    } else {
        FontVec::try_from_vec(data)
    };
    font.map_err(|e| e.to_string())
}

/// Faces for every role used by the generators.
pub struct FontSet {
    sans: Face,
    sans_regular: Face,
    mono: Face,
}

impl FontSet {
    /// Resolve each role from `extra` paths first, then system paths.
    pub fn discover(extra: &FontPaths) -> Self {
        let load = |role: FontRole| {
            let mut candidates: Vec<PathBuf> = extra.for_role(role).to_vec();
            candidates.extend(role.system_candidates().iter().map(PathBuf::from));
            Face::load_first(&candidates).unwrap_or_else(|| {
                log::warn!(
                    "no TrueType font found for {}, using built-in bitmap font",
                    role
                );
                Face::Bitmap
            })
        };
        Self {
            sans: load(FontRole::Sans),
            sans_regular: load(FontRole::SansRegular),
            mono: load(FontRole::Mono),
        }
    }

    /// Bitmap faces only; deterministic output regardless of installed fonts.
    pub fn bitmap_only() -> Self {
        Self {
            sans: Face::Bitmap,
            sans_regular: Face::Bitmap,
            mono: Face::Bitmap,
        }
    }

    pub fn face(&self, role: FontRole) -> &Face {
        match role {
            FontRole::Sans => &self.sans,
            FontRole::SansRegular => &self.sans_regular,
            FontRole::Mono => &self.mono,
        }
    }
}

const GLYPH_ROWS: i64 = 7;
const GLYPH_ADVANCE: i64 = 6;

/// Bitmap pixel size for a requested font size (cap height ~ 7/8 of size).
fn bitmap_scale(size: f32) -> i64 {
    ((size / 8.0).round() as i64).max(1)
}

fn bitmap_glyph(ch: char) -> Option<&'static [u8; 7]> {
    let up = ch.to_ascii_uppercase();
    BITMAP_GLYPHS
        .iter()
        .find(|(c, _)| *c == up)
        .map(|(_, rows)| rows)
}

#[rustfmt::skip]
const BITMAP_GLYPHS: &[(char, [u8; 7])] = &[
    (' ', [0, 0, 0, 0, 0, 0, 0]),
    ('A', [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001]),
    ('B', [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110]),
    ('C', [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110]),
    ('D', [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110]),
    ('E', [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111]),
    ('F', [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000]),
    ('G', [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111]),
    ('H', [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001]),
    ('I', [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110]),
    ('J', [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100]),
    ('K', [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001]),
    ('L', [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111]),
    ('M', [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001]),
    ('N', [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001]),
    ('O', [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
    ('P', [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000]),
    ('Q', [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101]),
    ('R', [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001]),
    ('S', [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110]),
    ('T', [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100]),
    ('U', [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
    ('V', [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100]),
    ('W', [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010]),
    ('X', [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001]),
    ('Y', [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100]),
    ('Z', [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111]),
    ('0', [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110]),
    ('1', [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110]),
    ('2', [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111]),
    ('3', [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110]),
    ('4', [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010]),
    ('5', [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110]),
    ('6', [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110]),
    ('7', [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000]),
    ('8', [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110]),
    ('9', [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100]),
    ('.', [0, 0, 0, 0, 0, 0b01100, 0b01100]),
    (',', [0, 0, 0, 0, 0b01100, 0b00100, 0b01000]),
    (':', [0, 0b01100, 0b01100, 0, 0b01100, 0b01100, 0]),
    (';', [0, 0b01100, 0b01100, 0, 0b01100, 0b00100, 0b01000]),
    ('-', [0, 0, 0, 0b11111, 0, 0, 0]),
    ('_', [0, 0, 0, 0, 0, 0, 0b11111]),
    ('=', [0, 0, 0b11111, 0, 0b11111, 0, 0]),
    ('(', [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010]),
    (')', [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000]),
    ('[', [0b01110, 0b01000, 0b01000, 0b01000, 0b01000, 0b01000, 0b01110]),
    (']', [0b01110, 0b00010, 0b00010, 0b00010, 0b00010, 0b00010, 0b01110]),
    ('/', [0, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0]),
    ('•', [0, 0, 0b01110, 0b01110, 0b01110, 0, 0]),
];
