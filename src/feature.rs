//! Feature graphic composer (1024x500 store banner).
//!
//! Layout, back to front: background, 40px grid, accent bars, left text block,
//! code panel with window dots and highlighted lines.

use crate::draw::Canvas;
use crate::error::{AssetError, Result};
use crate::fonts::{FontRole, FontSet};
use crate::models::plan::FeatureText;
use image::{Rgb, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const WIDTH: u32 = 1024;
pub const HEIGHT: u32 = 500;
/// Store upload ceiling for the feature graphic.
pub const MAX_BYTES: u64 = 15 * 1024 * 1024;

const BG: Rgb<u8> = Rgb([0x0B, 0x0F, 0x14]);
const GRID: Rgb<u8> = Rgb([0x1A, 0x21, 0x28]);
const TOP_BAR: Rgb<u8> = Rgb([0x00, 0xAD, 0xFF]);
const BOTTOM_BAR: Rgb<u8> = Rgb([0xFF, 0x47, 0x57]);
const CODE_BG: Rgb<u8> = Rgb([0x12, 0x1E, 0x28]);
const TITLE: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);
const SUBTITLE: Rgb<u8> = Rgb([0xB0, 0xB8, 0xC0]);
const META: Rgb<u8> = Rgb([0x6B, 0x72, 0x80]);
const DOTS: [Rgb<u8>; 3] = [
    Rgb([0xFF, 0x5F, 0x57]),
    Rgb([0xFE, 0xBC, 0x2E]),
    Rgb([0x28, 0xC8, 0x40]),
];

const GRID_SPACING: usize = 40;
const BAR_HEIGHT: i64 = 8;
const PANEL_W: i64 = 460;
const PANEL_H: i64 = 320;
const PANEL_RADIUS: i64 = 12;
const LINE_HEIGHT: f32 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Token class of a code line, picks its highlight color.
enum Token {
    Module,
    Proc,
    Move,
    Wait,
    EndProc,
}

impl Token {
    fn color(self) -> Rgb<u8> {
        match self {
            Token::Module | Token::EndProc => Rgb([0x6A, 0xD0, 0xFF]),
            Token::Proc => Rgb([0xA0, 0xC8, 0xFF]),
            Token::Move => Rgb([0x00, 0xAD, 0xFF]),
            Token::Wait => Rgb([0x00, 0xDC, 0xA0]),
        }
    }
}

const CODE_LINES: [(&str, Token); 6] = [
    ("MODULE MainModule", Token::Module),
    ("  PROC main()", Token::Proc),
    ("    MoveJ [[600,0,600],[1,0,0,0],...];", Token::Move),
    ("    WaitTime 2;", Token::Wait),
    ("  ENDPROC", Token::EndProc),
    ("ENDMODULE", Token::Module),
];

#[derive(Debug, Clone, Serialize)]
pub struct FeatureOutcome {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bytes: u64,
    pub within_limit: bool,
}

impl FeatureOutcome {
    /// 1 when the written file is over the upload ceiling.
    pub fn exit_status(&self) -> u8 {
        if self.within_limit {
            0
        } else {
            1
        }
    }
}

/// Compose the feature graphic in memory.
pub fn compose_feature_graphic(text: &FeatureText, fonts: &FontSet) -> RgbImage {
    let mut canvas = Canvas::new(WIDTH, HEIGHT, BG);
    draw_grid(&mut canvas);
    draw_bars(&mut canvas);
    draw_left_text(&mut canvas, text, fonts);
    draw_code_panel(&mut canvas, fonts);
    canvas.into_image()
}

fn draw_grid(canvas: &mut Canvas) {
    for x in (0..canvas.width()).step_by(GRID_SPACING) {
        canvas.vline(x, GRID);
    }
    for y in (0..canvas.height()).step_by(GRID_SPACING) {
        canvas.hline(y, GRID);
    }
}

fn draw_bars(canvas: &mut Canvas) {
    let (w, h) = (canvas.width(), canvas.height());
    canvas.fill_rect(0, 0, w, BAR_HEIGHT, TOP_BAR);
    canvas.fill_rect(0, h - BAR_HEIGHT, w, h, BOTTOM_BAR);
}

fn draw_left_text(canvas: &mut Canvas, text: &FeatureText, fonts: &FontSet) {
    let x = 50.0;
    canvas.draw_text(x, 140.0, &text.title, fonts.face(FontRole::Sans), 48.0, TITLE);
    canvas.draw_text(x, 210.0, &text.subtitle, fonts.face(FontRole::SansRegular), 28.0, SUBTITLE);
    canvas.draw_text(x, 260.0, &text.meta, fonts.face(FontRole::SansRegular), 18.0, META);
}

fn draw_code_panel(canvas: &mut Canvas, fonts: &FontSet) {
    let px = canvas.width() - PANEL_W - 40;
    let py = (canvas.height() - PANEL_H) / 2;
    canvas.fill_rounded_rect(px, py, px + PANEL_W, py + PANEL_H, PANEL_RADIUS, CODE_BG);

    let dot_y = py + 15;
    for (i, color) in DOTS.iter().enumerate() {
        let dot_x = px + 15 + i as i64 * 18;
        canvas.fill_ellipse(dot_x, dot_y, dot_x + 10, dot_y + 10, *color);
    }

    let mono = fonts.face(FontRole::Mono);
    let code_x = (px + 20) as f32;
    let mut code_y = (py + 50) as f32;
    for (line, token) in CODE_LINES {
        canvas.draw_text(code_x, code_y, line, mono, 20.0, token.color());
        code_y += LINE_HEIGHT;
    }
}

/// Compose and save the feature graphic as PNG at `out`.
pub fn run_feature(out: &Path, text: &FeatureText, fonts: &FontSet) -> Result<FeatureOutcome> {
    let img = compose_feature_graphic(text, fonts);
    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent).map_err(|e| AssetError::io(parent, e))?;
    }
    img.save(out).map_err(|source| AssetError::Image {
        path: out.to_path_buf(),
        source,
    })?;
    let bytes = fs::metadata(out).map_err(|e| AssetError::io(out, e))?.len();
    log::debug!("wrote feature graphic {} ({} bytes)", out.display(), bytes);
    Ok(FeatureOutcome {
        path: out.to_path_buf(),
        width: WIDTH,
        height: HEIGHT,
        bytes,
        within_limit: bytes <= MAX_BYTES,
    })
}
