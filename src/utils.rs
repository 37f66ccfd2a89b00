//! Console helpers shared by the binary and printers.

use owo_colors::OwoColorize;
use std::path::Path;

/// Colors are on unless `NO_COLOR` is set.
pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if colors_enabled() {
        "⟦error⟧".red().bold().to_string()
    } else {
        "⟦error⟧".to_string()
    }
}

pub fn warn_prefix() -> String {
    if colors_enabled() {
        "⟦warn⟧".yellow().bold().to_string()
    } else {
        "⟦warn⟧".to_string()
    }
}

pub fn note_prefix() -> String {
    if colors_enabled() {
        "⟦note⟧".cyan().bold().to_string()
    } else {
        "⟦note⟧".to_string()
    }
}

pub fn info_prefix() -> String {
    if colors_enabled() {
        "⟦info⟧".blue().bold().to_string()
    } else {
        "⟦info⟧".to_string()
    }
}

/// `path` relative to `base` when possible, otherwise as given.
pub fn display_path(path: &Path, base: &Path) -> String {
    if path.is_relative() || base.as_os_str().is_empty() {
        return path.to_string_lossy().to_string();
    }
    match pathdiff::diff_paths(path, base) {
        Some(rel) if !rel.as_os_str().is_empty() && !rel.starts_with("..") => {
            rel.to_string_lossy().to_string()
        }
        _ => path.to_string_lossy().to_string(),
    }
}
