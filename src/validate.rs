//! Validation runner over the assets root.
//!
//! Walks categories in rule-table order and produces a `ValidationReport`
//! with every violation found. Violations never stop the scan; only
//! unexpected I/O (e.g. permission errors) aborts with `AssetError`.

use crate::checks;
use crate::error::{AssetError, Result};
use crate::models::rules::{AssetRule, RuleTable};
use crate::models::{AssetFile, CategoryReport, Summary, ValidationReport, Violation};
use image::ImageReader;
use std::fs;
use std::path::Path;

/// Extensions (lower-cased) considered image files; anything else is ignored.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Outcome of reading an image header.
enum Decoded {
    Dimensions(u32, u32),
    Failed(String),
}

/// Validate every category of `rules` under `root`.
pub fn run_validate(root: &Path, rules: &RuleTable) -> Result<ValidationReport> {
    let mut violations: Vec<Violation> = Vec::new();
    let mut categories: Vec<CategoryReport> = Vec::new();
    let mut files_total: usize = 0;

    for rule in rules.iter() {
        let dir = root.join(&rule.category);
        let dir_str = dir.to_string_lossy().to_string();
        log::debug!("scanning category '{}' at {}", rule.category, dir_str);
        if !dir.is_dir() {
            violations.push(checks::missing_directory(rule, &dir_str));
            categories.push(CategoryReport {
                category: rule.category.clone(),
                dir: dir_str,
                present: false,
                files: 0,
                violations: 1,
            });
            continue;
        }

        let before = violations.len();
        let files = list_images(rule, &dir)?;
        files_total += files.len();
        validate_category(rule, &files, &mut violations)?;
        categories.push(CategoryReport {
            category: rule.category.clone(),
            dir: dir_str,
            present: true,
            files: files.len(),
            violations: violations.len() - before,
        });
    }

    let summary = Summary {
        categories: categories.len(),
        files: files_total,
        violations: violations.len(),
    };
    Ok(ValidationReport {
        root: root.to_string_lossy().to_string(),
        categories,
        violations,
        summary,
    })
}

/// Count, byte-size, decode and shape checks for one category.
fn validate_category(rule: &AssetRule, files: &[AssetFile], out: &mut Vec<Violation>) -> Result<()> {
    if let Some(v) = checks::check_count(rule, files.len()) {
        out.push(v);
    }
    for file in files {
        if let Some(v) = checks::check_bytes(rule, file) {
            out.push(v);
        }
        match decode_dimensions(&file.path)? {
            Decoded::Dimensions(w, h) => {
                log::debug!("{}: {}x{} ({} bytes)", file.path.display(), w, h, file.bytes);
                out.extend(checks::check_dimensions(rule, file, w, h));
            }
            Decoded::Failed(reason) => out.push(checks::undecodable(rule, file, &reason)),
        }
    }
    Ok(())
}

/// Regular files directly inside `dir` with an image extension, sorted by name.
fn list_images(rule: &AssetRule, dir: &Path) -> Result<Vec<AssetFile>> {
    let entries = fs::read_dir(dir).map_err(|e| AssetError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| AssetError::io(dir, e))?.path();
        if !path.is_file() || !has_image_extension(&path) {
            continue;
        }
        let bytes = fs::metadata(&path)
            .map_err(|e| AssetError::io(&path, e))?
            .len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        files.push(AssetFile {
            category: rule.category.clone(),
            path,
            name,
            bytes,
        });
    }
    files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(files)
}

pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .map_or(false, |e| IMAGE_EXTENSIONS.contains(&e.as_str()))
}

fn decode_dimensions(path: &Path) -> Result<Decoded> {
    let reader = ImageReader::open(path)
        .map_err(|e| AssetError::io(path, e))?
        .with_guessed_format()
        .map_err(|e| AssetError::io(path, e))?;
    Ok(match reader.into_dimensions() {
        Ok((w, h)) => Decoded::Dimensions(w, h),
        Err(e) => Decoded::Failed(e.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rules::RulePatch;
    use crate::models::ViolationKind;
    use image::{Rgb, RgbImage};
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write_png(path: &Path, w: u32, h: u32) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbImage::from_pixel(w, h, Rgb([10, 20, 30]))
            .save(path)
            .unwrap();
    }

    /// Tree satisfying the store defaults.
    fn valid_tree(root: &Path) {
        write_png(&root.join("app-icon/icon.png"), 512, 512);
        write_png(&root.join("feature-graphic/feature.png"), 1024, 500);
        write_png(&root.join("phone-screenshots/p1.png"), 1080, 1920);
        write_png(&root.join("phone-screenshots/p2.png"), 1920, 1080);
        fs::create_dir_all(root.join("tablet7-screenshots")).unwrap();
        fs::create_dir_all(root.join("tablet10-screenshots")).unwrap();
    }

    fn kinds_for(report: &ValidationReport, category: &str) -> Vec<ViolationKind> {
        report
            .violations
            .iter()
            .filter(|v| v.category == category)
            .map(|v| v.kind)
            .collect()
    }

    #[test]
    fn test_valid_tree_passes() {
        let tmp = tempdir().unwrap();
        valid_tree(tmp.path());
        let report = run_validate(tmp.path(), &RuleTable::store_defaults()).unwrap();
        assert!(report.passed(), "{:?}", report.violations);
        assert_eq!(report.exit_status(), 0);
        assert_eq!(report.summary.files, 4);
        assert_eq!(report.summary.categories, 5);
    }

    #[test]
    fn test_missing_directory_skips_category() {
        let tmp = tempdir().unwrap();
        valid_tree(tmp.path());
        fs::remove_dir_all(tmp.path().join("tablet10-screenshots")).unwrap();
        let report = run_validate(tmp.path(), &RuleTable::store_defaults()).unwrap();
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.exit_status(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::MissingDirectory);
        assert!(report.violations[0].message.contains("tablet10-screenshots"));
        let cat = report
            .categories
            .iter()
            .find(|c| c.category == "tablet10-screenshots")
            .unwrap();
        assert!(!cat.present);
    }

    #[test]
    fn test_app_icon_wrong_size_and_count() {
        let tmp = tempdir().unwrap();
        valid_tree(tmp.path());
        write_png(&tmp.path().join("app-icon/icon.png"), 500, 500);
        let report = run_validate(tmp.path(), &RuleTable::store_defaults()).unwrap();
        assert_eq!(kinds_for(&report, "app-icon"), vec![ViolationKind::SizeMismatch]);

        write_png(&tmp.path().join("app-icon/icon.png"), 512, 512);
        write_png(&tmp.path().join("app-icon/icon2.png"), 512, 512);
        let report = run_validate(tmp.path(), &RuleTable::store_defaults()).unwrap();
        assert_eq!(
            kinds_for(&report, "app-icon"),
            vec![ViolationKind::CountOutOfRange]
        );
    }

    #[test]
    fn test_empty_required_dir_yields_single_count_violation() {
        let tmp = tempdir().unwrap();
        valid_tree(tmp.path());
        fs::remove_file(tmp.path().join("app-icon/icon.png")).unwrap();
        let report = run_validate(tmp.path(), &RuleTable::store_defaults()).unwrap();
        assert_eq!(
            kinds_for(&report, "app-icon"),
            vec![ViolationKind::CountOutOfRange]
        );
        assert_eq!(report.violations.len(), 1);
    }

    #[test]
    fn test_ratio_violation_for_1000x1800() {
        let tmp = tempdir().unwrap();
        valid_tree(tmp.path());
        write_png(&tmp.path().join("phone-screenshots/p3.png"), 1000, 1800);
        let report = run_validate(tmp.path(), &RuleTable::store_defaults()).unwrap();
        let v: Vec<_> = report
            .violations
            .iter()
            .filter(|v| v.category == "phone-screenshots")
            .collect();
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].kind, ViolationKind::RatioMismatch);
        assert_eq!(v[0].file.as_deref(), Some("p3.png"));
    }

    #[test]
    fn test_oversize_file_single_violation() {
        let tmp = tempdir().unwrap();
        valid_tree(tmp.path());
        let mut rules = RuleTable::store_defaults();
        rules
            .apply_patch(
                "phone-screenshots",
                &RulePatch {
                    max_bytes: Some(10),
                    ..Default::default()
                },
            )
            .unwrap();
        // wrong size too; byte violation must still be reported exactly once per file
        write_png(&tmp.path().join("phone-screenshots/p2.png"), 1000, 1800);
        let report = run_validate(tmp.path(), &rules).unwrap();
        let too_large: Vec<_> = report
            .violations
            .iter()
            .filter(|v| v.kind == ViolationKind::TooLarge)
            .collect();
        assert_eq!(too_large.len(), 2);
        assert!(too_large.iter().any(|v| v.file.as_deref() == Some("p1.png")));
        assert!(too_large.iter().any(|v| v.file.as_deref() == Some("p2.png")));
    }

    #[test]
    fn test_undecodable_and_ignored_extensions() {
        let tmp = tempdir().unwrap();
        valid_tree(tmp.path());
        let phone = tmp.path().join("phone-screenshots");
        fs::write(phone.join("broken.PNG"), b"not an image").unwrap();
        fs::write(phone.join("shot.webp"), b"RIFF").unwrap();
        fs::write(phone.join("notes.txt"), b"hello").unwrap();
        fs::create_dir_all(phone.join("nested.png")).unwrap();
        let report = run_validate(tmp.path(), &RuleTable::store_defaults()).unwrap();
        assert_eq!(
            kinds_for(&report, "phone-screenshots"),
            vec![ViolationKind::Undecodable]
        );
        let cat = report
            .categories
            .iter()
            .find(|c| c.category == "phone-screenshots")
            .unwrap();
        assert_eq!(cat.files, 3);
    }

    #[test]
    fn test_jpeg_is_decoded() {
        let tmp = tempdir().unwrap();
        valid_tree(tmp.path());
        fs::remove_file(tmp.path().join("app-icon/icon.png")).unwrap();
        write_png(&tmp.path().join("app-icon/icon.jpg"), 512, 512);
        let report = run_validate(tmp.path(), &RuleTable::store_defaults()).unwrap();
        assert!(report.passed(), "{:?}", report.violations);
    }

    #[test]
    fn test_image_extension_filter() {
        assert!(has_image_extension(&PathBuf::from("a.png")));
        assert!(has_image_extension(&PathBuf::from("a.JPeG")));
        assert!(!has_image_extension(&PathBuf::from("a.webp")));
        assert!(!has_image_extension(&PathBuf::from(".png")));
    }

    #[test]
    fn test_undecodable_file_still_checked_for_bytes() {
        let tmp = tempdir().unwrap();
        valid_tree(tmp.path());
        fs::remove_file(tmp.path().join("app-icon/icon.png")).unwrap();
        fs::write(tmp.path().join("app-icon/c.png"), vec![0u8; 64]).unwrap();
        let mut rules = RuleTable::store_defaults();
        rules
            .apply_patch(
                "app-icon",
                &RulePatch {
                    max_bytes: Some(32),
                    ..Default::default()
                },
            )
            .unwrap();
        let report = run_validate(tmp.path(), &rules).unwrap();
        let got: Vec<_> = report
            .violations
            .iter()
            .map(|v| (v.file.as_deref(), v.kind))
            .collect();
        assert_eq!(
            got,
            vec![
                (Some("c.png"), ViolationKind::TooLarge),
                (Some("c.png"), ViolationKind::Undecodable),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_names_are_scanned() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = tempdir().unwrap();
        let root = tmp.path().join(OsStr::from_bytes(b"assets\xff"));
        valid_tree(&root);
        let report = run_validate(&root, &RuleTable::store_defaults()).unwrap();
        assert!(report.passed(), "{:?}", report.violations);
        assert_eq!(report.summary.files, 4);

        write_png(&root.join("app-icon").join(OsStr::from_bytes(b"x\xff.png")), 500, 500);
        let report = run_validate(&root, &RuleTable::store_defaults()).unwrap();
        assert_eq!(
            kinds_for(&report, "app-icon"),
            vec![ViolationKind::CountOutOfRange, ViolationKind::SizeMismatch]
        );
    }
}
