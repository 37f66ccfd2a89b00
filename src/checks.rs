//! Rule checks over already-collected facts.
//!
//! Nothing here touches the filesystem; `validate` gathers counts, byte sizes
//! and decoded dimensions and hands them over.

use crate::models::rules::{AssetRule, Ratio, RuleShape};
use crate::models::{AssetFile, Violation, ViolationKind};

fn violation(rule: &AssetRule, file: Option<&str>, kind: ViolationKind, message: String) -> Violation {
    Violation {
        category: rule.category.clone(),
        file: file.map(str::to_string),
        kind,
        message,
    }
}

/// Directory for `rule` does not exist.
pub fn missing_directory(rule: &AssetRule, dir: &str) -> Violation {
    violation(
        rule,
        None,
        ViolationKind::MissingDirectory,
        format!("directory missing: {}", dir),
    )
}

/// Number of matching image files must be inside the inclusive count range.
pub fn check_count(rule: &AssetRule, count: usize) -> Option<Violation> {
    if rule.count.contains(count) {
        return None;
    }
    Some(violation(
        rule,
        None,
        ViolationKind::CountOutOfRange,
        format!(
            "image count {} not in required range {}-{}",
            count, rule.count.min, rule.count.max
        ),
    ))
}

pub fn check_bytes(rule: &AssetRule, file: &AssetFile) -> Option<Violation> {
    if file.bytes <= rule.max_bytes {
        return None;
    }
    Some(violation(
        rule,
        Some(&file.name),
        ViolationKind::TooLarge,
        format!(
            "exceeds size limit {} bytes (actual {})",
            rule.max_bytes, file.bytes
        ),
    ))
}

pub fn undecodable(rule: &AssetRule, file: &AssetFile, reason: &str) -> Violation {
    violation(
        rule,
        Some(&file.name),
        ViolationKind::Undecodable,
        format!("cannot be decoded: {}", reason),
    )
}

/// True when `width:height` equals any of `allowed`.
pub fn ratio_allowed(width: u32, height: u32, allowed: &[Ratio]) -> bool {
    allowed.iter().any(|r| r.matches(width, height))
}

/// Shape checks for decoded dimensions. Exact rules yield at most one
/// violation; ratio rules may yield one ratio and one side-bound violation.
pub fn check_dimensions(rule: &AssetRule, file: &AssetFile, width: u32, height: u32) -> Vec<Violation> {
    let mut out = Vec::new();
    match &rule.shape {
        RuleShape::Exact {
            width: ew,
            height: eh,
        } => {
            if (width, height) != (*ew, *eh) {
                out.push(violation(
                    rule,
                    Some(&file.name),
                    ViolationKind::SizeMismatch,
                    format!("size {}x{} is not {}x{}", width, height, ew, eh),
                ));
            }
        }
        RuleShape::Ratio {
            ratios,
            min_side,
            max_side,
        } => {
            if !ratio_allowed(width, height, ratios) {
                let allowed = ratios
                    .iter()
                    .map(|r| r.to_string())
                    .collect::<Vec<_>>()
                    .join(" or ");
                out.push(violation(
                    rule,
                    Some(&file.name),
                    ViolationKind::RatioMismatch,
                    format!("aspect ratio {}:{} does not match {}", width, height, allowed),
                ));
            }
            let in_bounds = |side: u32| {
                min_side.map_or(true, |lo| side >= lo) && max_side.map_or(true, |hi| side <= hi)
            };
            if !in_bounds(width) || !in_bounds(height) {
                out.push(violation(
                    rule,
                    Some(&file.name),
                    ViolationKind::SideOutOfBounds,
                    format!(
                        "side length out of range {}-{} ({}x{})",
                        min_side.map(|v| v.to_string()).unwrap_or_else(|| "0".into()),
                        max_side.map(|v| v.to_string()).unwrap_or_else(|| "∞".into()),
                        width,
                        height
                    ),
                ));
            }
        }
    }
    out
}
