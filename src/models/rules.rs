//! Rule table schema used by the validator.
//!
//! Each category (one directory under the assets root) has exactly one
//! `AssetRule`. The shape requirement is either an exact pixel size or a set
//! of allowed aspect ratios with optional side bounds:
//! - `exact`: `(width, height)` must match exactly.
//! - `ratio`: `width * b == height * a` for some allowed `a:b`, and both
//!   sides within `[min_side, max_side]` when those bounds are set.
//!
//! The built-in table mirrors the store's submission requirements; config
//! files may patch it via `RulePatch`.

use crate::error::{AssetError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Aspect ratio `width:height`, kept as integers for exact comparison.
pub struct Ratio {
    pub width: u32,
    pub height: u32,
}

impl Ratio {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Cross-multiplied equality: `w * b == h * a` in 64-bit arithmetic.
    pub fn matches(&self, width: u32, height: u32) -> bool {
        u64::from(width) * u64::from(self.height) == u64::from(height) * u64::from(self.width)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Shape requirement for every image in a category.
pub enum RuleShape {
    Exact {
        width: u32,
        height: u32,
    },
    Ratio {
        ratios: Vec<Ratio>,
        min_side: Option<u32>,
        max_side: Option<u32>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Inclusive file count range.
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

impl CountRange {
    pub fn contains(&self, count: usize) -> bool {
        self.min <= count && count <= self.max
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetRule {
    pub category: String,
    pub shape: RuleShape,
    pub max_bytes: u64,
    pub count: CountRange,
}

impl AssetRule {
    fn exact(category: &str, width: u32, height: u32, max_bytes: u64, count: (usize, usize)) -> Self {
        Self {
            category: category.to_string(),
            shape: RuleShape::Exact { width, height },
            max_bytes,
            count: CountRange {
                min: count.0,
                max: count.1,
            },
        }
    }

    fn screenshots(category: &str, min_side: u32, max_side: u32, count: (usize, usize)) -> Self {
        Self {
            category: category.to_string(),
            shape: RuleShape::Ratio {
                ratios: vec![Ratio::new(16, 9), Ratio::new(9, 16)],
                min_side: Some(min_side),
                max_side: Some(max_side),
            },
            max_bytes: 8 * MIB,
            count: CountRange {
                min: count.0,
                max: count.1,
            },
        }
    }

    /// Short human description of the shape, e.g. `512x512` or `16:9|9:16 320-3840`.
    pub fn shape_label(&self) -> String {
        match &self.shape {
            RuleShape::Exact { width, height } => format!("{}x{}", width, height),
            RuleShape::Ratio {
                ratios,
                min_side,
                max_side,
            } => {
                let r = ratios
                    .iter()
                    .map(|r| r.to_string())
                    .collect::<Vec<_>>()
                    .join("|");
                match (min_side, max_side) {
                    (None, None) => r,
                    (lo, hi) => format!(
                        "{} {}-{}",
                        r,
                        lo.map(|v| v.to_string()).unwrap_or_default(),
                        hi.map(|v| v.to_string()).unwrap_or_default()
                    ),
                }
            }
        }
    }
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// Partial rule from config (`[rules.<category>]`).
///
/// For an existing category only the given fields change. Setting `exact`
/// switches the shape to exact; setting `ratios` switches it to ratio-based.
/// New categories must specify a shape, `max_bytes` and `count`.
pub struct RulePatch {
    pub exact: Option<[u32; 2]>,
    pub ratios: Option<Vec<[u32; 2]>>,
    pub min_side: Option<u32>,
    pub max_side: Option<u32>,
    pub max_bytes: Option<u64>,
    pub count: Option<[usize; 2]>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Ordered rule table; validation walks categories in this order.
pub struct RuleTable {
    rules: Vec<AssetRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<AssetRule>) -> Self {
        Self { rules }
    }

    /// Built-in store submission rules.
    pub fn store_defaults() -> Self {
        Self::new(vec![
            AssetRule::exact("app-icon", 512, 512, MIB, (1, 1)),
            AssetRule::exact("feature-graphic", 1024, 500, 15 * MIB, (1, 1)),
            AssetRule::screenshots("phone-screenshots", 320, 3840, (2, 8)),
            AssetRule::screenshots("tablet7-screenshots", 320, 3840, (0, 8)),
            AssetRule::screenshots("tablet10-screenshots", 1080, 7680, (0, 8)),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetRule> {
        self.rules.iter()
    }

    pub fn get(&self, category: &str) -> Option<&AssetRule> {
        self.rules.iter().find(|r| r.category == category)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply a config patch to `category`, appending a new rule when the
    /// category is unknown.
    pub fn apply_patch(&mut self, category: &str, patch: &RulePatch) -> Result<()> {
        if patch.exact.is_some() && patch.ratios.is_some() {
            return Err(invalid(category, "`exact` and `ratios` are mutually exclusive"));
        }
        if let Some(pos) = self.rules.iter().position(|r| r.category == category) {
            let rule = &mut self.rules[pos];
            patch_rule(rule, patch)?;
            validate_rule(rule)?;
            return Ok(());
        }
        let shape = if let Some([w, h]) = patch.exact {
            RuleShape::Exact {
                width: w,
                height: h,
            }
        } else if let Some(ratios) = patch.ratios.as_ref() {
            RuleShape::Ratio {
                ratios: ratios.iter().map(|[a, b]| Ratio::new(*a, *b)).collect(),
                min_side: patch.min_side,
                max_side: patch.max_side,
            }
        } else {
            return Err(invalid(category, "new category needs `exact` or `ratios`"));
        };
        let max_bytes = patch
            .max_bytes
            .ok_or_else(|| invalid(category, "new category needs `max_bytes`"))?;
        let [min, max] = patch
            .count
            .ok_or_else(|| invalid(category, "new category needs `count`"))?;
        let rule = AssetRule {
            category: category.to_string(),
            shape,
            max_bytes,
            count: CountRange { min, max },
        };
        validate_rule(&rule)?;
        self.rules.push(rule);
        Ok(())
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::store_defaults()
    }
}

fn patch_rule(rule: &mut AssetRule, patch: &RulePatch) -> Result<()> {
    if let Some([w, h]) = patch.exact {
        rule.shape = RuleShape::Exact {
            width: w,
            height: h,
        };
    } else if let Some(ratios) = patch.ratios.as_ref() {
        let (old_min, old_max) = match &rule.shape {
            RuleShape::Ratio {
                min_side, max_side, ..
            } => (*min_side, *max_side),
            RuleShape::Exact { .. } => (None, None),
        };
        rule.shape = RuleShape::Ratio {
            ratios: ratios.iter().map(|[a, b]| Ratio::new(*a, *b)).collect(),
            min_side: old_min,
            max_side: old_max,
        };
    }
    match &mut rule.shape {
        RuleShape::Ratio {
            min_side, max_side, ..
        } => {
            if patch.min_side.is_some() {
                *min_side = patch.min_side;
            }
            if patch.max_side.is_some() {
                *max_side = patch.max_side;
            }
        }
        RuleShape::Exact { .. } => {
            if patch.min_side.is_some() || patch.max_side.is_some() {
                return Err(invalid(
                    &rule.category,
                    "side bounds only apply to ratio-based rules",
                ));
            }
        }
    }
    if let Some(max_bytes) = patch.max_bytes {
        rule.max_bytes = max_bytes;
    }
    if let Some([min, max]) = patch.count {
        rule.count = CountRange { min, max };
    }
    Ok(())
}

fn validate_rule(rule: &AssetRule) -> Result<()> {
    if rule.count.min > rule.count.max {
        return Err(invalid(&rule.category, "count min exceeds max"));
    }
    if let RuleShape::Ratio {
        ratios,
        min_side,
        max_side,
    } = &rule.shape
    {
        if ratios.is_empty() {
            return Err(invalid(&rule.category, "`ratios` must not be empty"));
        }
        if ratios.iter().any(|r| r.width == 0 || r.height == 0) {
            return Err(invalid(&rule.category, "ratio terms must be non-zero"));
        }
        if let (Some(lo), Some(hi)) = (min_side, max_side) {
            if lo > hi {
                return Err(invalid(&rule.category, "min_side exceeds max_side"));
            }
        }
    }
    Ok(())
}

fn invalid(category: &str, reason: &str) -> AssetError {
    AssetError::InvalidRule {
        category: category.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_defaults_order_and_values() {
        let table = RuleTable::store_defaults();
        let names: Vec<_> = table.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "app-icon",
                "feature-graphic",
                "phone-screenshots",
                "tablet7-screenshots",
                "tablet10-screenshots"
            ]
        );
        let icon = table.get("app-icon").unwrap();
        assert_eq!(icon.max_bytes, 1024 * 1024);
        assert_eq!(icon.count, CountRange { min: 1, max: 1 });
        assert_eq!(icon.shape_label(), "512x512");
        let tab10 = table.get("tablet10-screenshots").unwrap();
        assert_eq!(tab10.shape_label(), "16:9|9:16 1080-7680");
    }

    #[test]
    fn test_ratio_cross_multiplication() {
        let r = Ratio::new(16, 9);
        let portrait = Ratio::new(9, 16);
        // 1080*16 == 1920*9 == 17280
        assert!(portrait.matches(1080, 1920));
        assert!(!r.matches(1080, 1920));
        // 1000*16 = 16000 vs 1800*9 = 16200
        assert!(!portrait.matches(1000, 1800));
        // large sides do not overflow
        assert!(r.matches(3_840_000_000, 2_160_000_000));
    }

    #[test]
    fn test_patch_existing_keeps_unset_fields() {
        let mut table = RuleTable::store_defaults();
        let patch = RulePatch {
            max_bytes: Some(42),
            min_side: Some(400),
            ..Default::default()
        };
        table.apply_patch("phone-screenshots", &patch).unwrap();
        let rule = table.get("phone-screenshots").unwrap();
        assert_eq!(rule.max_bytes, 42);
        assert_eq!(rule.count, CountRange { min: 2, max: 8 });
        match &rule.shape {
            RuleShape::Ratio {
                ratios,
                min_side,
                max_side,
            } => {
                assert_eq!(ratios.len(), 2);
                assert_eq!(*min_side, Some(400));
                assert_eq!(*max_side, Some(3840));
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_patch_new_category_requires_shape_and_limits() {
        let mut table = RuleTable::store_defaults();
        let err = table
            .apply_patch(
                "wear-screenshots",
                &RulePatch {
                    max_bytes: Some(1),
                    count: Some([0, 1]),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.to_string().contains("wear-screenshots"));

        table
            .apply_patch(
                "wear-screenshots",
                &RulePatch {
                    exact: Some([384, 384]),
                    max_bytes: Some(1024),
                    count: Some([0, 8]),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(table.len(), 6);
        assert_eq!(table.iter().last().unwrap().category, "wear-screenshots");
    }

    #[test]
    fn test_patch_rejects_inverted_count_and_side_on_exact() {
        let mut table = RuleTable::store_defaults();
        let err = table
            .apply_patch(
                "app-icon",
                &RulePatch {
                    count: Some([3, 1]),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.to_string().contains("count min exceeds max"));
        let err = table
            .apply_patch(
                "feature-graphic",
                &RulePatch {
                    min_side: Some(10),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.to_string().contains("side bounds"));
    }
}
