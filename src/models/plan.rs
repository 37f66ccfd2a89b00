//! Generation plans: placeholder list and feature graphic texts.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// One placeholder image; `path` is relative to the assets root.
pub struct PlaceholderSpec {
    pub path: String,
    pub width: u32,
    pub height: u32,
    /// `#RRGGBB`
    pub color: String,
    pub label: String,
}

impl PlaceholderSpec {
    fn new(path: &str, width: u32, height: u32, color: &str, label: &str) -> Self {
        Self {
            path: path.to_string(),
            width,
            height,
            color: color.to_string(),
            label: label.to_string(),
        }
    }
}

/// Built-in placeholder set; satisfies `RuleTable::store_defaults()`.
pub fn default_placeholders() -> Vec<PlaceholderSpec> {
    vec![
        PlaceholderSpec::new(
            "app-icon/ic_launcher_512x512.png",
            512,
            512,
            "#3F51B5",
            "APP ICON 512x512",
        ),
        PlaceholderSpec::new(
            "feature-graphic/feature_1024x500.png",
            1024,
            500,
            "#009688",
            "FEATURE 1024x500",
        ),
        PlaceholderSpec::new(
            "phone-screenshots/phone_01.png",
            1080,
            1920,
            "#607D8B",
            "PHONE 1080x1920",
        ),
        PlaceholderSpec::new(
            "phone-screenshots/phone_02.png",
            1920,
            1080,
            "#795548",
            "PHONE 1920x1080",
        ),
        PlaceholderSpec::new(
            "tablet7-screenshots/tablet7_01.png",
            1280,
            720,
            "#9C27B0",
            "TABLET7 1280x720",
        ),
        PlaceholderSpec::new(
            "tablet10-screenshots/tablet10_01.png",
            1920,
            1080,
            "#673AB7",
            "TABLET10 1920x1080",
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Texts drawn on the left side of the feature graphic.
pub struct FeatureText {
    pub title: String,
    pub subtitle: String,
    pub meta: String,
}

impl Default for FeatureText {
    fn default() -> Self {
        Self {
            title: "ABB Robot Program Reader".to_string(),
            subtitle: "读取与浏览 ABB RAPID 程序".to_string(),
            meta: "Open Source • MIT License".to_string(),
        }
    }
}
