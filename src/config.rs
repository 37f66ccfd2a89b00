//! Configuration discovery and effective settings resolution.
//!
//! Reads `storeassets.toml|yaml|yml` from the repository root (or closest
//! ancestor) and merges it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `root`: `release-assets`
//! - `output`: `human`
//! - `rules`: the built-in store table
//! - `placeholders`: the built-in placeholder plan
//! - `feature`: the built-in banner texts
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{AssetError, Result};
use crate::fonts::FontPaths;
use crate::models::plan::{default_placeholders, FeatureText, PlaceholderSpec};
use crate::models::rules::{RulePatch, RuleTable};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILES: [&str; 3] = ["storeassets.toml", "storeassets.yaml", "storeassets.yml"];
pub const DEFAULT_ROOT: &str = "release-assets";

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// Root configuration loaded from `storeassets.toml|yaml`.
pub struct AssetsConfig {
    pub root: Option<String>,
    pub output: Option<String>,
    #[serde(default)]
    pub rules: Option<BTreeMap<String, RulePatch>>, // [rules.<category>]
    #[serde(default)]
    pub placeholders: Option<Vec<PlaceholderSpec>>, // [[placeholders]] replaces the plan
    #[serde(default)]
    pub feature: Option<FeatureText>,
    #[serde(default)]
    pub fonts: Option<FontPaths>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub assets_root: PathBuf,
    pub output: String,
    pub rules: RuleTable,
    pub placeholders: Vec<PlaceholderSpec>,
    pub feature: FeatureText,
    pub fonts: FontPaths,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `storeassets.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `AssetsConfig` from the first config file present under `root`.
///
/// Returns `Ok(None)` when no config file exists; a file that exists but
/// cannot be read or parsed is an error.
pub fn load_config(root: &Path) -> Result<Option<(PathBuf, AssetsConfig)>> {
    for name in CONFIG_FILES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        let s = fs::read_to_string(&path).map_err(|e| AssetError::io(&path, e))?;
        let cfg: AssetsConfig = if name.ends_with(".toml") {
            toml::from_str(&s).map_err(|e| config_error(&path, e.to_string()))?
        } else {
            serde_yaml::from_str(&s).map_err(|e| config_error(&path, e.to_string()))?
        };
        return Ok(Some((path, cfg)));
    }
    Ok(None)
}

fn config_error(path: &Path, message: String) -> AssetError {
    AssetError::Config {
        path: path.to_path_buf(),
        message,
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// `cli_root` is taken as given (relative to the working directory); a
/// config `root` is relative to the detected repository root.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_root: Option<&str>,
    cli_output: Option<&str>,
) -> Result<Effective> {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let (config_path, cfg) = match load_config(&repo_root)? {
        Some((p, c)) => (Some(p), c),
        None => (None, AssetsConfig::default()),
    };

    let assets_root = match cli_root {
        Some(r) => PathBuf::from(r),
        None => repo_root.join(cfg.root.as_deref().unwrap_or(DEFAULT_ROOT)),
    };

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    if output != "human" && output != "json" {
        return Err(config_error(
            config_path.as_deref().unwrap_or(Path::new("<cli>")),
            format!("unknown output mode '{}' (expected human|json)", output),
        ));
    }

    let mut rules = RuleTable::store_defaults();
    for (category, patch) in cfg.rules.unwrap_or_default() {
        rules.apply_patch(&category, &patch)?;
    }

    Ok(Effective {
        repo_root,
        config_path,
        assets_root,
        output,
        rules,
        placeholders: cfg.placeholders.unwrap_or_else(default_placeholders),
        feature: cfg.feature.unwrap_or_default(),
        fonts: cfg.fonts.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rules::{CountRange, RuleShape};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_config() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let eff = resolve_effective(dir.path().to_str(), None, None).unwrap();
        assert!(eff.config_path.is_none());
        assert_eq!(eff.assets_root, dir.path().join("release-assets"));
        assert_eq!(eff.output, "human");
        assert_eq!(eff.rules, RuleTable::store_defaults());
        assert_eq!(eff.placeholders.len(), 6);
        assert_eq!(eff.feature, FeatureText::default());
    }

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("storeassets.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
root = "store/assets"
output = "json"

[rules.phone-screenshots]
count = [1, 4]

[rules.wear-screenshots]
exact = [384, 384]
max_bytes = 1048576
count = [0, 8]

[feature]
title = "My App"
    "#
        )
        .unwrap();

        // Resolve from a nested directory; root detection walks upward
        let nested = root.join("a/b");
        fs::create_dir_all(&nested).unwrap();
        let eff = resolve_effective(nested.to_str(), None, None).unwrap();
        assert_eq!(eff.repo_root, root);
        assert_eq!(eff.assets_root, root.join("store/assets"));
        assert_eq!(eff.output, "json");
        assert_eq!(
            eff.rules.get("phone-screenshots").unwrap().count,
            CountRange { min: 1, max: 4 }
        );
        let wear = eff.rules.get("wear-screenshots").unwrap();
        assert_eq!(
            wear.shape,
            RuleShape::Exact {
                width: 384,
                height: 384
            }
        );
        assert_eq!(eff.feature.title, "My App");
        // unspecified feature texts keep their defaults
        assert_eq!(eff.feature.meta, FeatureText::default().meta);
    }

    #[test]
    fn test_load_yaml_placeholders_and_fonts() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("storeassets.yaml"),
            r##"
placeholders:
  - path: app-icon/icon.png
    width: 512
    height: 512
    color: "#112233"
    label: ICON
fonts:
  mono:
    - /opt/fonts/Mono.ttf
"##,
        )
        .unwrap();
        let eff = resolve_effective(root.to_str(), None, None).unwrap();
        assert_eq!(eff.placeholders.len(), 1);
        assert_eq!(eff.placeholders[0].label, "ICON");
        assert_eq!(eff.fonts.mono, vec![PathBuf::from("/opt/fonts/Mono.ttf")]);
        assert!(eff.fonts.sans.is_empty());
    }

    #[test]
    fn test_cli_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("storeassets.toml"), "root = \"cfg-root\"\noutput = \"json\"\n").unwrap();
        let eff = resolve_effective(root.to_str(), Some("/tmp/elsewhere"), Some("human")).unwrap();
        assert_eq!(eff.assets_root, PathBuf::from("/tmp/elsewhere"));
        assert_eq!(eff.output, "human");
    }

    #[test]
    fn test_malformed_config_is_error() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("storeassets.toml"), "root = [").unwrap();
        let err = resolve_effective(root.to_str(), None, None).unwrap_err();
        assert!(matches!(err, AssetError::Config { .. }));

        fs::write(root.join("storeassets.toml"), "[rules.new-cat]\nmax_bytes = 1\n").unwrap();
        let err = resolve_effective(root.to_str(), None, None).unwrap_err();
        assert!(matches!(err, AssetError::InvalidRule { .. }));
    }

    #[test]
    fn test_misspelled_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("storeassets.toml"), "[rules.app-icon]\nmax_byte = 10\n").unwrap();
        let err = resolve_effective(root.to_str(), None, None).unwrap_err();
        match err {
            AssetError::Config { message, .. } => assert!(message.contains("max_byte"), "{}", message),
            other => panic!("expected config error, got {:?}", other),
        }

        fs::write(root.join("storeassets.toml"), "rot = \"assets\"\n").unwrap();
        let err = resolve_effective(root.to_str(), None, None).unwrap_err();
        assert!(matches!(err, AssetError::Config { .. }));
    }

    #[test]
    fn test_unknown_output_mode_rejected() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        assert!(resolve_effective(dir.path().to_str(), None, Some("xml")).is_err());
    }
}
