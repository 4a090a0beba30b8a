//! Configuration discovery and effective settings resolution.
//!
//! uigrade reads `uigrade.toml|yaml|yml` from the repository root (or closest
//! ancestor) and merges it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `output`: `human`
//! - `threshold`: 80
//! - `include`: `components/**/*.tsx`, `src/**/*.tsx`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::Error;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILES: [&str; 3] = ["uigrade.toml", "uigrade.yaml", "uigrade.yml"];
pub const DEFAULT_THRESHOLD: u32 = 80;
pub const DEFAULT_INCLUDE: [&str; 2] = ["components/**/*.tsx", "src/**/*.tsx"];
pub const OUTPUT_MODES: [&str; 3] = ["human", "json", "markdown"];

/// Reject values the grade command cannot honour. `source` names where the
/// value came from (a config path or a CLI flag).
fn validate(source: &str, output: Option<&str>, threshold: Option<u32>) -> Result<(), Error> {
    if let Some(t) = threshold {
        if t > 100 {
            return Err(Error::Config {
                path: source.to_string(),
                message: format!("threshold must be between 0 and 100, got {}", t),
            });
        }
    }
    if let Some(o) = output {
        if !OUTPUT_MODES.contains(&o) {
            return Err(Error::Config {
                path: source.to_string(),
                message: format!("output must be one of {}, got '{}'", OUTPUT_MODES.join("|"), o),
            });
        }
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
/// Root configuration loaded from `uigrade.toml|yaml`.
pub struct UigradeConfig {
    pub output: Option<String>,
    pub threshold: Option<u32>,
    pub include: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub output: String,
    pub threshold: u32,
    pub include: Vec<String>,
    /// Config file that was loaded, if any.
    pub config_path: Option<PathBuf>,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `uigrade.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `UigradeConfig` from the first config file present under `root`.
///
/// A missing file is `Ok(None)`; an unreadable or invalid one is an error.
pub fn load_config(root: &Path) -> Result<Option<(PathBuf, UigradeConfig)>, Error> {
    for name in CONFIG_FILES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        let shown = path.to_string_lossy().to_string();
        let s = fs::read_to_string(&path).map_err(|source| Error::Read {
            path: shown.clone(),
            source,
        })?;
        let parsed = if name.ends_with(".toml") {
            toml::from_str::<UigradeConfig>(&s).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str::<UigradeConfig>(&s).map_err(|e| e.to_string())
        };
        let cfg = parsed.map_err(|message| Error::Config {
            path: shown.clone(),
            message,
        })?;
        validate(&shown, cfg.output.as_deref(), cfg.threshold)?;
        log::debug!("loaded config from {}", path.display());
        return Ok(Some((path, cfg)));
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_output: Option<&str>,
    cli_threshold: Option<u32>,
) -> Result<Effective, Error> {
    validate("command line", cli_output, cli_threshold)?;
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let (config_path, cfg) = match load_config(&repo_root)? {
        Some((path, cfg)) => (Some(path), cfg),
        None => (None, UigradeConfig::default()),
    };

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    let threshold = cli_threshold
        .or(cfg.threshold)
        .unwrap_or(DEFAULT_THRESHOLD);
    let include = cfg
        .include
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_INCLUDE.iter().map(|s| s.to_string()).collect());

    Ok(Effective {
        repo_root,
        output,
        threshold,
        include,
        config_path,
    })
}

/// Expand include patterns relative to `root`.
///
/// Results keep pattern order; a file matched by several patterns is listed
/// once.
pub fn expand_include(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>, Error> {
    let mut out: Vec<PathBuf> = Vec::new();
    for pat in patterns {
        let abs = root.join(pat).to_string_lossy().to_string();
        let entries = glob::glob(&abs).map_err(|e| Error::Pattern {
            pattern: pat.clone(),
            message: e.msg.to_string(),
        })?;
        for entry in entries {
            match entry {
                Ok(p) if p.is_file() && !out.contains(&p) => out.push(p),
                Ok(_) => {}
                Err(e) => log::warn!("skipping {}: {}", e.path().display(), e.error()),
            }
        }
    }
    Ok(out)
}
