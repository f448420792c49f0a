//! Configuration file support for ferro-locedit.
//!
//! This module loads `.locedit.toml` files that set a default
//! [`LocationEditPolicy`] and default [`GapSplitOptions`].
//!
//! # Example Configuration
//!
//! ```toml
//! [policy]
//! partial5 = "set-for-bad-end"
//! partial3 = "clear-for-good-end"
//! extend5 = true
//! merge = "join"
//!
//! [gap-split]
//! options = ["split-in-exon", "make-partial"]
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `.locedit.toml` in current directory
//! 2. `~/.config/ferro/locedit.toml`

use crate::policy::LocationEditPolicy;
use crate::transform::GapSplitOptions;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Parsed configuration from a .locedit.toml file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocEditConfig {
    /// Default policy for [`apply_policy_to_feature`](crate::policy::apply_policy_to_feature).
    pub policy: LocationEditPolicy,
    /// Default options for [`split_for_gap`](crate::transform::split_for_gap).
    pub gap_split: GapSplitOptions,
}

/// Configuration loading error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Config IO error: {0}")]
    Io(String),
    /// Parse error in config file.
    #[error("Config parse error on line {line}: {msg}")]
    Parse { line: usize, msg: String },
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Policy,
    GapSplit,
    Other,
}

impl LocEditConfig {
    /// Load configuration from the default locations.
    pub fn load() -> Option<Self> {
        let cwd_config = PathBuf::from(".locedit.toml");
        let home_config = dirs_home().map(|home| home.join(".config").join("ferro").join("locedit.toml"));

        for path in std::iter::once(cwd_config).chain(home_config) {
            if !path.exists() {
                continue;
            }
            match Self::load_from_path(&path) {
                Ok(config) => {
                    log::debug!("loaded config from {}", path.display());
                    return Some(config);
                }
                Err(e) => log::warn!("ignoring {}: {}", path.display(), e),
            }
        }
        None
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML content.
    ///
    /// Only the subset used by this crate is understood: section headers,
    /// `key = value` pairs with string, boolean and string-array values,
    /// and whole-line comments. Unknown sections and keys are ignored.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config = LocEditConfig::default();
        let mut section = Section::Other;

        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim();

            if line.starts_with('#') || line.is_empty() {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                section = match &line[1..line.len() - 1] {
                    "policy" => Section::Policy,
                    "gap-split" | "gap_split" => Section::GapSplit,
                    _ => Section::Other,
                };
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(parse_error(line_no, format!("expected key = value, found '{}'", line)));
            };
            let key = key.trim();
            let value = value.trim();
            let policy = &mut config.policy;

            match (section, key) {
                (Section::Policy, "partial5") => {
                    policy.partial5_policy = unquote(value).parse().map_err(|e| parse_error(line_no, e))?;
                }
                (Section::Policy, "partial3") => {
                    policy.partial3_policy = unquote(value).parse().map_err(|e| parse_error(line_no, e))?;
                }
                (Section::Policy, "extend5") => policy.extend5 = parse_bool(value, line_no)?,
                (Section::Policy, "extend3") => policy.extend3 = parse_bool(value, line_no)?,
                (Section::Policy, "merge") => {
                    policy.merge_policy = unquote(value).parse().map_err(|e| parse_error(line_no, e))?;
                }
                (Section::GapSplit, "options") => {
                    let mut options = GapSplitOptions::NONE;
                    for name in parse_string_array(value) {
                        options |= GapSplitOptions::from_name(&name).ok_or_else(|| {
                            parse_error(line_no, format!("Invalid gap split option: {}", name))
                        })?;
                    }
                    config.gap_split = options;
                }
                _ => log::debug!("ignoring config key '{}' on line {}", key, line_no),
            }
        }

        Ok(config)
    }
}

fn parse_error(line: usize, msg: String) -> ConfigError {
    ConfigError::Parse { line, msg }
}

fn unquote(value: &str) -> &str {
    value.trim_matches('"').trim_matches('\'')
}

fn parse_bool(value: &str, line: usize) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(parse_error(line, format!("expected true or false, found '{}'", value))),
    }
}

/// Parse a TOML array of strings like `["split-in-exon", "make-partial"]`.
fn parse_string_array(value: &str) -> Vec<String> {
    let value = value.trim();
    if !value.starts_with('[') || !value.ends_with(']') {
        return Vec::new();
    }

    let inner = &value[1..value.len() - 1];
    inner
        .split(',')
        .map(|s| s.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
