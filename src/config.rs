use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use crate::types::{OutputFormat, SortKey};

/// File name looked up in the repository root when `--config` is not given.
pub const REPO_CONFIG_FILE: &str = ".git-fame.yml";

/// All settings that can be placed in a .git-fame.yml config file.
/// Every field is optional; omitted fields fall back to CLI defaults.
/// CLI flags always take precedence over values set here.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FameConfig {
    pub revision: Option<String>,
    pub order_by: Option<String>,
    pub format: Option<String>,
    pub use_committer: Option<bool>,

    // File selection
    pub extensions: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub restrict_to: Option<Vec<String>>,
}

impl FameConfig {
    /// Validates semantic constraints that serde cannot enforce.
    /// Called automatically by [`load_config`].
    pub fn validate(&self) -> Result<(), String> {
        if let Some(key) = &self.order_by {
            key.parse::<SortKey>()?;
        }
        if let Some(fmt) = &self.format {
            fmt.parse::<OutputFormat>()?;
        }
        if let Some(rev) = &self.revision {
            if rev.trim().is_empty() {
                return Err("Invalid 'revision' value: must not be empty (omit it to use HEAD)".to_string());
            }
        }
        Ok(())
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        self.order_by.as_deref().and_then(|k| k.parse().ok())
    }

    pub fn output_format(&self) -> Option<OutputFormat> {
        self.format.as_deref().and_then(|f| f.parse().ok())
    }
}

/// Reads, parses, and validates a YAML config file from `path`.
pub fn load_config(path: &Path) -> Result<FameConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read config file '{}': {e}", path.display()))?;
    let cfg: FameConfig = serde_yaml::from_str(&content)
        .map_err(|e| format!("Invalid config file '{}': {e}", path.display()))?;
    cfg.validate()
        .map_err(|e| format!("Config file '{}': {e}", path.display()))?;
    Ok(cfg)
}

/// Picks the config to use: an explicit path must load; otherwise the
/// repository file, then the per-user file, then built-in defaults.
pub fn discover_config(explicit: Option<&Path>, repo: &Path) -> Result<FameConfig, String> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    for candidate in candidate_paths(repo) {
        if candidate.is_file() {
            tracing::info!(path = %candidate.display(), "using config file");
            return load_config(&candidate);
        }
    }
    Ok(FameConfig::default())
}

fn candidate_paths(repo: &Path) -> Vec<PathBuf> {
    let mut paths = vec![repo.join(REPO_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("git-fame").join("config.yml"));
    }
    paths
}

/// Annotated YAML template printed by `--generate-config`.
pub static TEMPLATE: &str = r#"# git-fame configuration file
# Generated by: git-fame --generate-config
#
# All settings are optional. Omit any field to use the built-in default.
# CLI flags always take precedence over values in this file.
# Save this file as .git-fame.yml in your repository root, or as
# git-fame/config.yml in your user config directory.

# ── Attribution ────────────────────────────────────────────────────────────────

# Revision whose tree is attributed.
# revision: "HEAD"

# Credit the committer of each line instead of its author.
# use_committer: false

# ── Output ─────────────────────────────────────────────────────────────────────

# Primary ranking key: lines, commits, files
# order_by: "lines"

# Output format: tabular, csv, json, json-lines
# format: "tabular"

# ── File selection ─────────────────────────────────────────────────────────────

# Only attribute files ending with one of these suffixes.
# extensions:
#   - ".go"
#   - ".md"

# Only attribute files written in these languages (case-insensitive).
# languages:
#   - "rust"
#   - "markdown"

# Skip files matching any of these globs. '*' does not cross '/'.
# exclude:
#   - "vendor/*"
#   - "*.lock"

# Only attribute files matching at least one of these globs.
# restrict_to:
#   - "src/*"
"#;

/// Writes the config template to `out`.
pub fn print_template<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.write_all(TEMPLATE.as_bytes())
}

// ─── Tests ────────────────────────────────────────────────────────────────────
