//! Top-level polytrim configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, MemberConflictPolicy, ModuleFormat, OutputConfig};
use crate::errors::ConfigError;

/// Project config file name looked up in the analysis root.
pub const PROJECT_CONFIG_FILE: &str = "polytrim.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`POLYTRIM_*`)
/// 3. Project config (`polytrim.toml` in project root)
/// 4. User config (`~/.polytrim/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PolytrimConfig {
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub modules: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub member_conflicts: Option<MemberConflictPolicy>,
    pub catalog_path: Option<PathBuf>,
    pub format: Option<ModuleFormat>,
    pub summary: Option<bool>,
}

impl PolytrimConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::Toml { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(path = %user_config_path.display(), error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        tracing::debug!(
            modules = config.analysis.effective_modules().len(),
            exclude = config.analysis.exclude.len(),
            policy = config.analysis.effective_member_conflicts().as_str(),
            "configuration resolved"
        );
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing and embedding hosts).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Toml {
            origin: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &PolytrimConfig) -> Result<(), ConfigError> {
        for (field, selectors) in [
            ("analysis.modules", &config.analysis.modules),
            ("analysis.exclude", &config.analysis.exclude),
        ] {
            if selectors.iter().any(|s| s.trim().is_empty()) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "selectors must not be empty strings".to_string(),
                });
            }
        }
        if let Some(ref prefix) = config.output.import_prefix {
            if prefix.contains('"') || prefix.contains('\n') {
                return Err(ConfigError::ValidationFailed {
                    field: "output.import_prefix".to_string(),
                    message: "must not contain quotes or newlines".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.polytrim/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut PolytrimConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let file_config: PolytrimConfig =
            toml::from_str(&content).map_err(|e| ConfigError::Toml {
                origin: path.display().to_string(),
                message: e.to_string(),
            })?;

        // Relative catalog paths are relative to the file that names them.
        let mut file_config = file_config;
        if let Some(ref catalog) = file_config.analysis.catalog_path {
            if catalog.is_relative() {
                if let Some(dir) = path.parent() {
                    file_config.analysis.catalog_path = Some(dir.join(catalog));
                }
            }
        }

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a value set.
    fn merge(base: &mut PolytrimConfig, other: &PolytrimConfig) {
        // Analysis
        if !other.analysis.modules.is_empty() {
            base.analysis.modules = other.analysis.modules.clone();
        }
        if !other.analysis.exclude.is_empty() {
            base.analysis.exclude = other.analysis.exclude.clone();
        }
        if other.analysis.member_conflicts.is_some() {
            base.analysis.member_conflicts = other.analysis.member_conflicts;
        }
        if other.analysis.catalog_path.is_some() {
            base.analysis.catalog_path = other.analysis.catalog_path.clone();
        }
        if other.analysis.fail_on_parse_errors.is_some() {
            base.analysis.fail_on_parse_errors = other.analysis.fail_on_parse_errors;
        }

        // Output
        if other.output.format.is_some() {
            base.output.format = other.output.format;
        }
        if other.output.import_prefix.is_some() {
            base.output.import_prefix = other.output.import_prefix.clone();
        }
        if other.output.summary.is_some() {
            base.output.summary = other.output.summary;
        }
        if other.output.sort.is_some() {
            base.output.sort = other.output.sort;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `POLYTRIM_MODULES`, `POLYTRIM_FORMAT`, etc.
    fn apply_env_overrides(config: &mut PolytrimConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("POLYTRIM_MODULES") {
            let modules = split_list(&val);
            if !modules.is_empty() {
                config.analysis.modules = modules;
            }
        }
        if let Ok(val) = std::env::var("POLYTRIM_EXCLUDE") {
            config.analysis.exclude = split_list(&val);
        }
        if let Ok(val) = std::env::var("POLYTRIM_MEMBER_CONFLICTS") {
            let policy =
                MemberConflictPolicy::parse_str(&val).ok_or_else(|| ConfigError::InvalidValue {
                    field: "POLYTRIM_MEMBER_CONFLICTS".to_string(),
                    message: format!("expected 'last-wins' or 'reject', got '{val}'"),
                })?;
            config.analysis.member_conflicts = Some(policy);
        }
        if let Ok(val) = std::env::var("POLYTRIM_FORMAT") {
            let format = ModuleFormat::parse_str(&val).ok_or_else(|| ConfigError::InvalidValue {
                field: "POLYTRIM_FORMAT".to_string(),
                message: format!("expected 'esm' or 'cjs', got '{val}'"),
            })?;
            config.output.format = Some(format);
        }
        if let Ok(val) = std::env::var("POLYTRIM_SUMMARY") {
            if let Ok(v) = val.parse::<bool>() {
                config.output.summary = Some(v);
            }
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut PolytrimConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.modules {
            config.analysis.modules = v.clone();
        }
        if let Some(ref v) = cli.exclude {
            config.analysis.exclude = v.clone();
        }
        if let Some(v) = cli.member_conflicts {
            config.analysis.member_conflicts = Some(v);
        }
        if let Some(ref v) = cli.catalog_path {
            config.analysis.catalog_path = Some(v.clone());
        }
        if let Some(v) = cli.format {
            config.output.format = Some(v);
        }
        if let Some(v) = cli.summary {
            config.output.summary = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

fn split_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns the user-level polytrim config directory: `~/.polytrim/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".polytrim"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
