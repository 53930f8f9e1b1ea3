use crate::domain::Scheme;
use crate::error::{FlowrelError, Result};
use crate::flow::{FlowOptions, DEFAULT_REMOTE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = ".flowrel.toml";

/// The only CalVer layout that is implemented
pub const DEFAULT_CALVER_FORMAT: &str = "YYYY.MM.DD";

/// Represents the complete configuration for flowrel.
///
/// Selects the versioning scheme, optional branch overrides and the remote
/// that finished releases are pushed to.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub scheme: Scheme,

    /// Informational only; dates are always written `YYYY.MM.DD`
    #[serde(default = "default_calver_format")]
    pub calver_format: String,

    #[serde(default)]
    pub branches: BranchesConfig,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub version_files: Vec<VersionFile>,
}

/// Explicit branch names; unset entries are auto-detected
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BranchesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub develop: Option<String>,
}

/// A file whose version string is rewritten after a release
///
/// `pattern` contains a `{{version}}` placeholder.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionFile {
    pub path: String,
    pub pattern: String,
}

fn default_calver_format() -> String {
    DEFAULT_CALVER_FORMAT.to_string()
}

fn default_remote() -> String {
    DEFAULT_REMOTE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scheme: Scheme::default(),
            calver_format: default_calver_format(),
            branches: BranchesConfig::default(),
            remote: default_remote(),
            version_files: Vec::new(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| FlowrelError::config(e.to_string()))
    }

    /// Write the configuration as TOML to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let text = toml::to_string_pretty(self).map_err(|e| FlowrelError::config(e.to_string()))?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Flow settings derived from this configuration
    pub fn flow_options(&self, dry_run: bool, verbose: bool) -> FlowOptions {
        FlowOptions {
            scheme: self.scheme,
            remote: Some(self.remote.clone()),
            main_branch: self.branches.main.clone(),
            develop_branch: self.branches.develop.clone(),
            dry_run,
            verbose,
        }
    }
}

/// Whether a configuration file exists in `dir`
pub fn exists_in<P: AsRef<Path>>(dir: P) -> bool {
    dir.as_ref().join(CONFIG_FILE_NAME).is_file()
}

/// Locate the configuration file that [load_config] would read
///
/// Looks in the following order:
/// 1. Custom path provided as parameter (must exist)
/// 2. `.flowrel.toml` in current directory
/// 3. `.flowrel.toml` in the user config directory
pub fn find_config(config_path: Option<&str>) -> Result<Option<PathBuf>> {
    if let Some(path) = config_path {
        let path = PathBuf::from(path);
        if !path.is_file() {
            return Err(FlowrelError::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        return Ok(Some(path));
    }

    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.is_file() {
        return Ok(Some(local));
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global = config_dir.join(CONFIG_FILE_NAME);
        if global.is_file() {
            return Ok(Some(global));
        }
    }

    Ok(None)
}

/// Loads configuration from file or returns defaults.
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If an explicit path is missing, or a file cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    match find_config(config_path)? {
        Some(path) => {
            let text = fs::read_to_string(&path)?;
            toml::from_str(&text)
                .map_err(|e| FlowrelError::config(format!("{}: {}", path.display(), e)))
        }
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.scheme, Scheme::CalVer);
        assert_eq!(config.calver_format, "YYYY.MM.DD");
        assert_eq!(config.remote, "origin");
        assert_eq!(config.branches, BranchesConfig::default());
        assert!(config.version_files.is_empty());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let config = Config::from_toml("scheme = \"SemVer\"").unwrap();
        assert_eq!(config.scheme, Scheme::SemVer);
    }

    #[test]
    fn test_unknown_scheme_is_rejected() {
        let err = Config::from_toml("scheme = \"zerover\"").unwrap_err();
        assert!(err.to_string().contains("unknown scheme"));
    }

    #[test]
    fn test_flow_options_carry_overrides() {
        let config = Config::from_toml(
            r#"
scheme = "semver"
remote = "upstream"

[branches]
main = "trunk"
"#,
        )
        .unwrap();

        let options = config.flow_options(true, false);
        assert_eq!(options.scheme, Scheme::SemVer);
        assert_eq!(options.remote.as_deref(), Some("upstream"));
        assert_eq!(options.main_branch.as_deref(), Some("trunk"));
        assert_eq!(options.develop_branch, None);
        assert!(options.dry_run);
    }

    #[test]
    fn test_unset_branches_are_not_serialized() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(text.contains("scheme = \"calver\""));
        assert!(!text.contains("main"));
        assert!(!text.contains("version_files"));
    }
}
