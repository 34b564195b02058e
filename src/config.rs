//! Configuration surface shared by the LSP server and the CLI.
//!
//! Editors send these settings as LSP initialization options (and again on
//! `workspace/didChangeConfiguration`) under the `stylua` section, with
//! camelCase keys. The CLI maps its flags onto the same struct.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings controlling where the StyLua binary comes from and how it runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Explicit path to a stylua binary. Takes precedence over the managed
    /// download, and is fatal if set but missing on disk.
    pub stylua_path: Option<String>,
    /// Desired release version: an exact version (with or without `v`) or
    /// `"latest"`.
    pub stylua_version: Option<String>,
    /// Overrides `stylua_version` when set.
    pub target_release_version: Option<String>,
    /// Whether to compare the installed binary against the desired release
    /// and prompt for reinstallation on mismatch.
    pub check_update: bool,
    /// Path to a stylua.toml read by the binary itself; passed through
    /// unvalidated.
    pub config_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stylua_path: None,
            stylua_version: None,
            target_release_version: None,
            check_update: true,
            config_path: None,
        }
    }
}

impl Settings {
    /// The version token reconciliation works against.
    /// `targetReleaseVersion` wins over `styluaVersion`; absent both, track
    /// the latest release.
    pub fn desired_version(&self) -> &str {
        self.target_release_version
            .as_deref()
            .or(self.stylua_version.as_deref())
            .unwrap_or("latest")
    }
}

/// Directory holding the downloaded binary.
///
/// `STYLUA_LS_STORAGE_DIR` overrides the platform data directory.
pub fn storage_dir() -> PathBuf {
    use etcetera::{choose_base_strategy, BaseStrategy};

    if let Ok(dir) = std::env::var("STYLUA_LS_STORAGE_DIR") {
        return PathBuf::from(dir);
    }

    match choose_base_strategy() {
        Ok(strategy) => strategy.data_dir().join("stylua-ls"),
        Err(e) => {
            log::debug!("failed to determine data directory: {e}");
            PathBuf::from(".stylua-ls")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.check_update);
        assert_eq!(settings.desired_version(), "latest");
    }

    #[test]
    fn test_desired_version_precedence() {
        let settings = Settings {
            stylua_version: Some("0.19.0".to_string()),
            target_release_version: Some("0.20.0".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.desired_version(), "0.20.0");

        let settings = Settings {
            stylua_version: Some("0.19.0".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.desired_version(), "0.19.0");
    }

    #[test]
    fn test_camel_case_keys() {
        let settings: Settings = serde_json::from_value(serde_json::json!({
            "styluaPath": "/usr/bin/stylua",
            "checkUpdate": false,
            "targetReleaseVersion": "v0.20.0"
        }))
        .unwrap();
        assert_eq!(settings.stylua_path.as_deref(), Some("/usr/bin/stylua"));
        assert!(!settings.check_update);
        assert_eq!(settings.desired_version(), "v0.20.0");
    }
}
