//! Platform capability table for StyLua release assets.
//!
//! One table maps each supported operating system to the executable filename
//! StyLua ships and the keyword its release archives carry for that platform.

use crate::error::{Error, Result};

/// What a supported platform looks like in a StyLua release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformInfo {
    /// Name of the executable inside the release archive (and on disk after
    /// installation).
    pub executable: &'static str,
    /// Substring identifying this platform's zip asset in the release index.
    pub asset_keyword: &'static str,
}

const PLATFORMS: &[(&str, PlatformInfo)] = &[
    (
        "linux",
        PlatformInfo {
            executable: "stylua",
            asset_keyword: "linux",
        },
    ),
    (
        "macos",
        PlatformInfo {
            executable: "stylua",
            asset_keyword: "macos",
        },
    ),
    (
        "windows",
        PlatformInfo {
            executable: "stylua.exe",
            asset_keyword: "win64",
        },
    ),
];

/// Look up the capability entry for an OS identifier (`std::env::consts::OS`
/// values).
pub fn lookup(os: &str) -> Result<PlatformInfo> {
    PLATFORMS
        .iter()
        .find(|(name, _)| *name == os)
        .map(|(_, info)| *info)
        .ok_or_else(|| Error::UnsupportedPlatform(os.to_string()))
}

/// Capability entry for the platform this process is running on.
pub fn current() -> Result<PlatformInfo> {
    lookup(std::env::consts::OS)
}

impl PlatformInfo {
    /// Whether a release asset filename is the archive for this platform.
    pub fn matches_asset(&self, asset_name: &str) -> bool {
        asset_name.ends_with(".zip") && asset_name.contains(self.asset_keyword)
    }
}
