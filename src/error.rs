//! Error types for binary provisioning and formatting.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced while locating, installing, or invoking the StyLua binary.
#[derive(Debug, Error)]
pub enum Error {
    /// The running OS is not one of the three platforms StyLua ships
    /// binaries for.
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// No release in the index matched the requested version token.
    #[error("no release found matching version '{0}'")]
    NoMatchingRelease(String),

    /// The matched release carries no downloadable asset for this platform.
    #[error("release {tag} has no asset matching '{pattern}'")]
    NoMatchingAsset { tag: String, pattern: String },

    /// The downloaded archive did not contain the expected executable entry.
    #[error("downloaded archive does not contain '{0}'")]
    MissingArchiveEntry(String),

    /// An explicitly configured binary path does not exist on disk.
    /// This is fatal to the session: a configured path never falls back
    /// to a download.
    #[error("configured stylua path does not exist: {}", .0.display())]
    ConfiguredPathMissing(PathBuf),

    /// The formatter process could not be started.
    #[error("failed to launch '{binary}': {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// The formatter wrote to stderr or exited unsuccessfully. Carries the
    /// diagnostic text verbatim for the user.
    #[error("{0}")]
    Formatter(String),

    #[error("failed to fetch release data: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to read release archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
