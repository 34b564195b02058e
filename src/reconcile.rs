//! Binary path resolution and update reconciliation.
//!
//! Each formatting session works against an explicit [`ResolvedBinary`]
//! produced here, refreshed on activation, configuration change, and
//! explicit reinstall. There is no implicit global path state.

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::install;
use crate::invoke;
use crate::platform;
use crate::release::ReleaseClient;
use crate::version;

/// Where a session's binary came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinarySource {
    /// Explicit `styluaPath` setting.
    Configured,
    /// Managed download in local storage.
    Downloaded,
}

/// The session context every formatting call runs against.
#[derive(Debug, Clone)]
pub struct ResolvedBinary {
    pub path: PathBuf,
    pub source: BinarySource,
}

/// Outcome of an update check. Failures are folded into `Unknown`: the
/// check is advisory and never invalidates a resolved binary.
#[derive(Debug, Clone)]
pub enum UpdateStatus {
    UpToDate { current: String },
    UpdateAvailable { current: String, tag: String },
    Unknown { warning: String },
}

/// Locate a binary that already exists, without triggering a download.
///
/// A configured path wins; if it is missing on disk that is an error with
/// no fallback. Otherwise the previously installed binary is used, and
/// `None` means nothing is installed yet.
pub fn locate_existing(settings: &Settings, storage: &Path) -> Result<Option<ResolvedBinary>> {
    if let Some(configured) = &settings.stylua_path {
        let path = PathBuf::from(configured);
        if !path.is_file() {
            return Err(Error::ConfiguredPathMissing(path));
        }
        return Ok(Some(ResolvedBinary {
            path,
            source: BinarySource::Configured,
        }));
    }

    let platform = platform::current()?;
    let installed = install::installed_path(storage, &platform);
    if installed.is_file() {
        return Ok(Some(ResolvedBinary {
            path: installed,
            source: BinarySource::Downloaded,
        }));
    }
    Ok(None)
}

/// Resolve the binary to format with, installing the desired version when
/// nothing is available yet.
pub async fn resolve_binary(
    settings: &Settings,
    storage: &Path,
    client: &ReleaseClient,
) -> Result<ResolvedBinary> {
    if let Some(existing) = locate_existing(settings, storage)? {
        return Ok(existing);
    }

    let binary = install::install(client, storage, settings.desired_version()).await?;
    Ok(ResolvedBinary {
        path: binary.path,
        source: BinarySource::Downloaded,
    })
}

/// Compare the resolved binary against the desired version.
///
/// Never fails: version-check problems degrade to `Unknown` with a warning
/// for the user, and the binary stays usable.
pub async fn check_for_update(
    binary: &ResolvedBinary,
    settings: &Settings,
    client: &ReleaseClient,
) -> UpdateStatus {
    let current = match invoke::query_version(&binary.path).await {
        Ok(current) => current,
        Err(e) => {
            return UpdateStatus::Unknown {
                warning: format!("could not determine stylua version: {e}"),
            }
        }
    };

    let desired = settings.desired_version();
    let latest = if desired == "latest" {
        match client.resolve("latest").await {
            Ok(release) => Some(release.tag_name),
            Err(e) => {
                return UpdateStatus::Unknown {
                    warning: format!("could not fetch latest stylua release: {e}"),
                }
            }
        }
    } else {
        None
    };

    if version::is_up_to_date(&current, desired, latest.as_deref()) {
        return UpdateStatus::UpToDate { current };
    }

    // Name the tag the user would move to.
    let tag = match latest {
        Some(tag) => tag,
        None => match client.resolve(desired).await {
            Ok(release) => release.tag_name,
            Err(e) => {
                return UpdateStatus::Unknown {
                    warning: format!("stylua {current} does not match '{desired}', but the release could not be resolved: {e}"),
                }
            }
        },
    };

    UpdateStatus::UpdateAvailable { current, tag }
}
