//! Downloads a StyLua release asset and installs the executable it contains.

use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::platform::{self, PlatformInfo};
use crate::release::ReleaseClient;

/// A binary placed in local storage by the installer.
#[derive(Debug, Clone)]
pub struct InstalledBinary {
    pub path: PathBuf,
    /// Release tag the binary came from.
    pub tag: String,
}

/// Where the executable for a platform lives inside the storage directory.
pub fn installed_path(storage: &Path, platform: &PlatformInfo) -> PathBuf {
    storage.join(platform.executable)
}

/// Resolve `version_token`, download its platform asset, and write the
/// executable into `storage` with execute permissions.
pub async fn install(
    client: &ReleaseClient,
    storage: &Path,
    version_token: &str,
) -> Result<InstalledBinary> {
    let platform = platform::current()?;
    let release = client.resolve(version_token).await?;
    let asset = release.find_asset(&platform)?;

    log::info!("installing stylua {} ({})", release.tag_name, asset.name);
    let archive = client.download(asset).await?;
    let executable = extract_executable(&archive, platform.executable)?;

    std::fs::create_dir_all(storage)?;
    let path = installed_path(storage, &platform);
    std::fs::write(&path, executable)?;
    make_executable(&path)?;

    log::info!("installed stylua {} at {}", release.tag_name, path.display());
    Ok(InstalledBinary {
        path,
        tag: release.tag_name,
    })
}

/// Pull the single expected executable entry out of a release zip,
/// discarding every other entry.
fn extract_executable(archive: &[u8], executable_name: &str) -> Result<Vec<u8>> {
    let mut zip = zip::ZipArchive::new(Cursor::new(archive))?;
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        if entry.is_dir() {
            continue;
        }
        let matches = entry
            .enclosed_name()
            .and_then(|p| p.file_name().map(|n| n == std::ffi::OsStr::new(executable_name)))
            .unwrap_or(false);
        if !matches {
            continue;
        }
        let mut contents = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut contents)?;
        return Ok(contents);
    }
    Err(Error::MissingArchiveEntry(executable_name.to_string()))
}

/// Set execute permission bits. No-op on Windows, where the `.exe` suffix
/// carries the meaning.
#[allow(unused_variables)]
fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let metadata = std::fs::metadata(path)?;
        let mut permissions = metadata.permissions();
        permissions.set_mode(permissions.mode() | 0o755);
        std::fs::set_permissions(path, permissions)?;
    }
    Ok(())
}
