//! GitHub release index client for StyLua.
//!
//! Resolves a version token (`"latest"` or a pinned version) to a concrete
//! release, and downloads the platform asset it names. Releases are
//! immutable once fetched and never persisted.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::platform::PlatformInfo;
use crate::version;

/// Release index for the upstream StyLua repository.
pub const RELEASES_URL: &str = "https://api.github.com/repos/JohnnyMorganz/StyLua/releases";

/// Fixed timeout for index and asset fetches. Formatting itself carries no
/// timeout; only the network does.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// One downloadable file attached to a release.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

/// A tagged release as reported by the index.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

impl Release {
    /// The asset carrying this platform's executable.
    pub fn find_asset(&self, platform: &PlatformInfo) -> Result<&ReleaseAsset> {
        self.assets
            .iter()
            .find(|asset| platform.matches_asset(&asset.name))
            .ok_or_else(|| Error::NoMatchingAsset {
                tag: self.tag_name.clone(),
                pattern: format!("*{}*.zip", platform.asset_keyword),
            })
    }
}

/// HTTP client over the release index.
pub struct ReleaseClient {
    http: reqwest::Client,
    base_url: String,
}

impl ReleaseClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(RELEASES_URL)
    }

    /// Client against an alternate index endpoint. Tests point this at a
    /// mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("stylua-ls/", env!("CARGO_PKG_VERSION")));

        if let Some(proxy) = proxy_from_env() {
            builder = builder.proxy(reqwest::Proxy::all(&proxy)?);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.into(),
        })
    }

    /// Resolve a version token to a release.
    ///
    /// `"latest"` hits the dedicated latest endpoint; anything else scans
    /// the release list for the first tag starting with the normalized
    /// (`v`-prefixed) token.
    pub async fn resolve(&self, version_token: &str) -> Result<Release> {
        if version_token == "latest" {
            let url = format!("{}/latest", self.base_url);
            let release = self
                .http
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json::<Release>()
                .await?;
            return Ok(release);
        }

        let wanted_tag = format!("v{}", version::normalize(version_token));
        let releases = self
            .http
            .get(&self.base_url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Release>>()
            .await?;

        releases
            .into_iter()
            .find(|release| release.tag_name.starts_with(&wanted_tag))
            .ok_or_else(|| Error::NoMatchingRelease(version_token.to_string()))
    }

    /// Download a release asset into memory.
    pub async fn download(&self, asset: &ReleaseAsset) -> Result<Vec<u8>> {
        log::info!("downloading {}", asset.browser_download_url);
        let bytes = self
            .http
            .get(&asset.browser_download_url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}

/// HTTPS proxy from the conventional environment variables, if any.
fn proxy_from_env() -> Option<String> {
    std::env::var("HTTPS_PROXY")
        .or_else(|_| std::env::var("https_proxy"))
        .ok()
        .filter(|value| !value.trim().is_empty())
}
