//! Release Resolver behavior against a mocked release index.

use stylua_ls_lib::release::ReleaseClient;
use stylua_ls_lib::Error;

const LATEST_BODY: &str = r#"{
    "tag_name": "v0.20.0",
    "html_url": "https://example.com/releases/v0.20.0",
    "assets": [
        {"name": "stylua-0.20.0-linux.zip", "browser_download_url": "https://example.com/linux.zip"},
        {"name": "stylua-0.20.0-macos.zip", "browser_download_url": "https://example.com/macos.zip"},
        {"name": "stylua-0.20.0-win64.zip", "browser_download_url": "https://example.com/win64.zip"}
    ]
}"#;

const INDEX_BODY: &str = r#"[
    {"tag_name": "v0.20.0", "html_url": "", "assets": []},
    {"tag_name": "v0.19.1", "html_url": "", "assets": []},
    {"tag_name": "v0.19.0", "html_url": "", "assets": []}
]"#;

#[tokio::test]
async fn test_resolve_latest_uses_latest_endpoint() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/releases/latest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(LATEST_BODY)
        .create_async()
        .await;

    let client = ReleaseClient::with_base_url(format!("{}/releases", server.url())).unwrap();
    let release = client.resolve("latest").await.unwrap();

    mock.assert_async().await;
    assert_eq!(release.tag_name, "v0.20.0");
    assert_eq!(release.assets.len(), 3);
}

#[tokio::test]
async fn test_resolve_pinned_scans_index() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/releases")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(INDEX_BODY)
        .expect(2)
        .create_async()
        .await;

    let client = ReleaseClient::with_base_url(format!("{}/releases", server.url())).unwrap();

    // With and without the v prefix.
    let release = client.resolve("0.19.1").await.unwrap();
    assert_eq!(release.tag_name, "v0.19.1");
    let release = client.resolve("v0.19.0").await.unwrap();
    assert_eq!(release.tag_name, "v0.19.0");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_resolve_no_matching_release() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/releases")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(INDEX_BODY)
        .create_async()
        .await;

    let client = ReleaseClient::with_base_url(format!("{}/releases", server.url())).unwrap();
    let err = client.resolve("9.9.9").await.unwrap_err();
    assert!(matches!(err, Error::NoMatchingRelease(ref token) if token == "9.9.9"));
}

#[tokio::test]
async fn test_resolve_surfaces_http_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/releases/latest")
        .with_status(503)
        .create_async()
        .await;

    let client = ReleaseClient::with_base_url(format!("{}/releases", server.url())).unwrap();
    let err = client.resolve("latest").await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}

#[tokio::test]
async fn test_download_asset() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/assets/stylua.zip")
        .with_status(200)
        .with_body(&b"PK\x03\x04payload"[..])
        .create_async()
        .await;

    let client = ReleaseClient::with_base_url(format!("{}/releases", server.url())).unwrap();
    let asset = stylua_ls_lib::release::ReleaseAsset {
        name: "stylua-0.20.0-linux.zip".to_string(),
        browser_download_url: format!("{}/assets/stylua.zip", server.url()),
    };
    let bytes = client.download(&asset).await.unwrap();
    assert!(bytes.starts_with(b"PK\x03\x04"));
}
