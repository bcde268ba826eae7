use std::time::Duration;

use storefront_catalog::{
    CACHE_BUST_PARAM, CatalogError, CatalogService, CatalogSource, FreshnessPolicy,
    HttpCatalogSource, StaticDataset,
};
use storefront_core::SnapshotOrigin;
use storefront_media::ImageResolver;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve a single HTTP response on a loopback port. The handle yields the
/// request head the server received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}/products", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&head).into_owned()
    });

    (endpoint, handle)
}

fn source(endpoint: String) -> HttpCatalogSource {
    HttpCatalogSource::new(Some(endpoint), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_forced_fetch_sends_cache_bust_and_accept() {
    let (endpoint, server) = serve_once("200 OK", r#"[{"id": "OA75", "name": "ForzaBOND OA75"}]"#).await;

    let values = source(endpoint).fetch(true).await.unwrap();
    let head = server.await.unwrap();

    assert_eq!(values.len(), 1);
    let request_line = head.lines().next().unwrap_or_default();
    assert!(
        request_line.starts_with(&format!("GET /products?{CACHE_BUST_PARAM}=")),
        "request line: {request_line}"
    );
    assert!(head.to_lowercase().contains("accept: application/json"), "head: {head}");
}

#[tokio::test]
async fn test_plain_fetch_has_no_cache_bust() {
    let (endpoint, server) = serve_once("200 OK", r#"{"products": []}"#).await;

    let values = source(endpoint).fetch(false).await.unwrap();
    let head = server.await.unwrap();

    assert!(values.is_empty());
    assert!(head.starts_with("GET /products HTTP/1.1"), "head: {head}");
}

#[tokio::test]
async fn test_server_error_is_status_error() {
    let (endpoint, server) = serve_once("500 Internal Server Error", "oops").await;

    let result = source(endpoint).fetch(false).await;
    server.await.unwrap();

    assert!(matches!(result, Err(CatalogError::Status { status: 500, .. })));
}

#[tokio::test]
async fn test_server_error_serves_fallback_snapshot() {
    let (endpoint, server) = serve_once("500 Internal Server Error", "oops").await;
    let service = CatalogService::new(
        source(endpoint),
        ImageResolver::local(),
        StaticDataset::bundled(),
        FreshnessPolicy::default(),
    );

    let snapshot = service.get_catalog(false).await;
    server.await.unwrap();

    assert_eq!(snapshot.origin(), SnapshotOrigin::Fallback);
    assert!(snapshot.get("OA75").is_some());
}

#[tokio::test]
async fn test_live_response_serves_live_snapshot() {
    let (endpoint, server) = serve_once("200 OK", r#"[{"id": "T215", "name": "ForzaTAPE T215"}]"#).await;
    let service = CatalogService::new(
        source(endpoint),
        ImageResolver::local(),
        StaticDataset::bundled(),
        FreshnessPolicy::default(),
    );

    let snapshot = service.get_catalog(true).await;
    server.await.unwrap();

    assert_eq!(snapshot.origin(), SnapshotOrigin::Live);
    assert_eq!(snapshot.len(), 1);
}
