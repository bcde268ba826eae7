use std::time::Duration;

use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::config::CatalogSettings;
use crate::error::CatalogError;

/// Query parameter carrying the cache-busting timestamp on forced refreshes.
pub const CACHE_BUST_PARAM: &str = "_ts";

/// Somewhere the raw catalog can be fetched from.
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    /// Fetch the upstream records. `cache_bust` asks intermediaries to skip
    /// their caches.
    async fn fetch(&self, cache_bust: bool) -> Result<Vec<Value>, CatalogError>;
}

impl<S: CatalogSource + ?Sized> CatalogSource for std::sync::Arc<S> {
    async fn fetch(&self, cache_bust: bool) -> Result<Vec<Value>, CatalogError> {
        (**self).fetch(cache_bust).await
    }
}

/// HTTP client for the remote catalog service.
pub struct HttpCatalogSource {
    http: reqwest::Client,
    endpoint: Option<String>,
}

impl HttpCatalogSource {
    /// Create a client. A `None` endpoint is allowed; every fetch then fails
    /// with a configuration error and the orchestrator serves the static
    /// dataset.
    pub fn new(endpoint: Option<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.filter(|e| !e.trim().is_empty()),
        })
    }

    pub fn from_settings(settings: &CatalogSettings) -> Result<Self, CatalogError> {
        Self::new(settings.endpoint.clone(), settings.timeout)
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self, cache_bust: bool) -> Result<Vec<Value>, CatalogError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or_else(|| CatalogError::config("No catalog endpoint configured"))?;

        let mut request = self.http.get(endpoint).header(ACCEPT, "application/json");
        if cache_bust {
            let ts = chrono::Utc::now().timestamp_millis().to_string();
            request = request.query(&[(CACHE_BUST_PARAM, ts)]);
        }

        log::debug!("Fetching catalog from {endpoint} (cache_bust={cache_bust})");
        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: endpoint.to_string(),
            });
        }

        let text = resp.text().await?;
        decode_catalog(&text)
    }
}

/// Decode a catalog body: a JSON array of records, or an object wrapping the
/// array under `products` or `data`.
pub fn decode_catalog(text: &str) -> Result<Vec<Value>, CatalogError> {
    let value: Value = serde_json::from_str(text).map_err(|e| {
        CatalogError::decode(format!(
            "{e}. Response: {}",
            text.chars().take(200).collect::<String>()
        ))
    })?;

    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut obj) => match obj.remove("products").or_else(|| obj.remove("data")) {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(CatalogError::decode(
                "expected an array of products or an object with a 'products' array",
            )),
        },
        other => Err(CatalogError::decode(format!(
            "expected an array of products, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_array() {
        let items = decode_catalog(r#"[{"id": "A1"}, {"id": "A2"}]"#).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_decode_wrapped() {
        assert_eq!(decode_catalog(r#"{"products": [{"id": "A1"}]}"#).unwrap().len(), 1);
        assert_eq!(decode_catalog(r#"{"data": []}"#).unwrap().len(), 0);
    }

    #[test]
    fn test_decode_rejects_other_shapes() {
        assert!(matches!(decode_catalog("{\"ok\": true}"), Err(CatalogError::Decode(_))));
        assert!(matches!(decode_catalog("42"), Err(CatalogError::Decode(_))));
        assert!(matches!(decode_catalog("<html>"), Err(CatalogError::Decode(_))));
    }

    #[tokio::test]
    async fn test_missing_endpoint_is_config_error() {
        let source = HttpCatalogSource::new(Some("  ".to_string()), Duration::from_secs(1)).unwrap();
        assert!(source.endpoint().is_none());
        assert!(matches!(source.fetch(false).await, Err(CatalogError::Config(_))));
    }
}
