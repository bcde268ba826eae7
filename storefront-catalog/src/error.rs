/// Errors that can occur while fetching or configuring the catalog.
///
/// None of these reach catalog consumers: a failed fetch routes to the
/// static dataset. They surface only from configuration loading and from
/// [`CatalogSource`](crate::source::CatalogSource) implementations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog service returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Could not decode catalog response: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
