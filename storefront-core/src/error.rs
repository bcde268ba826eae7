/// Errors raised while normalizing a single upstream record.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("record has no id")]
    MissingId,

    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),
}
