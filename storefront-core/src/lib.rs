//! Product catalog data model and upstream record normalization.
//!
//! This crate defines the normalized catalog types and the pipeline that
//! turns heterogeneous upstream records into them. It has no network or
//! image-storage knowledge; image resolution is injected through
//! [`ImageResolve`].

pub mod error;
pub mod normalize;
pub mod raw;
pub mod types;

pub use error::RecordError;
pub use normalize::{
    DEFAULT_INDUSTRY, ImageResolve, NormalizeReport, normalize_industry, normalize_record,
    normalize_records,
};
pub use raw::RawProduct;
pub use types::*;
