//! Product image resolution and load-failure handling.
//!
//! Resolves raw image references to URLs through a fallback chain
//! (explicit URL, object storage, local path, static table), maps chemistry
//! labels to icons, and tracks per-session retries for images that fail to
//! load.

pub mod chemistry;
pub mod fallback;
pub mod resolver;
pub mod retry;

pub use chemistry::{DEFAULT_CHEMISTRY_ICON, chemistry_icon};
pub use fallback::fallback_for;
pub use resolver::{
    ImageResolver, ImageSource, PLACEHOLDER_IMAGE, PRODUCT_IMAGES_SEGMENT, ResolvedImage,
    industry_segment,
};
pub use retry::{LoadState, RetryController, RetryDecision};
