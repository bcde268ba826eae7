use storefront_core::ImageResolve;

use crate::fallback::fallback_for;

/// Path segment under which product images live, locally and in object storage.
pub const PRODUCT_IMAGES_SEGMENT: &str = "product-images";

/// Image shown when no candidate URL exists or every candidate failed.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder-product.svg";

/// Known misspelling in upstream absolute URLs and its correction.
const UPSTREAM_TYPO: (&str, &str) = ("/prodcut-images/", "/product-images/");

/// Industries whose folder name is not plain title case.
const INDUSTRY_SEGMENT_OVERRIDES: &[(&str, &str)] = &[
    ("rv", "RV"),
    ("hvac", "HVAC"),
    ("diy", "DIY"),
    ("oem", "OEM"),
    ("marine", "Marine"),
    ("construction", "Construction"),
    ("transportation", "Transportation"),
    ("industrial", "Industrial"),
];

/// Where a resolved URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Absolute or root-relative URL supplied by upstream.
    Explicit,
    /// Derived from the object-storage base.
    ObjectStorage,
    /// Flat root-relative path (no object storage configured).
    Local,
    /// Static id → path table.
    FallbackTable,
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit => write!(f, "explicit"),
            Self::ObjectStorage => write!(f, "object storage"),
            Self::Local => write!(f, "local"),
            Self::FallbackTable => write!(f, "fallback table"),
        }
    }
}

/// A resolved image URL and the step of the chain that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    pub url: String,
    pub source: ImageSource,
}

/// Turns raw image references into fetchable URLs.
///
/// With a storage base configured, bare filenames resolve into object storage
/// under an industry folder; without one they resolve to a flat local path.
#[derive(Debug, Clone, Default)]
pub struct ImageResolver {
    storage_base: Option<String>,
}

impl ImageResolver {
    pub fn new(storage_base: Option<String>) -> Self {
        let storage_base = storage_base
            .map(|b| b.trim().trim_end_matches('/').to_string())
            .filter(|b| !b.is_empty());
        Self { storage_base }
    }

    /// Resolver for the local/offline topology.
    pub fn local() -> Self {
        Self::default()
    }

    pub fn storage_base(&self) -> Option<&str> {
        self.storage_base.as_deref()
    }

    /// Resolve a raw image field. Returns `None` for absent or blank input.
    pub fn resolve_image(&self, raw: Option<&str>, industry_hint: Option<&str>) -> Option<String> {
        self.resolve_detailed(raw, industry_hint).map(|r| r.url)
    }

    /// Like [`resolve_image`](Self::resolve_image), reporting which step matched.
    pub fn resolve_detailed(
        &self,
        raw: Option<&str>,
        industry_hint: Option<&str>,
    ) -> Option<ResolvedImage> {
        let raw = raw.map(str::trim).filter(|r| !r.is_empty())?;

        if is_absolute_url(raw) {
            return Some(ResolvedImage {
                url: raw.replace(UPSTREAM_TYPO.0, UPSTREAM_TYPO.1),
                source: ImageSource::Explicit,
            });
        }
        if raw.starts_with('/') {
            return Some(ResolvedImage {
                url: raw.to_string(),
                source: ImageSource::Explicit,
            });
        }

        let filename = encode_segment(raw);
        match &self.storage_base {
            Some(base) => {
                let url = match industry_hint.and_then(industry_segment) {
                    Some(segment) => format!(
                        "{base}/{PRODUCT_IMAGES_SEGMENT}/{}/{filename}",
                        encode_segment(&segment)
                    ),
                    None => format!("{base}/{PRODUCT_IMAGES_SEGMENT}/{filename}"),
                };
                Some(ResolvedImage {
                    url,
                    source: ImageSource::ObjectStorage,
                })
            }
            None => Some(ResolvedImage {
                url: local_path(raw),
                source: ImageSource::Local,
            }),
        }
    }

    /// Full chain for a record: raw field first, then the static table by id.
    pub fn resolve_for_id(
        &self,
        raw: Option<&str>,
        industry_hint: Option<&str>,
        id: &str,
    ) -> Option<ResolvedImage> {
        let raw_present = raw.map(str::trim).is_some_and(|r| !r.is_empty());
        if raw_present {
            return self.resolve_detailed(raw, industry_hint);
        }
        fallback_for(id).map(|path| ResolvedImage {
            url: path.to_string(),
            source: ImageSource::FallbackTable,
        })
    }

    /// Whether a URL points into the configured object storage.
    pub fn is_object_storage_url(&self, url: &str) -> bool {
        self.storage_base
            .as_deref()
            .and_then(|base| url.strip_prefix(base))
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }

    /// Substitute URLs to try after `failing_url` fails to load, best first.
    ///
    /// The local mockup only makes sense as a replacement for an object-storage
    /// URL; the table entry applies to any failure.
    pub fn retry_candidates(&self, raw: Option<&str>, id: &str, failing_url: &str) -> Vec<String> {
        let mut candidates = Vec::new();
        if self.is_object_storage_url(failing_url) {
            if let Some(name) = raw.and_then(filename_of) {
                candidates.push(local_path(name));
            }
        }
        if let Some(path) = fallback_for(id) {
            candidates.push(path.to_string());
        }
        candidates.retain(|c| c != failing_url);
        candidates.dedup();
        candidates
    }
}

impl ImageResolve for ImageResolver {
    fn resolve_for_record(
        &self,
        raw: Option<&str>,
        industry_hint: Option<&str>,
        id: &str,
    ) -> Option<String> {
        self.resolve_for_id(raw, industry_hint, id).map(|r| r.url)
    }
}

/// Folder name for an industry hint: `"marine_industry"` → `"Marine"`,
/// `"heavy_equipment"` → `"Heavy Equipment"`.
pub fn industry_segment(hint: &str) -> Option<String> {
    let lower = hint.trim().to_lowercase();
    let base = lower.strip_suffix("_industry").unwrap_or(lower.as_str());
    let words: Vec<&str> = base
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return None;
    }

    let key = words.join(" ");
    if let Some((_, canonical)) = INDUSTRY_SEGMENT_OVERRIDES.iter().find(|(k, _)| *k == key) {
        return Some(canonical.to_string());
    }

    Some(
        words
            .iter()
            .map(|w| title_case(w))
            .collect::<Vec<_>>()
            .join(" "),
    )
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_absolute_url(s: &str) -> bool {
    if s.starts_with("//") {
        return true;
    }
    match s.split_once("://") {
        Some((scheme, rest)) => {
            !scheme.is_empty()
                && !rest.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Last path component of a raw image field.
fn filename_of(raw: &str) -> Option<&str> {
    raw.trim()
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
}

fn local_path(filename: &str) -> String {
    let name = filename_of(filename).unwrap_or(filename);
    format!("/{PRODUCT_IMAGES_SEGMENT}/{}", encode_segment(name))
}

fn encode_segment(segment: &str) -> String {
    segment.replace(' ', "%20")
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
