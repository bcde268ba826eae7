//! Data model types for the product catalog.
//!
//! These types represent the normalized catalog: product lines, records,
//! and the immutable snapshot that consumers filter and render.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Category ────────────────────────────────────────────────────────────────

/// Product line a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Adhesive,
    Sealant,
    Tape,
    Cleaner,
    Other,
}

/// Upstream brand tags (alphanumerics only, lower-cased) and their product line.
const BRAND_CATEGORIES: &[(&str, Category)] = &[
    ("forzabond", Category::Adhesive),
    ("forzaseal", Category::Sealant),
    ("forzatape", Category::Tape),
    ("forzaclean", Category::Cleaner),
];

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adhesive => "adhesive",
            Self::Sealant => "sealant",
            Self::Tape => "tape",
            Self::Cleaner => "cleaner",
            Self::Other => "other",
        }
    }

    /// Map an upstream brand tag (e.g. `forza_bond`, `ForzaSEAL`) to its line.
    pub fn from_brand(brand: &str) -> Option<Self> {
        let key: String = brand
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        BRAND_CATEGORIES
            .iter()
            .find(|(tag, _)| *tag == key)
            .map(|(_, category)| *category)
    }

    /// Lenient parse of a product-line name ("Adhesives", "tape", ...).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "adhesive" | "adhesives" | "bond" => Some(Self::Adhesive),
            "sealant" | "sealants" | "seal" => Some(Self::Sealant),
            "tape" | "tapes" => Some(Self::Tape),
            "cleaner" | "cleaners" | "clean" | "solvent" | "solvents" => Some(Self::Cleaner),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Record ──────────────────────────────────────────────────────────────────

/// One product after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    /// Stable external identifier. Compared case-insensitively.
    pub id: String,
    pub name: String,
    pub short_name: Option<String>,
    pub description: Option<String>,
    pub category: Category,
    /// Normalized industry tags, never empty.
    pub industry: Vec<String>,
    pub chemistry: Option<String>,
    pub technical_data: BTreeMap<String, String>,
    pub sizes: Vec<String>,
    /// Resolved image URL. `None` means render a placeholder.
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub version: Option<String>,
}

impl CatalogRecord {
    /// Lower-cased id used for indexing and tie-breaks.
    pub fn id_key(&self) -> String {
        self.id.to_lowercase()
    }
}

// ── Snapshot ────────────────────────────────────────────────────────────────

/// Where a snapshot's records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotOrigin {
    /// Fetched from the remote catalog service.
    Live,
    /// Built from the static dataset after a failed fetch.
    Fallback,
}

impl SnapshotOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for SnapshotOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full catalog at a point in time. Never mutated after construction;
/// a refresh builds a new one.
#[derive(Debug, Clone)]
pub struct Snapshot {
    records: Vec<CatalogRecord>,
    fetched_at: DateTime<Utc>,
    origin: SnapshotOrigin,
    index: HashMap<String, usize>,
}

impl Snapshot {
    /// Build a snapshot. Duplicate ids keep the last record.
    pub fn new(records: Vec<CatalogRecord>, fetched_at: DateTime<Utc>, origin: SnapshotOrigin) -> Self {
        let mut kept: Vec<CatalogRecord> = Vec::with_capacity(records.len());
        let mut index = HashMap::with_capacity(records.len());
        for record in records {
            match index.get(&record.id_key()) {
                Some(&pos) => {
                    log::warn!("Duplicate product id '{}' in snapshot; keeping the later record", record.id);
                    kept[pos] = record;
                }
                None => {
                    index.insert(record.id_key(), kept.len());
                    kept.push(record);
                }
            }
        }
        Self {
            records: kept,
            fetched_at,
            origin,
            index,
        }
    }

    pub fn empty(fetched_at: DateTime<Utc>, origin: SnapshotOrigin) -> Self {
        Self::new(Vec::new(), fetched_at, origin)
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn origin(&self) -> SnapshotOrigin {
        self.origin
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Case-insensitive lookup by product id.
    pub fn get(&self, id: &str) -> Option<&CatalogRecord> {
        self.index
            .get(&id.trim().to_lowercase())
            .map(|&pos| &self.records[pos])
    }

    /// Time elapsed since the snapshot was fetched.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now.signed_duration_since(self.fetched_at)
    }
}
