//! Field normalization from upstream records to [`CatalogRecord`].
//!
//! Each upstream record is decoded on its own so a single malformed entry
//! is dropped with a warning instead of failing the whole catalog.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::RecordError;
use crate::raw::{RawProduct, RawSize, RawSizes, RawTechnicalData, ScalarValue, StringOrList};
use crate::types::{CatalogRecord, Category};

/// Industry assigned to records that carry no usable industry tag.
pub const DEFAULT_INDUSTRY: &str = "general";

/// Resolves a record's raw image field to a usable URL.
pub trait ImageResolve {
    fn resolve_for_record(
        &self,
        raw: Option<&str>,
        industry_hint: Option<&str>,
        id: &str,
    ) -> Option<String>;
}

/// Counts of what happened during a normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub accepted: usize,
    pub dropped_malformed: usize,
    pub dropped_inactive: usize,
    /// Ids that appeared more than once (last record kept).
    pub duplicates: Vec<String>,
}

/// Normalize a batch of upstream records.
///
/// Malformed and inactive records are dropped; duplicate ids keep the last
/// occurrence at the position of the first.
pub fn normalize_records<R: ImageResolve + ?Sized>(
    values: Vec<Value>,
    images: &R,
) -> (Vec<CatalogRecord>, NormalizeReport) {
    let mut report = NormalizeReport::default();
    let mut records: Vec<CatalogRecord> = Vec::with_capacity(values.len());
    let mut positions: std::collections::HashMap<String, usize> = std::collections::HashMap::new();

    for (i, value) in values.into_iter().enumerate() {
        let record = match serde_json::from_value::<RawProduct>(value)
            .map_err(RecordError::from)
            .and_then(|raw| normalize_record(raw, images))
        {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Dropping upstream record #{i}: {e}");
                report.dropped_malformed += 1;
                continue;
            }
        };

        if !record.is_active {
            log::debug!("Skipping inactive product '{}'", record.id);
            report.dropped_inactive += 1;
            continue;
        }

        let key = record.id_key();
        match positions.get(&key) {
            Some(&pos) => {
                log::warn!("Duplicate product id '{}'; keeping the later record", record.id);
                report.duplicates.push(record.id.clone());
                records[pos] = record;
            }
            None => {
                positions.insert(key, records.len());
                records.push(record);
            }
        }
    }

    report.accepted = records.len();
    (records, report)
}

/// Normalize a single decoded upstream record.
pub fn normalize_record<R: ImageResolve + ?Sized>(
    raw: RawProduct,
    images: &R,
) -> Result<CatalogRecord, RecordError> {
    let id = raw
        .id
        .map(ScalarValue::into_text)
        .and_then(|s| non_empty(Some(s)))
        .ok_or(RecordError::MissingId)?;

    let mut industry = normalize_industries(raw.industry);
    let industry_hint = industry.first().cloned();
    if industry.is_empty() {
        industry.push(DEFAULT_INDUSTRY.to_string());
    }

    let category = raw
        .brand
        .as_deref()
        .and_then(Category::from_brand)
        .or_else(|| raw.category.as_deref().and_then(Category::from_str_loose))
        .unwrap_or_else(|| {
            log::debug!(
                "Product '{id}' has no recognized brand ({:?}) or category ({:?})",
                raw.brand,
                raw.category
            );
            Category::Other
        });

    let short_name = non_empty(raw.short_name);
    let name = non_empty(raw.name)
        .or_else(|| short_name.clone())
        .unwrap_or_else(|| id.clone());

    let image_field = non_empty(raw.image_url).or_else(|| non_empty(raw.image));
    let image_url = images
        .resolve_for_record(image_field.as_deref(), industry_hint.as_deref(), &id)
        .and_then(|url| non_empty(Some(url)));

    Ok(CatalogRecord {
        name,
        short_name,
        description: non_empty(raw.description),
        category,
        industry,
        chemistry: non_empty(raw.chemistry),
        technical_data: normalize_technical_data(raw.technical_data),
        sizes: normalize_sizes(raw.sizes),
        image_url,
        is_active: raw.is_active.unwrap_or(true),
        created_at: non_empty(raw.created_at),
        updated_at: non_empty(raw.updated_at),
        version: non_empty(raw.version.map(ScalarValue::into_text)),
        id,
    })
}

/// Normalize one industry tag to its matchable form.
///
/// `"Marine_Industry"` becomes `"marine"`, `"marine_equipment"` becomes
/// `"marine equipment"`.
pub fn normalize_industry(tag: &str) -> String {
    let lower = tag.trim().to_lowercase();
    let stripped = lower
        .strip_suffix("_industry")
        .or_else(|| lower.strip_suffix(" industry"))
        .or_else(|| lower.strip_suffix("-industry"))
        .unwrap_or(lower.as_str());
    stripped
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize the industry field into an ordered, de-duplicated tag list.
/// May return an empty list; callers decide the default.
pub fn normalize_industries(raw: Option<StringOrList>) -> Vec<String> {
    let tags: Vec<String> = match raw {
        None => Vec::new(),
        Some(StringOrList::One(s)) => s.split(',').map(str::to_string).collect(),
        Some(StringOrList::Many(list)) => list,
    };

    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let norm = normalize_industry(&tag);
        if !norm.is_empty() && !out.contains(&norm) {
            out.push(norm);
        }
    }
    out
}

/// Normalize technical data into a property → value mapping.
pub fn normalize_technical_data(raw: Option<RawTechnicalData>) -> BTreeMap<String, String> {
    let pairs: Vec<(String, Value)> = match raw {
        None => Vec::new(),
        Some(RawTechnicalData::Pairs(pairs)) => {
            pairs.into_iter().map(|p| (p.property, p.value)).collect()
        }
        Some(RawTechnicalData::Map(map)) => map.into_iter().collect(),
    };

    pairs
        .into_iter()
        .filter_map(|(property, value)| {
            let property = property.trim().to_string();
            let value = value_text(value)?;
            if property.is_empty() {
                None
            } else {
                Some((property, value))
            }
        })
        .collect()
}

/// Normalize packaging sizes from a list, an object list, or delimited text.
pub fn normalize_sizes(raw: Option<RawSizes>) -> Vec<String> {
    let items: Vec<String> = match raw {
        None => Vec::new(),
        Some(RawSizes::Text(text)) => text
            .split([',', ';', '|', '\n'])
            .map(str::to_string)
            .collect(),
        Some(RawSizes::List(list)) => list
            .into_iter()
            .filter_map(|item| match item {
                RawSize::Scalar(s) => Some(s.into_text()),
                RawSize::Entry(entry) => entry.into_text(),
            })
            .collect(),
    };

    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn value_text(value: Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    };
    non_empty(Some(text))
}

/// Trim, and map empty strings to `None`.
fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
