//! Filtering and sorting over catalog records.
//!
//! Every function here is pure. Criteria combine with AND across kinds
//! (industry, category, chemistry, search) and OR within one kind's
//! selected values. An empty selection never filters anything out.

use std::cmp::Ordering;

use storefront_core::{CatalogRecord, normalize_industry};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Industry order used when grouping listings by industry.
pub const DEFAULT_INDUSTRY_PRIORITY: &[&str] = &[
    "industrial",
    "transportation",
    "marine",
    "construction",
    "composites",
    "insulation",
    "foam",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

// ── Predicates ──────────────────────────────────────────────────────────────

/// Whether an industry tag and a target industry match.
///
/// Both sides are normalized, then compared by equality or substring in
/// either direction, so `"marine"` and `"marine equipment"` match each other.
pub fn industry_matches(tag: &str, target: &str) -> bool {
    normalized_industry_matches(&normalize_industry(tag), &normalize_industry(target))
}

fn normalized_industry_matches(tag: &str, target: &str) -> bool {
    if tag.is_empty() || target.is_empty() {
        return false;
    }
    tag.contains(target) || target.contains(tag)
}

/// Whether any of the record's industries matches the normalized target.
fn record_in_industry(record: &CatalogRecord, target: &str) -> bool {
    record
        .industry
        .iter()
        .any(|tag| normalized_industry_matches(tag, target))
}

fn record_in_category(record: &CatalogRecord, selected: &str) -> bool {
    record.category.as_str().eq_ignore_ascii_case(selected.trim())
}

fn record_has_chemistry(record: &CatalogRecord, selected: &str) -> bool {
    record.chemistry.as_deref() == Some(selected.trim())
}

/// Case-insensitive substring match against name, description and id.
/// `term` must already be lower-cased and non-empty.
fn record_matches_term(record: &CatalogRecord, term: &str) -> bool {
    record.name.to_lowercase().contains(term)
        || record.id.to_lowercase().contains(term)
        || record
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(term))
}

// ── Filters ─────────────────────────────────────────────────────────────────

/// Keep records matching at least one selected industry.
pub fn filter_by_industry<T: AsRef<str>>(records: &[CatalogRecord], selected: &[T]) -> Vec<CatalogRecord> {
    let targets = normalized_industries(selected);
    if targets.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| targets.iter().any(|t| record_in_industry(r, t)))
        .cloned()
        .collect()
}

/// Keep records whose category is one of the selected ones.
pub fn filter_by_category<T: AsRef<str>>(records: &[CatalogRecord], selected: &[T]) -> Vec<CatalogRecord> {
    let selected = non_blank(selected);
    if selected.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| selected.iter().any(|c| record_in_category(r, c)))
        .cloned()
        .collect()
}

/// Keep records whose chemistry is exactly one of the selected labels.
pub fn filter_by_chemistry<T: AsRef<str>>(records: &[CatalogRecord], selected: &[T]) -> Vec<CatalogRecord> {
    let selected = non_blank(selected);
    if selected.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| selected.iter().any(|c| record_has_chemistry(r, c)))
        .cloned()
        .collect()
}

/// Free-text search. A blank term returns every record.
pub fn search(records: &[CatalogRecord], term: &str) -> Vec<CatalogRecord> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| record_matches_term(r, &term))
        .cloned()
        .collect()
}

// ── Sorting ─────────────────────────────────────────────────────────────────

/// Key for locale-aware name comparison: decomposed, accents dropped, case folded.
pub fn collation_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compare by name in `order`, ties broken by id ascending. Names that differ
/// only in case or accents are ties.
pub fn compare_by_name(a: &CatalogRecord, b: &CatalogRecord, order: SortOrder) -> Ordering {
    let by_name = collation_key(&a.name).cmp(&collation_key(&b.name));
    let by_name = match order {
        SortOrder::Ascending => by_name,
        SortOrder::Descending => by_name.reverse(),
    };
    by_name
        .then_with(|| a.id_key().cmp(&b.id_key()))
        .then_with(|| a.id.cmp(&b.id))
}

/// Position in `priority` (normalized) of the record's first industry that
/// matches any entry. Records matching nothing rank last.
pub fn industry_rank(record: &CatalogRecord, priority: &[String]) -> usize {
    record
        .industry
        .iter()
        .find_map(|tag| {
            priority
                .iter()
                .position(|p| normalized_industry_matches(tag, p))
        })
        .unwrap_or(usize::MAX)
}

/// Sort in place by name, or by industry group then name when a priority
/// list is given.
pub fn sort_records<T: AsRef<str>>(
    records: &mut [CatalogRecord],
    order: SortOrder,
    industry_priority: Option<&[T]>,
) {
    match industry_priority.map(normalized_industries) {
        Some(priority) if !priority.is_empty() => records.sort_by(|a, b| {
            industry_rank(a, &priority)
                .cmp(&industry_rank(b, &priority))
                .then_with(|| compare_by_name(a, b, order))
        }),
        _ => records.sort_by(|a, b| compare_by_name(a, b, order)),
    }
}

// ── Query ───────────────────────────────────────────────────────────────────

/// A full set of filter and sort criteria, as driven by a listing UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub industries: Vec<String>,
    pub categories: Vec<String>,
    pub chemistries: Vec<String>,
    pub search: Option<String>,
    pub order: SortOrder,
    pub industry_priority: Option<Vec<String>>,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn industries<I: IntoIterator<Item = S>, S: Into<String>>(mut self, values: I) -> Self {
        self.industries = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn categories<I: IntoIterator<Item = S>, S: Into<String>>(mut self, values: I) -> Self {
        self.categories = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn chemistries<I: IntoIterator<Item = S>, S: Into<String>>(mut self, values: I) -> Self {
        self.chemistries = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Group results by industry in the given priority order before sorting by name.
    pub fn group_by_industry<I: IntoIterator<Item = S>, S: Into<String>>(mut self, priority: I) -> Self {
        self.industry_priority = Some(priority.into_iter().map(Into::into).collect());
        self
    }

    /// Whether a single record passes every filter.
    pub fn matches(&self, record: &CatalogRecord) -> bool {
        let industries = normalized_industries(&self.industries);
        let categories = non_blank(&self.categories);
        let chemistries = non_blank(&self.chemistries);
        let term = self.search_term();

        (industries.is_empty() || industries.iter().any(|t| record_in_industry(record, t)))
            && (categories.is_empty() || categories.iter().any(|c| record_in_category(record, c)))
            && (chemistries.is_empty() || chemistries.iter().any(|c| record_has_chemistry(record, c)))
            && term.as_deref().is_none_or(|t| record_matches_term(record, t))
    }

    /// Filter and sort `records`.
    pub fn apply(&self, records: &[CatalogRecord]) -> Vec<CatalogRecord> {
        let mut out = filter_by_industry(records, &self.industries);
        out = filter_by_category(&out, &self.categories);
        out = filter_by_chemistry(&out, &self.chemistries);
        if let Some(term) = &self.search {
            out = search(&out, term);
        }
        sort_records(&mut out, self.order, self.industry_priority.as_deref());
        out
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
    }
}

/// Split a comma-separated selection into trimmed, non-empty values.
pub fn parse_selection(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalized_industries<T: AsRef<str>>(values: &[T]) -> Vec<String> {
    values
        .iter()
        .map(|v| normalize_industry(v.as_ref()))
        .filter(|v| !v.is_empty())
        .collect()
}

fn non_blank<T: AsRef<str>>(values: &[T]) -> Vec<&str> {
    values
        .iter()
        .map(|v| v.as_ref().trim())
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
