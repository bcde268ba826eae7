use std::collections::BTreeMap;

use chrono::{Duration, TimeZone, Utc};
use storefront_core::{CatalogRecord, Category, Snapshot, SnapshotOrigin};

fn record(id: &str, name: &str) -> CatalogRecord {
    CatalogRecord {
        id: id.to_string(),
        name: name.to_string(),
        short_name: None,
        description: None,
        category: Category::Adhesive,
        industry: vec!["marine".to_string()],
        chemistry: None,
        technical_data: BTreeMap::new(),
        sizes: Vec::new(),
        image_url: None,
        is_active: true,
        created_at: None,
        updated_at: None,
        version: None,
    }
}

#[test]
fn lookup_is_case_insensitive() {
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let snap = Snapshot::new(vec![record("T215", "Marine Bond")], at, SnapshotOrigin::Live);
    assert_eq!(snap.get("t215").map(|r| r.name.as_str()), Some("Marine Bond"));
    assert_eq!(snap.get(" T215 ").map(|r| r.name.as_str()), Some("Marine Bond"));
    assert!(snap.get("T999").is_none());
}

#[test]
fn duplicate_ids_keep_last_record() {
    let at = Utc::now();
    let snap = Snapshot::new(
        vec![record("OA75", "First"), record("X1", "Other"), record("oa75", "Second")],
        at,
        SnapshotOrigin::Live,
    );
    assert_eq!(snap.len(), 2);
    assert_eq!(snap.records()[0].name, "Second");
    assert_eq!(snap.get("OA75").map(|r| r.name.as_str()), Some("Second"));
}

#[test]
fn age_and_origin() {
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let snap = Snapshot::empty(at, SnapshotOrigin::Fallback);
    assert!(snap.is_empty());
    assert_eq!(snap.origin(), SnapshotOrigin::Fallback);
    assert_eq!(snap.age(at + Duration::minutes(3)), Duration::minutes(3));
}

#[test]
fn category_brand_mapping() {
    assert_eq!(Category::from_brand("forza_bond"), Some(Category::Adhesive));
    assert_eq!(Category::from_brand("FORZA-CLEAN"), Some(Category::Cleaner));
    assert_eq!(Category::from_brand("acme"), None);
    assert_eq!(Category::from_str_loose(" Sealants "), Some(Category::Sealant));
    assert_eq!(Category::Tape.to_string(), "tape");
}
