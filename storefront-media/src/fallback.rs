//! Static product-id → image path table.
//!
//! Used when a record carries no image field at all. Keys are lower-case
//! product ids; values are root-relative paths to bundled images.

const FALLBACK_IMAGES: &[(&str, &str)] = &[
    ("a1000", "/product-images/a1000.png"),
    ("c130", "/product-images/c130.png"),
    ("c150", "/product-images/c150.png"),
    ("c331", "/product-images/c331.png"),
    ("ic932", "/product-images/ic932.png"),
    ("ic933", "/product-images/ic933.png"),
    ("ic934", "/product-images/ic934.png"),
    ("oa4", "/product-images/oa4.png"),
    ("oa12", "/product-images/oa12.png"),
    ("oa23", "/product-images/oa23.png"),
    ("oa75", "/product-images/oa75.png"),
    ("oa99", "/product-images/oa99.png"),
    ("os2", "/product-images/os2.png"),
    ("os10", "/product-images/os10.png"),
    ("os24", "/product-images/os24.png"),
    ("os35", "/product-images/os35.png"),
    ("os61", "/product-images/os61.png"),
    ("r160", "/product-images/r160.png"),
    ("r221", "/product-images/r221.png"),
    ("s228", "/product-images/s228.png"),
    ("t215", "/product-images/t215.png"),
    ("t350", "/product-images/t350.png"),
    ("t461", "/product-images/t461.png"),
    ("t500", "/product-images/t500.png"),
    ("t715", "/product-images/t715.png"),
    ("tac734g", "/product-images/tac734g.png"),
    ("tac739r", "/product-images/tac739r.png"),
];

/// Look up the bundled image path for a product id (case-insensitive).
pub fn fallback_for(id: &str) -> Option<&'static str> {
    let key = id.trim().to_lowercase();
    FALLBACK_IMAGES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, path)| *path)
}

/// Number of entries in the table.
pub fn fallback_count() -> usize {
    FALLBACK_IMAGES.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(fallback_for("OA75"), Some("/product-images/oa75.png"));
        assert_eq!(fallback_for(" oa75 "), Some("/product-images/oa75.png"));
        assert_eq!(fallback_for("zz9"), None);
    }

    #[test]
    fn test_table_has_no_empty_or_duplicate_keys() {
        let mut keys: Vec<&str> = FALLBACK_IMAGES.iter().map(|(k, _)| *k).collect();
        assert!(keys.iter().all(|k| !k.is_empty() && *k == k.to_lowercase()));
        assert!(FALLBACK_IMAGES.iter().all(|(_, p)| p.starts_with('/')));
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), fallback_count());
    }
}
