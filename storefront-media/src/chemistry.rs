//! Chemistry label → icon resolution.

/// Icon used when a label matches nothing in the table.
pub const DEFAULT_CHEMISTRY_ICON: &str = "/icons/chemistry/specialty.svg";

/// Longer, more specific labels come first so substring matching prefers them.
const CHEMISTRY_ICONS: &[(&str, &str)] = &[
    ("Modified Epoxy", "/icons/chemistry/modified-epoxy.svg"),
    ("Modified Silicone", "/icons/chemistry/modified-silicone.svg"),
    ("Canister Adhesive", "/icons/chemistry/canister.svg"),
    ("MS Polymer", "/icons/chemistry/ms-polymer.svg"),
    ("Cyanoacrylate", "/icons/chemistry/cyanoacrylate.svg"),
    ("Methacrylate", "/icons/chemistry/methacrylate.svg"),
    ("Polyurethane", "/icons/chemistry/polyurethane.svg"),
    ("Water Based", "/icons/chemistry/water-based.svg"),
    ("Solvent Based", "/icons/chemistry/solvent-based.svg"),
    ("Hot Melt", "/icons/chemistry/hot-melt.svg"),
    ("Acrylic", "/icons/chemistry/acrylic.svg"),
    ("Silicone", "/icons/chemistry/silicone.svg"),
    ("Epoxy", "/icons/chemistry/epoxy.svg"),
    ("Rubber", "/icons/chemistry/rubber.svg"),
];

/// Icon path for a chemistry label. Never empty.
///
/// Exact label match first, then a case-insensitive substring match in
/// either direction, then [`DEFAULT_CHEMISTRY_ICON`].
pub fn chemistry_icon(label: &str) -> &'static str {
    let label = label.trim();
    if label.is_empty() {
        return DEFAULT_CHEMISTRY_ICON;
    }
    if let Some((_, icon)) = CHEMISTRY_ICONS.iter().find(|(k, _)| *k == label) {
        return icon;
    }

    let needle = label.to_lowercase();
    CHEMISTRY_ICONS
        .iter()
        .find(|(k, _)| {
            let key = k.to_lowercase();
            needle.contains(&key) || key.contains(&needle)
        })
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_CHEMISTRY_ICON)
}
