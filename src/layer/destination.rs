use std::borrow::Cow;

/// Known destination keys and their display names.
/// Keys are the (sometimes truncated) suffixes found on primary layers.
const DISPLAY_NAMES: [(&str, &str); 21] = [
    ("AUTRE_BUREAU", "Autre bureau"),
    ("AUTRE_CONGRE", "Autre congrès exposition"),
    ("AUTRE_ENTREP", "Autre entrepôt"),
    ("AUTRE_INDUST", "Autre industrie"),
    ("COMMERCE_ART", "Commerce artisanat"),
    ("COMMERCE_AUT", "Commerce autre hébergement touristique"),
    ("COMMERCE_CIN", "Commerce cinéma"),
    ("COMMERCE_DE_", "Commerce de gros"),
    ("COMMERCE_HOT", "Commerce hôtel"),
    ("COMMERCE_RES", "Commerce restauration"),
    ("COMMERCE_SER", "Commerce service accueil clientèle"),
    ("EXPLOITATIO", "Exploitation forestière"),
    ("EXPLOITATION", "Exploitation agricole"),
    ("HABITATION_H", "Habitation hébergement"),
    ("HABITATION_L", "Habitation logement"),
    ("SPIC_ADMINIS", "Spic administration"),
    ("SPIC_ART_SPE", "Spic art spectacle"),
    ("SPIC_AUTRE", "Spic autre"),
    ("SPIC_ENSEIGN", "Spic enseignement santé"),
    ("SPIC_LT", "Spic lt"),
    ("SPIC_SPORT", "Spic sport"),
];

/// Malformed suffixes produced by the drawing exports, and the key they stand for.
const SUFFIX_EXCEPTIONS: [(&str, &str); 1] = [
    ("EXPLOITATIO0", "EXPLOITATIO"),
];

/// True if `key` is one of the known destination keys.
#[inline]
pub fn is_known_destination(key: &str) -> bool {
    DISPLAY_NAMES.iter().any(|&(k, _)| k == key)
}

/// Resolve a raw layer suffix to its aggregation key.
///
/// Exact known keys win, then the exception table, then a known key embedded in the suffix
/// (longest first), then the first known key in table order embedding the suffix.
/// Anything else passes through.
pub fn resolve_destination(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let raw = raw.strip_suffix('_').unwrap_or(raw);
    if raw.is_empty() { return None }

    if is_known_destination(raw) { return Some(raw.to_string()) }

    if let Some(&(_, key)) = SUFFIX_EXCEPTIONS.iter().find(|&&(bad, _)| raw.contains(bad)) {
        return Some(key.to_string());
    }

    let mut embedded: Vec<&str> = DISPLAY_NAMES.iter()
        .map(|&(k, _)| k)
        .filter(|k| raw.contains(k))
        .collect();
    embedded.sort_by_key(|k| std::cmp::Reverse(k.len()));
    if let Some(key) = embedded.first() { return Some(key.to_string()) }

    if let Some(&(key, _)) = DISPLAY_NAMES.iter().find(|&&(k, _)| k.contains(raw)) {
        return Some(key.to_string());
    }

    Some(raw.to_string())
}

/// Human-readable name of a destination key (presentation only).
pub fn display_name(key: &str) -> Cow<'static, str> {
    if let Some(&(_, name)) = DISPLAY_NAMES.iter().find(|&&(k, _)| k == key) {
        return Cow::Borrowed(name);
    }

    let spaced = key.replace('_', " ").to_lowercase();
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => Cow::Owned(first.to_uppercase().chain(chars).collect()),
        None => Cow::Owned(String::new()),
    }
}

/// Share of the project surface counted as RDV surface for a destination.
pub fn rdv_ratio(key: &str) -> f64 {
    let upper = key.to_uppercase();
    if upper.contains("HABITATION") { 0.75 }
    else if upper.contains("COMMERCE") { 0.80 }
    else { 0.85 }
}
