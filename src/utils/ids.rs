//! Prefixed sequential ids (`BKG001`, `V001`, `P001`).

/// Numeric part of a `<prefix>nnn` id.
pub fn sequence_of(prefix: &str, id: &str) -> Option<u32> {
    id.strip_prefix(prefix)?.parse().ok()
}

/// Next id after the highest existing one with the same prefix, `<prefix>001` for the first.
/// Ids with another prefix or a non-numeric tail are ignored.
pub fn next_sequential_id<'a>(prefix: &str, existing: impl IntoIterator<Item = &'a str>) -> String {
    let next = existing
        .into_iter()
        .filter_map(|id| sequence_of(prefix, id))
        .max()
        .map_or(1, |m| m + 1);
    format!("{prefix}{next:03}")
}
