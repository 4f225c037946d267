//! Deterministic ordering for report output
//!
//! Names and versions are compared byte-wise. Ordering is applied when reports are
//! assembled, never while counts accumulate.

use std::cmp::Ordering;
use std::collections::HashMap;

/// Byte-wise ordinal comparison
pub fn ordinal(a: &str, b: &str) -> Ordering {
    a.as_bytes().cmp(b.as_bytes())
}

/// Sort items by a string key
pub fn sort_by_key_str<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| ordinal(key(a), key(b)));
}

/// Version counts in version order
pub fn ordered_versions(versions: &HashMap<String, u64>) -> Vec<(&str, u64)> {
    let mut ordered: Vec<(&str, u64)> = versions
        .iter()
        .map(|(version, count)| (version.as_str(), *count))
        .collect();
    sort_by_key_str(&mut ordered, |entry| entry.0);
    ordered
}

/// Names in name order
pub fn ordered_names<'a, I>(names: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut ordered: Vec<&str> = names.into_iter().map(String::as_str).collect();
    ordered.sort_by(|a, b| ordinal(a, b));
    ordered
}
