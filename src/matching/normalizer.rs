//! Ingredient string canonicalization.
//!
//! Every set comparison in the crate happens on normalized strings:
//! lowercased, trimmed, internal whitespace runs collapsed to one space.

use std::collections::BTreeSet;

/// Normalize a single ingredient string.
///
/// Whitespace-only input yields an empty string, which callers must drop.
#[must_use]
pub fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars().flat_map(char::to_lowercase));
    }
    out
}

/// Normalize into a sorted, deduplicated set with empties removed.
pub fn normalize_set<I, S>(items: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| normalize(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect()
}

/// Normalize preserving input order, dropping empties and later duplicates.
pub fn normalize_list<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for item in items {
        let norm = normalize(item.as_ref());
        if !norm.is_empty() && seen.insert(norm.clone()) {
            out.push(norm);
        }
    }
    out
}
