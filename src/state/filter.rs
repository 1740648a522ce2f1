//! Option filtering (pure).
//!
//! Derives the visible option subset from the full list and the search query.
//! Recomputed synchronously on every query or list change; no debouncing.

use crate::model::SelectOption;

/// Filter `options` by `query`.
///
/// - Empty query: the full list, unchanged.
/// - Otherwise: the order-preserving subsequence whose textual display value
///   contains the query, compared case-insensitively.
///
/// Options without a textual display value never match a non-empty query.
pub fn filter_options(options: &[SelectOption], query: &str) -> Vec<SelectOption> {
    if query.is_empty() {
        return options.to_vec();
    }

    let query_lower = query.to_lowercase();
    options
        .iter()
        .filter(|option| matches_query(option, &query_lower))
        .cloned()
        .collect()
}

/// Check a single option against an already-lowercased query.
pub fn matches_query(option: &SelectOption, query_lower: &str) -> bool {
    match option.label() {
        Some(label) => label.to_lowercase().contains(query_lower),
        None => false,
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
