//! This module is responsible for deriving the visible list from the session state.
//!
//! It reads `full_list` and `view` and writes `visible_list`, nothing else. Term
//! filtering happens server-side, so only the category and preview rules apply here.

use crate::app::state::{SessionState, View};
use crate::core::{filter_by_category, CategoryFilter, CategoryRegistry, Professional};
use regex::Regex;
use std::sync::OnceLock;

/// Recomputes `visible_list` for the current view.
pub fn apply_filters(state: &mut SessionState) {
    state.visible_list = visible_list(
        &state.full_list,
        &state.registry,
        &state.view,
        state.config.preview_limit,
    );
}

/// A pure function of the list, the registry and the view.
pub fn visible_list(
    full_list: &[Professional],
    registry: &CategoryRegistry,
    view: &View,
    preview_limit: usize,
) -> Vec<Professional> {
    match view {
        View::Browsing => full_list.iter().take(preview_limit).cloned().collect(),
        View::AllSelected => full_list.to_vec(),
        View::CategorySelected(slug) => {
            filter_by_category(full_list, registry, &CategoryFilter::Slug(slug.clone()))
        }
    }
}

/// Trims a search term and collapses inner whitespace runs to single spaces.
pub fn normalize_term(term: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let re = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static regex is valid"));
    re.replace_all(term.trim(), " ").into_owned()
}
