//! Responsible for transforming the `SessionState` into a `UiState` view model.
//!
//! This module acts as a presentation layer, preparing data specifically for consumption
//! by the rendering layer: the visible cards, the category tiles with their counts,
//! and the loading / error / empty flags.

use crate::core::{category_tiles, CategoryMatcher, CategoryTile, Professional};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use super::state::{SessionState, View};

/// A serializable snapshot of the session for the UI.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub profession: String,
    pub view: View,
    pub active_category: Option<String>,
    pub is_category_view: bool,
    pub visible_list: Vec<Professional>,
    /// Category slugs of each visible card, keyed by professional id.
    pub badges: BTreeMap<String, Vec<String>>,
    pub tiles: Vec<CategoryTile>,
    pub total_count: usize,
    pub visible_count: usize,
    pub search_term: String,
    pub location_term: String,
    pub loading: bool,
    /// The banner message, if the last fetch failed.
    pub error: Option<String>,
    /// No error, not loading, and nothing to show: render "reset filters / view all".
    pub show_empty_state: bool,
    pub last_fetched_at: Option<DateTime<Utc>>,
    pub status_message: String,
}

/// Creates the complete `UiState` from the current `SessionState`.
pub fn generate_ui_state(state: &SessionState) -> UiState {
    let error = state.error.as_ref().map(|e| e.user_message());
    let show_empty_state = error.is_none() && !state.loading && state.visible_list.is_empty();

    UiState {
        profession: state.config.profession.label().to_string(),
        view: state.view.clone(),
        active_category: state.view.active_category().map(|c| c.to_string()),
        is_category_view: state.view.is_category_view(),
        visible_list: state.visible_list.clone(),
        badges: badges(state),
        tiles: category_tiles(&state.full_list, &state.registry),
        total_count: state.full_list.len(),
        visible_count: state.visible_list.len(),
        search_term: state.search_term.clone(),
        location_term: state.location_term.clone(),
        loading: state.loading,
        error,
        show_empty_state,
        last_fetched_at: state.last_fetched_at,
        status_message: status_message(state),
    }
}

fn badges(state: &SessionState) -> BTreeMap<String, Vec<String>> {
    state
        .visible_list
        .iter()
        .map(|p| {
            let slugs = CategoryMatcher::matching_slugs(p, &state.registry)
                .into_iter()
                .map(str::to_string)
                .collect();
            (p.id.clone(), slugs)
        })
        .collect()
}

fn status_message(state: &SessionState) -> String {
    if state.loading {
        return "Chargement des professionnels...".to_string();
    }
    if let Some(err) = &state.error {
        return format!("Erreur: {}", err.user_message());
    }
    match &state.view {
        View::Browsing => format!("{} professionnels", state.full_list.len()),
        View::AllSelected => format!("Tous les professionnels ({})", state.full_list.len()),
        View::CategorySelected(slug) => {
            let name = state
                .registry
                .get(slug)
                .map(|c| c.name.as_str())
                .unwrap_or(slug.as_str());
            format!("{}: {} professionnels", name, state.visible_list.len())
        }
    }
}
