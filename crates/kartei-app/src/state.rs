// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state — reactive signals for the Dioxus UI.
//
// Card UI state is transient: every new result set rebuilds the card map
// from the records, the desktop analogue of the original page re-render.
// Only the catalogue itself and the settings persist.

use std::collections::HashMap;

use kartei_catalog::SearchQuery;
use kartei_core::AppConfig;
use kartei_core::types::{CardViewState, ProjectRecord, RecordId};
use kartei_print::PrintSession;

use crate::services::app_services::AppServices;

/// Shared state accessible to all pages via `use_context`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Records in the current result set.
    pub records: Vec<ProjectRecord>,
    /// Distinct years for the filter dropdown.
    pub years: Vec<String>,
    /// Raw text in the search box (not yet submitted).
    pub query: String,
    /// Year filter selection, if any.
    pub year_filter: Option<String>,
    /// Words of the last submitted search, used as the highlight keywords.
    pub active_words: Vec<String>,
    /// Per-card UI state, keyed by record identity.
    pub cards: HashMap<RecordId, CardViewState>,
    /// Save-and-restore engine for the print override.
    pub print_session: PrintSession,
    /// Session label shown above the results.
    pub session_text: String,
    /// Application settings.
    pub config: AppConfig,
    /// Status message for user feedback.
    pub status_message: Option<String>,
}

impl AppState {
    /// Create initial state from the backend services.
    pub fn new(svc: &AppServices) -> Self {
        let config = svc.config();
        let records = svc.all_records().unwrap_or_default();
        let years = svc.distinct_years().unwrap_or_default();
        let session_text = svc.session_text().unwrap_or_default();

        let mut state = Self {
            records: Vec::new(),
            years,
            query: String::new(),
            year_filter: None,
            active_words: Vec::new(),
            cards: HashMap::new(),
            print_session: PrintSession::new(),
            session_text,
            config,
            status_message: None,
        };
        state.set_results(records);
        state
    }

    /// Replace the result set and rebuild all per-card state.
    ///
    /// Toggles, exclusions, and any in-flight print override are discarded;
    /// a fresh result set starts from the collapsed default.
    pub fn set_results(&mut self, records: Vec<ProjectRecord>) {
        let limit = self.config.short_abstract_limit;
        self.cards = records
            .iter()
            .map(|r| (r.id, CardViewState::new(r.has_abstract_pair(limit))))
            .collect();
        self.print_session = PrintSession::new();
        self.records = records;
    }

    /// The query that reproduces the current result set's filters.
    pub fn submitted_query(&self) -> SearchQuery {
        SearchQuery {
            words: self.active_words.clone(),
            year: self.year_filter.clone(),
        }
    }

    /// Toggle one card between its short and full abstract.  Unknown ids
    /// are skipped silently.
    pub fn toggle_card(&mut self, id: RecordId) {
        if let Some(card) = self.cards.get_mut(&id) {
            card.toggle();
        }
    }

    /// Exclude one card from printed output (one-way per result set).
    pub fn hide_card(&mut self, id: RecordId) {
        kartei_print::hide_from_print(&mut self.cards, id);
    }

    /// Force every abstract open for print rendering.
    pub fn expand_for_print(&mut self) {
        self.print_session.expand_all(&mut self.cards);
    }

    /// Restore per-card state after print rendering.
    pub fn restore_after_print(&mut self) {
        self.print_session.collapse_all(&mut self.cards);
    }
}
