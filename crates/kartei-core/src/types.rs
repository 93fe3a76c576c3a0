// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Kartei abstract catalogue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a catalogue record (the SQLite rowid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub i64);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A project abstract as stored in the catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: RecordId,
    pub title: String,
    pub year: String,
    pub abstract_text: String,
    pub supervisor: String,
    pub student: String,
    /// When this record entered the catalogue.
    pub imported_at: DateTime<Utc>,
}

impl ProjectRecord {
    /// The truncated variant of the abstract, or `None` when the abstract
    /// already fits within `limit` characters.  A record without a short
    /// variant has no short/full pair and its card carries no toggle.
    ///
    /// Truncation counts characters, not bytes, so multi-byte text is never
    /// split mid-character.
    pub fn short_abstract(&self, limit: usize) -> Option<String> {
        let mut chars = self.abstract_text.chars();
        let head: String = chars.by_ref().take(limit).collect();
        if chars.next().is_none() {
            None
        } else {
            Some(format!("{head}..."))
        }
    }

    /// Whether this record renders as a short/full pair at the given limit.
    pub fn has_abstract_pair(&self, limit: usize) -> bool {
        self.abstract_text.chars().nth(limit).is_some()
    }
}

/// An unsaved record as read from a CSV import file.
///
/// Field names match the CSV header of the catalogue export format.
/// Missing optional columns default to empty strings rather than failing
/// the row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub supervisor: String,
    #[serde(default)]
    pub student: String,
}

/// Which half of a card's abstract pair is currently shown.
///
/// Exactly one of the two is ever visible; there is no third state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbstractView {
    /// The truncated abstract is visible, the full text hidden.
    Short,
    /// The full abstract is visible, the truncated text hidden.
    Full,
}

impl AbstractView {
    /// The opposite view.
    pub fn toggled(self) -> Self {
        match self {
            Self::Short => Self::Full,
            Self::Full => Self::Short,
        }
    }
}

/// Visible text of a card's toggle control.
///
/// The label is stored state, not derived from the view: a forced print
/// expansion changes the view while leaving the label untouched, and the
/// post-print restore puts back whatever label was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleLabel {
    ReadMore,
    ShowLess,
}

impl ToggleLabel {
    /// The label a user-driven toggle gives the control for this view.
    pub fn for_view(view: AbstractView) -> Self {
        match view {
            AbstractView::Short => Self::ReadMore,
            AbstractView::Full => Self::ShowLess,
        }
    }

    /// Visible button text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadMore => "Read more",
            Self::ShowLess => "Show less",
        }
    }
}

/// State of a card's hide-from-print control.
///
/// The transition is one-way for the session: once disabled the control
/// never re-enables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HideControl {
    Enabled,
    Disabled,
}

impl HideControl {
    pub fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }

    /// Visible button text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Enabled => "Hide from Print",
            Self::Disabled => "Hidden from Print",
        }
    }
}

/// Whether the card set is currently overridden for print rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrintPhase {
    /// Cards show whatever the user toggled them to.
    Normal,
    /// Every abstract pair is forced to its full view; prior states are
    /// held in a snapshot for restore.
    ExpandedForPrint,
}

/// Transient per-card UI state.
///
/// Rebuilt whenever the result set changes; nothing here survives a new
/// search or an application restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardViewState {
    pub view: AbstractView,
    pub toggle_label: ToggleLabel,
    pub hide_control: HideControl,
    pub excluded_from_print: bool,
    /// Whether the record actually has a short/full pair.  Cards without
    /// one have nothing to toggle and are skipped by the print expansion.
    pub has_pair: bool,
}

impl CardViewState {
    /// Initial state: short view visible, controls enabled.
    pub fn new(has_pair: bool) -> Self {
        Self {
            view: AbstractView::Short,
            toggle_label: ToggleLabel::ReadMore,
            hide_control: HideControl::Enabled,
            excluded_from_print: false,
            has_pair,
        }
    }

    /// Flip between the short and full view and relabel the control.
    ///
    /// A card without a pair has nothing to toggle; the call is a silent
    /// no-op rather than a fault.
    pub fn toggle(&mut self) {
        if !self.has_pair {
            return;
        }
        self.view = self.view.toggled();
        self.toggle_label = ToggleLabel::for_view(self.view);
    }

    /// Mark the card excluded from printed output and disable the control.
    ///
    /// Returns whether the state changed.  The transition happens at most
    /// once; further calls are no-ops.
    pub fn hide_from_print(&mut self) -> bool {
        if !self.hide_control.is_enabled() {
            return false;
        }
        self.hide_control = HideControl::Disabled;
        self.excluded_from_print = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(abstract_text: &str) -> ProjectRecord {
        ProjectRecord {
            id: RecordId(1),
            title: "Solar Dryer Controller".into(),
            year: "2025".into(),
            abstract_text: abstract_text.into(),
            supervisor: "Dr. Rahim".into(),
            student: "A. Tan".into(),
            imported_at: Utc::now(),
        }
    }

    #[test]
    fn short_abstract_absent_when_text_fits() {
        let rec = record("brief");
        assert_eq!(rec.short_abstract(300), None);
        assert!(!rec.has_abstract_pair(300));
    }

    #[test]
    fn short_abstract_absent_at_exact_limit() {
        let rec = record(&"x".repeat(300));
        assert_eq!(rec.short_abstract(300), None);
    }

    #[test]
    fn short_abstract_truncates_with_ellipsis() {
        let rec = record(&"x".repeat(301));
        let short = rec.short_abstract(300).expect("pair expected");
        assert_eq!(short.len(), 303);
        assert!(short.ends_with("..."));
        assert!(rec.has_abstract_pair(300));
    }

    #[test]
    fn short_abstract_counts_characters_not_bytes() {
        // Four characters, twelve bytes.
        let rec = record("日本語文");
        assert_eq!(rec.short_abstract(3).as_deref(), Some("日本語..."));
        assert_eq!(rec.short_abstract(4), None);
    }

    #[test]
    fn toggle_flips_view_and_label() {
        let mut card = CardViewState::new(true);
        card.toggle();
        assert_eq!(card.view, AbstractView::Full);
        assert_eq!(card.toggle_label, ToggleLabel::ShowLess);
    }

    #[test]
    fn toggle_twice_restores_original_state() {
        let mut card = CardViewState::new(true);
        let original = card.clone();
        card.toggle();
        card.toggle();
        assert_eq!(card, original);
    }

    #[test]
    fn toggle_without_pair_is_a_no_op() {
        let mut card = CardViewState::new(false);
        let original = card.clone();
        card.toggle();
        assert_eq!(card, original);
    }

    #[test]
    fn hide_from_print_is_one_way() {
        let mut card = CardViewState::new(true);
        assert!(card.hide_from_print());
        assert!(card.excluded_from_print);
        assert_eq!(card.hide_control, HideControl::Disabled);
        assert_eq!(card.hide_control.label(), "Hidden from Print");

        // Second activation changes nothing.
        assert!(!card.hide_from_print());
        assert!(card.excluded_from_print);
    }

    #[test]
    fn toggle_labels_match_visible_text() {
        assert_eq!(ToggleLabel::ReadMore.as_str(), "Read more");
        assert_eq!(ToggleLabel::ShowLess.as_str(), "Show less");
        assert_eq!(ToggleLabel::for_view(AbstractView::Full), ToggleLabel::ShowLess);
    }
}
