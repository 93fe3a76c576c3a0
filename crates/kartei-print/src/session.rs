// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print session — forces every abstract pair into its full view while the
// page renders for print, and restores each card to its own prior state
// afterwards.
//
// The snapshot is an explicit map keyed by record identity, held here and
// nowhere else.  Both the media-query change signal and the before-print
// signal can announce the same print event, so expansion is guarded by the
// session phase: the second announcement must not overwrite the snapshot
// with already-expanded state.

use std::collections::HashMap;

use tracing::debug;

use kartei_core::types::{AbstractView, CardViewState, PrintPhase, RecordId, ToggleLabel};

/// Per-card state recorded before a forced expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSnapshot {
    pub view: AbstractView,
    pub toggle_label: ToggleLabel,
}

/// Save-and-restore engine for the print override.
///
/// Lifecycle per card set: {Normal} --expand_all--> {ExpandedForPrint}
/// --collapse_all--> {Normal}.  Snapshots never outlive one cycle.
#[derive(Debug, Clone)]
pub struct PrintSession {
    phase: PrintPhase,
    snapshot: HashMap<RecordId, CardSnapshot>,
}

impl PrintSession {
    pub fn new() -> Self {
        Self {
            phase: PrintPhase::Normal,
            snapshot: HashMap::new(),
        }
    }

    pub fn phase(&self) -> PrintPhase {
        self.phase
    }

    /// Record every paired card's current state, then force its full view.
    ///
    /// The toggle label is left exactly as it was: the expansion is a
    /// transient print override, not a user toggle.  Cards without a pair
    /// are untouched.  A no-op while already expanded.
    pub fn expand_all(&mut self, cards: &mut HashMap<RecordId, CardViewState>) {
        if self.phase == PrintPhase::ExpandedForPrint {
            debug!("expand_all ignored: already expanded for print");
            return;
        }

        for (id, card) in cards.iter_mut() {
            if !card.has_pair {
                continue;
            }
            self.snapshot.insert(
                *id,
                CardSnapshot {
                    view: card.view,
                    toggle_label: card.toggle_label,
                },
            );
            card.view = AbstractView::Full;
        }

        self.phase = PrintPhase::ExpandedForPrint;
        debug!(cards = self.snapshot.len(), "abstracts expanded for print");
    }

    /// Restore every paired card to its snapshotted state.
    ///
    /// A card that has no snapshot entry (it entered the set after the
    /// expansion) defaults to the short view with its natural label.  The
    /// snapshot is cleared and the phase returns to Normal.  A no-op
    /// outside a print override.
    pub fn collapse_all(&mut self, cards: &mut HashMap<RecordId, CardViewState>) {
        if self.phase == PrintPhase::Normal {
            debug!("collapse_all ignored: not expanded");
            return;
        }

        for (id, card) in cards.iter_mut() {
            if !card.has_pair {
                continue;
            }
            match self.snapshot.remove(id) {
                Some(snap) => {
                    card.view = snap.view;
                    card.toggle_label = snap.toggle_label;
                }
                None => {
                    card.view = AbstractView::Short;
                    card.toggle_label = ToggleLabel::for_view(AbstractView::Short);
                }
            }
        }

        self.snapshot.clear();
        self.phase = PrintPhase::Normal;
        debug!("abstracts restored after print");
    }
}

impl Default for PrintSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: a card map with three paired cards in distinct states and
    /// one card without a pair.
    fn mixed_cards() -> HashMap<RecordId, CardViewState> {
        let mut cards = HashMap::new();

        // Untouched since load: short view, "Read more".
        cards.insert(RecordId(1), CardViewState::new(true));

        // Toggled open by the user: full view, "Show less".
        let mut open = CardViewState::new(true);
        open.toggle();
        cards.insert(RecordId(2), open);

        // Toggled open and closed again. Same as initial, exercised anyway.
        let mut cycled = CardViewState::new(true);
        cycled.toggle();
        cycled.toggle();
        cards.insert(RecordId(3), cycled);

        // Short abstract, no pair.
        cards.insert(RecordId(4), CardViewState::new(false));

        cards
    }

    #[test]
    fn expand_forces_every_pair_to_full() {
        let mut cards = mixed_cards();
        let mut session = PrintSession::new();

        session.expand_all(&mut cards);

        assert_eq!(session.phase(), PrintPhase::ExpandedForPrint);
        for id in [RecordId(1), RecordId(2), RecordId(3)] {
            assert_eq!(cards[&id].view, AbstractView::Full, "card {id}");
        }
        // The unpaired card is skipped entirely.
        assert_eq!(cards[&RecordId(4)].view, AbstractView::Short);
    }

    #[test]
    fn expand_leaves_toggle_labels_unchanged() {
        let mut cards = mixed_cards();
        let mut session = PrintSession::new();

        session.expand_all(&mut cards);

        // Card 1 was closed ("Read more"); it now shows full text but keeps
        // its label, matching the observed print-override behaviour.
        assert_eq!(cards[&RecordId(1)].toggle_label, ToggleLabel::ReadMore);
        assert_eq!(cards[&RecordId(2)].toggle_label, ToggleLabel::ShowLess);
    }

    #[test]
    fn collapse_restores_each_card_to_its_own_state() {
        let mut cards = mixed_cards();
        let before: HashMap<_, _> = cards.clone();
        let mut session = PrintSession::new();

        session.expand_all(&mut cards);
        session.collapse_all(&mut cards);

        assert_eq!(session.phase(), PrintPhase::Normal);
        for (id, card) in &cards {
            assert_eq!(card, &before[id], "card {id} not restored verbatim");
        }
    }

    #[test]
    fn second_expand_does_not_clobber_the_snapshot() {
        let mut cards = mixed_cards();
        let before = cards.clone();
        let mut session = PrintSession::new();

        // before-print and the media-query change both fire.
        session.expand_all(&mut cards);
        session.expand_all(&mut cards);
        session.collapse_all(&mut cards);

        assert_eq!(cards, before);
    }

    #[test]
    fn collapse_without_expand_is_a_no_op() {
        let mut cards = mixed_cards();
        let before = cards.clone();
        let mut session = PrintSession::new();

        session.collapse_all(&mut cards);

        assert_eq!(cards, before);
        assert_eq!(session.phase(), PrintPhase::Normal);
    }

    #[test]
    fn card_added_after_expansion_defaults_to_short() {
        let mut cards = mixed_cards();
        let mut session = PrintSession::new();

        session.expand_all(&mut cards);

        // A paired card appears mid-override, already showing full text.
        let mut late = CardViewState::new(true);
        late.toggle();
        cards.insert(RecordId(9), late);

        session.collapse_all(&mut cards);

        assert_eq!(cards[&RecordId(9)].view, AbstractView::Short);
        assert_eq!(cards[&RecordId(9)].toggle_label, ToggleLabel::ReadMore);
    }

    #[test]
    fn exclusion_flags_survive_the_print_cycle() {
        let mut cards = mixed_cards();
        let mut session = PrintSession::new();

        cards.get_mut(&RecordId(2)).expect("card").hide_from_print();

        session.expand_all(&mut cards);
        session.collapse_all(&mut cards);

        assert!(cards[&RecordId(2)].excluded_from_print);
    }
}
