// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-card exclusion from printed output.
//
// The control disables itself on first use; the card keeps its exclusion
// marker for the rest of the result set's life.  Activations against
// unknown cards are skipped silently; a malformed surrounding structure
// must never halt unrelated handlers.

use std::collections::HashMap;

use tracing::debug;

use kartei_core::types::{CardViewState, RecordId};

/// Exclude the card from printed output and disable its control.
///
/// Returns whether anything changed.  Unknown ids and already-disabled
/// controls are silent no-ops.
pub fn hide_from_print(cards: &mut HashMap<RecordId, CardViewState>, id: RecordId) -> bool {
    let Some(card) = cards.get_mut(&id) else {
        debug!(%id, "hide-from-print on unknown card ignored");
        return false;
    };

    let changed = card.hide_from_print();
    if changed {
        debug!(%id, "card excluded from print");
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use kartei_core::types::HideControl;

    fn two_cards() -> HashMap<RecordId, CardViewState> {
        let mut cards = HashMap::new();
        cards.insert(RecordId(1), CardViewState::new(true));
        cards.insert(RecordId(2), CardViewState::new(true));
        cards
    }

    #[test]
    fn first_activation_excludes_and_disables() {
        let mut cards = two_cards();

        assert!(hide_from_print(&mut cards, RecordId(1)));

        let card = &cards[&RecordId(1)];
        assert!(card.excluded_from_print);
        assert_eq!(card.hide_control, HideControl::Disabled);
    }

    #[test]
    fn second_activation_changes_nothing() {
        let mut cards = two_cards();

        hide_from_print(&mut cards, RecordId(1));
        let after_first = cards.clone();

        assert!(!hide_from_print(&mut cards, RecordId(1)));
        assert_eq!(cards, after_first);
    }

    #[test]
    fn other_cards_are_untouched() {
        let mut cards = two_cards();

        hide_from_print(&mut cards, RecordId(1));

        assert!(!cards[&RecordId(2)].excluded_from_print);
        assert_eq!(cards[&RecordId(2)].hide_control, HideControl::Enabled);
    }

    #[test]
    fn unknown_card_is_skipped() {
        let mut cards = two_cards();
        let before = cards.clone();

        assert!(!hide_from_print(&mut cards, RecordId(99)));
        assert_eq!(cards, before);
    }
}
