// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Browse page — search the catalogue and work with the result cards:
// expand/collapse abstracts, exclude cards from the print run, print.

use dioxus::prelude::*;

use kartei_catalog::highlight::{Segment, highlight_segments};
use kartei_catalog::search::SearchQuery;
use kartei_core::types::{AbstractView, CardViewState, ProjectRecord};
use kartei_print::PrintDialog;

use crate::services::app_services::AppServices;
use crate::services::print_lifecycle::WebviewPrintDialog;
use crate::state::AppState;

#[component]
pub fn Browse() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    // Snapshot what this render needs; event handlers re-read on their own.
    let (records, cards, words, limit, session_text, years, year_filter, query, status_message) = {
        let st = state.read();
        (
            st.records.clone(),
            st.cards.clone(),
            st.active_words.clone(),
            st.config.short_abstract_limit,
            st.session_text.clone(),
            st.years.clone(),
            st.year_filter.clone(),
            st.query.clone(),
            st.status_message.clone(),
        )
    };

    rsx! {
        div {
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h1 { "Project Abstracts" }
                button {
                    id: "print-btn",
                    class: "no-print",
                    style: "padding: 8px 16px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 14px;",
                    disabled: records.is_empty(),
                    onclick: move |_| {
                        {
                            let mut st = state.write();
                            if st.config.auto_expand_for_print {
                                st.expand_for_print();
                            }
                        }
                        // Restore happens on the after-print signal.
                        if let Err(e) = WebviewPrintDialog.open() {
                            tracing::error!(error = %e, "print dialog failed");
                            state.write().status_message =
                                Some(format!("Could not open the print dialog: {e}"));
                        }
                    },
                    "Print List"
                }
            }

            if !session_text.is_empty() {
                p { style: "color: #888; font-style: italic; margin: 4px 0 12px 0;",
                    "{session_text}"
                }
            }

            // Search bar
            section { class: "no-print", style: "margin: 8px 0 16px 0;",
                div { style: "display: flex; gap: 8px;",
                    input {
                        r#type: "text",
                        value: "{query}",
                        placeholder: "Search titles and abstracts...",
                        style: "flex: 1; padding: 8px; font-size: 14px; border: 1px solid #ccc; border-radius: 8px;",
                        oninput: move |evt| {
                            state.write().query = evt.value();
                        },
                    }
                    select {
                        style: "padding: 8px; font-size: 14px; border: 1px solid #ccc; border-radius: 8px;",
                        onchange: move |evt| {
                            let val = evt.value().to_string();
                            state.write().year_filter = if val.is_empty() { None } else { Some(val) };
                        },
                        option { value: "", selected: year_filter.is_none(), "All years" }
                        for year in years.iter() {
                            option {
                                value: "{year}",
                                selected: year_filter.as_deref() == Some(year.as_str()),
                                "{year}"
                            }
                        }
                    }
                    button {
                        style: "padding: 8px 16px; border-radius: 8px; border: 1px solid #007aff; color: #007aff; background: white; font-size: 14px;",
                        onclick: {
                            let svc = svc.clone();
                            move |_| {
                                let (raw, year) = {
                                    let st = state.read();
                                    (st.query.clone(), st.year_filter.clone())
                                };
                                let parsed = SearchQuery::parse(&raw, year.as_deref());
                                match svc.search(&parsed) {
                                    Ok(results) => {
                                        let mut st = state.write();
                                        st.active_words = parsed.words.clone();
                                        st.status_message = None;
                                        st.set_results(results);
                                    }
                                    Err(e) => {
                                        tracing::error!(error = %e, "search failed");
                                        state.write().status_message =
                                            Some(format!("Search failed: {e}"));
                                    }
                                }
                            }
                        },
                        "Search"
                    }
                }
            }

            if let Some(ref msg) = status_message {
                p { class: "no-print", style: "color: #856404; background: #fff3cd; padding: 8px 12px; border-radius: 8px;",
                    "{msg}"
                }
            }

            if records.is_empty() {
                p { style: "text-align: center; color: #aaa; margin: 48px 0;",
                    "No matching records. Import a catalogue under Settings, or try another search."
                }
            } else {
                p { class: "no-print", style: "color: #888; font-size: 13px;",
                    "{records.len()} record(s)"
                }
                for record in records.iter() {
                    {
                        let id = record.id;
                        let card = cards
                            .get(&id)
                            .cloned()
                            .unwrap_or_else(|| CardViewState::new(false));
                        let visible_text = visible_abstract(record, &card, limit);
                        let title_segments = highlight_segments(&record.title, &words);
                        let body_segments = highlight_segments(&visible_text, &words);
                        let card_class = if card.excluded_from_print { "card no-print" } else { "card" };
                        let meta = meta_line(record);

                        rsx! {
                            div { class: "{card_class}",
                                style: "padding: 12px; margin: 8px 0; border: 1px solid #e0e0e0; border-radius: 8px;",
                                h3 { style: "margin: 0 0 4px 0; font-size: 16px;",
                                    HighlightedText { segments: title_segments }
                                }
                                p { style: "color: #666; font-size: 13px; margin: 4px 0;", "{meta}" }
                                p { class: "abstract",
                                    style: "font-size: 14px; line-height: 1.5; margin: 8px 0;",
                                    HighlightedText { segments: body_segments }
                                }
                                div { class: "no-print", style: "display: flex; gap: 8px; margin-top: 8px;",
                                    if card.has_pair {
                                        button {
                                            class: "toggle",
                                            style: "padding: 4px 12px; border-radius: 4px; border: 1px solid #007aff; color: #007aff; background: white; font-size: 12px;",
                                            onclick: move |_| state.write().toggle_card(id),
                                            "{card.toggle_label.as_str()}"
                                        }
                                    }
                                    button {
                                        class: "hide-print-btn",
                                        style: "padding: 4px 12px; border-radius: 4px; border: 1px solid #ccc; color: #666; background: white; font-size: 12px;",
                                        disabled: !card.hide_control.is_enabled(),
                                        onclick: move |_| state.write().hide_card(id),
                                        "{card.hide_control.label()}"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Render highlight segments as marked and plain runs.
#[component]
fn HighlightedText(segments: Vec<Segment>) -> Element {
    rsx! {
        for seg in segments.iter() {
            if seg.highlighted {
                mark { "{seg.text}" }
            } else {
                span { "{seg.text}" }
            }
        }
    }
}

/// The abstract text a card currently shows.
///
/// Short view only exists for cards with a pair; everything else renders
/// the full text.
fn visible_abstract(record: &ProjectRecord, card: &CardViewState, limit: usize) -> String {
    if card.has_pair && card.view == AbstractView::Short {
        record
            .short_abstract(limit)
            .unwrap_or_else(|| record.abstract_text.clone())
    } else {
        record.abstract_text.clone()
    }
}

/// Metadata line under the title; empty fields are left out.
fn meta_line(record: &ProjectRecord) -> String {
    let mut parts = vec![record.year.clone()];
    if !record.supervisor.is_empty() {
        parts.push(format!("Supervisor: {}", record.supervisor));
    }
    if !record.student.is_empty() {
        parts.push(format!("Student: {}", record.student));
    }
    parts.join("  |  ")
}
