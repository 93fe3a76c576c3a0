// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings page — session label, CSV import, and display options.

use dioxus::prelude::*;

use tracing::{error, info};

use kartei_core::AppConfig;

use crate::services::app_services::AppServices;
use crate::state::AppState;

#[component]
pub fn Settings() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    let mut session_draft = use_signal(|| state.read().session_text.clone());
    let mut importing = use_signal(|| false);

    let record_count = svc.record_count().unwrap_or(0);
    let config = state.read().config.clone();
    let status_message = state.read().status_message.clone();

    rsx! {
        div {
            h1 { "Settings" }

            // Session label
            section { style: "margin: 16px 0;",
                h3 { "Session Label" }
                p { style: "color: #888; font-size: 13px;",
                    "Shown above the results, e.g. which intake the data covers."
                }
                div { style: "display: flex; gap: 8px;",
                    input {
                        r#type: "text",
                        value: "{session_draft}",
                        style: "flex: 1; padding: 8px; font-size: 14px; border: 1px solid #ccc; border-radius: 8px;",
                        oninput: move |evt| session_draft.set(evt.value()),
                    }
                    button {
                        style: "padding: 8px 16px; border-radius: 8px; border: 1px solid #007aff; color: #007aff; background: white; font-size: 14px;",
                        onclick: {
                            let svc = svc.clone();
                            move |_| {
                                let text = session_draft.read().clone();
                                match svc.set_session_text(&text) {
                                    Ok(()) => {
                                        let mut st = state.write();
                                        st.session_text = text;
                                        st.status_message = Some("Session label updated".into());
                                    }
                                    Err(e) => {
                                        error!(error = %e, "saving session label failed");
                                        state.write().status_message =
                                            Some(format!("Could not save the label: {e}"));
                                    }
                                }
                            }
                        },
                        "Save"
                    }
                }
            }

            // Catalogue import
            section { style: "margin: 16px 0;",
                h3 { "Catalogue" }
                p { style: "color: #888; font-size: 13px;",
                    "{record_count} record(s) stored. Import expects a CSV with the columns \
                     title, year, abstract, supervisor, student."
                }
                button {
                    style: "padding: 8px 16px; border-radius: 8px; border: 1px solid #007aff; color: #007aff; background: white; font-size: 14px;",
                    disabled: *importing.read(),
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let Some(path) = rfd::FileDialog::new()
                                .add_filter("CSV files", &["csv"])
                                .pick_file()
                            else {
                                return;
                            };

                            importing.set(true);
                            let svc = svc.clone();
                            spawn(async move {
                                match svc.import_csv(path).await {
                                    Ok(report) => {
                                        info!(
                                            inserted = report.inserted,
                                            skipped = report.skipped,
                                            "catalogue import finished"
                                        );
                                        // Refresh the year filter and re-run the
                                        // submitted search so Browse picks up the
                                        // new records.
                                        let years = svc.distinct_years().unwrap_or_default();
                                        let query = state.read().submitted_query();
                                        let results = svc.search(&query).unwrap_or_default();

                                        let mut st = state.write();
                                        st.years = years;
                                        st.set_results(results);
                                        st.status_message = Some(format!(
                                            "Imported {} record(s), skipped {}",
                                            report.inserted, report.skipped
                                        ));
                                    }
                                    Err(e) => {
                                        error!(error = %e, "catalogue import failed");
                                        state.write().status_message =
                                            Some(format!("Import failed: {e}"));
                                    }
                                }
                                importing.set(false);
                            });
                        }
                    },
                    if *importing.read() { "Importing..." } else { "Import CSV" }
                }
            }

            // Display options
            section { style: "margin: 16px 0;",
                h3 { "Display" }
                div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 8px; align-items: center;",
                    label { "Short abstract length (characters):" }
                    input {
                        r#type: "number",
                        value: "{config.short_abstract_limit}",
                        min: "50",
                        max: "2000",
                        style: "padding: 4px; border: 1px solid #ccc; border-radius: 4px;",
                        onchange: {
                            let svc = svc.clone();
                            move |evt| {
                                if let Ok(n) = evt.value().parse::<usize>() {
                                    let mut config = state.read().config.clone();
                                    config.short_abstract_limit = n.clamp(50, 2000);
                                    apply_config(&svc, state, config);
                                }
                            }
                        },
                    }

                    label { "Expand all abstracts while printing:" }
                    input {
                        r#type: "checkbox",
                        checked: config.auto_expand_for_print,
                        onchange: {
                            let svc = svc.clone();
                            move |evt| {
                                let mut config = state.read().config.clone();
                                config.auto_expand_for_print = evt.checked();
                                apply_config(&svc, state, config);
                            }
                        },
                    }
                }
            }

            if let Some(ref msg) = status_message {
                p { style: "color: #856404; background: #fff3cd; padding: 8px 12px; border-radius: 8px;",
                    "{msg}"
                }
            }
        }
    }
}

/// Persist a config change and rebuild the card map under the new limit.
fn apply_config(svc: &AppServices, mut state: Signal<AppState>, config: AppConfig) {
    if let Err(e) = svc.save_config(&config) {
        error!(error = %e, "saving config failed");
        state.write().status_message = Some(format!("Could not save settings: {e}"));
        return;
    }

    let mut st = state.write();
    st.config = config;
    let records = st.records.clone();
    st.set_results(records);
}
