// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Wiring between the webview's print lifecycle and the card state.
//
// A small script registered once after mount forwards the host's
// before-print and after-print signals to Rust.  The media-query change
// notification covers webviews that render for print without firing the
// window events; where even the modern listener API is missing, the legacy
// registration is used.  Duplicate announcements of the same event are
// harmless; the print session's phase guard absorbs them.

use dioxus::document;
use dioxus::prelude::*;

use tracing::{debug, warn};

use kartei_core::error::Result;
use kartei_print::PrintDialog;

use crate::state::AppState;

/// Listener registration, evaluated once in the webview.
const PRINT_EVENT_LISTENERS_JS: &str = r#"
    window.addEventListener("beforeprint", () => dioxus.send("before"));
    window.addEventListener("afterprint", () => dioxus.send("after"));
    if (window.matchMedia) {
        const mql = window.matchMedia("print");
        const onChange = (e) => dioxus.send(e.matches ? "before" : "after");
        if (mql.addEventListener) {
            mql.addEventListener("change", onChange);
        } else if (mql.addListener) {
            // Older webviews have no EventTarget API on MediaQueryList.
            mql.addListener(onChange);
        }
    }
"#;

/// Register the print listeners and drive expand/restore from their
/// signals.  Call once from the root component after mount.
pub fn install(mut state: Signal<AppState>) {
    spawn(async move {
        let mut listeners = document::eval(PRINT_EVENT_LISTENERS_JS);
        loop {
            match listeners.recv::<String>().await {
                Ok(signal) => {
                    if !state.read().config.auto_expand_for_print {
                        debug!(%signal, "print signal ignored: auto-expand disabled");
                        continue;
                    }
                    match signal.as_str() {
                        "before" => state.write().expand_for_print(),
                        "after" => state.write().restore_after_print(),
                        other => debug!(signal = other, "unknown print signal ignored"),
                    }
                }
                Err(e) => {
                    warn!(error = ?e, "print lifecycle channel closed");
                    break;
                }
            }
        }
    });
}

/// `PrintDialog` backed by the webview's own print facility.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebviewPrintDialog;

impl PrintDialog for WebviewPrintDialog {
    fn open(&self) -> Result<()> {
        let _ = document::eval("window.print();");
        Ok(())
    }
}
