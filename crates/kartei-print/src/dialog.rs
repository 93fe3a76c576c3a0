// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host print dialog boundary.
//
// The engine in this crate only prepares card state; actually presenting
// the print dialog belongs to the app shell, which knows about the webview.
// The trait keeps that dependency pointing in one direction.

use kartei_core::error::Result;

/// Present the host environment's print dialog for the rendered view.
pub trait PrintDialog {
    /// Open the dialog.  Returns Ok(()) once the request is handed to the
    /// host; the user may still cancel printing.
    fn open(&self) -> Result<()>;
}

/// Dialog that does nothing.  Used in headless runs and tests, where
/// preparing the card set is still meaningful but there is no host dialog
/// to show.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPrintDialog;

impl PrintDialog for NullPrintDialog {
    fn open(&self) -> Result<()> {
        Ok(())
    }
}
