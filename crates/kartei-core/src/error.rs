// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Kartei.
//
// Card interactions (toggling, hiding) never produce errors: a malformed
// card is skipped silently.  Errors exist only at the backend boundary:
// catalogue storage, CSV import, config persistence, and the host print
// dialog.

use thiserror::Error;

/// Top-level error type for all Kartei operations.
#[derive(Debug, Error)]
pub enum KarteiError {
    // -- Catalogue / persistence --
    #[error("database error: {0}")]
    Database(String),

    #[error("CSV import failed: {0}")]
    CsvImport(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Print boundary --
    #[error("print dialog unavailable: {0}")]
    PrintDialog(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, KarteiError>;
