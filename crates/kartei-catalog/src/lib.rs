// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Kartei Catalog — the persistent record store and everything that feeds
// it or reads from it: CSV import, word search with a year filter, and
// keyword highlighting for rendered results.

pub mod highlight;
pub mod import;
pub mod search;
pub mod store;

pub use highlight::{Segment, highlight_segments};
pub use import::{ImportReport, import_csv_file};
pub use search::SearchQuery;
pub use store::CatalogStore;
