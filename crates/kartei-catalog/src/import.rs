// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// CSV import into the catalogue.
//
// Import files are header-rowed CSV with the columns title, year,
// abstract, supervisor, student.  Missing optional columns become empty
// strings; a row that cannot be parsed at all is skipped and counted, it
// never aborts the import.  All parsed rows land in one transaction.

use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use kartei_core::error::Result;
use kartei_core::types::ProjectDraft;

use crate::store::CatalogStore;

/// Outcome of one import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    /// Rows written to the catalogue.
    pub inserted: usize,
    /// Rows that failed to parse and were left out.
    pub skipped: usize,
}

/// Parse CSV rows into drafts, counting rows that fail to parse.
pub fn read_drafts<R: Read>(reader: R) -> (Vec<ProjectDraft>, usize) {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let mut drafts = Vec::new();
    let mut skipped = 0;
    for (index, row) in csv_reader.deserialize::<ProjectDraft>().enumerate() {
        match row {
            Ok(draft) => drafts.push(draft),
            Err(e) => {
                warn!(row = index + 1, error = %e, "skipping malformed CSV row");
                skipped += 1;
            }
        }
    }

    (drafts, skipped)
}

/// Import a CSV file into the catalogue.
pub fn import_csv_file(store: &mut CatalogStore, path: &Path) -> Result<ImportReport> {
    let file = std::fs::File::open(path)?;
    let (drafts, skipped) = read_drafts(file);
    let inserted = store.insert_many(&drafts)?;

    info!(
        path = %path.display(),
        inserted,
        skipped,
        "CSV import complete"
    );
    Ok(ImportReport { inserted, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    const WELL_FORMED: &str = "\
title,year,abstract,supervisor,student
Solar Dryer Controller,2025,An automated solar dryer.,Dr. Rahim,A. Tan
IoT Aquaponics Monitor,2024,Sensor network for water quality.,Dr. Lee,B. Kumar
";

    #[test]
    fn well_formed_rows_are_inserted() {
        let mut store = CatalogStore::open_in_memory().expect("open in-memory db");
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(WELL_FORMED.as_bytes()).expect("write csv");

        let report = import_csv_file(&mut store, file.path()).expect("import");

        assert_eq!(report, ImportReport { inserted: 2, skipped: 0 });
        assert_eq!(store.record_count().expect("count"), 2);

        let all = store.all_records().expect("all_records");
        assert_eq!(all[0].title, "Solar Dryer Controller");
        assert_eq!(all[0].supervisor, "Dr. Rahim");
    }

    #[test]
    fn missing_optional_columns_default_to_empty() {
        let csv = "\
title,year,abstract
Solar Dryer Controller,2025,An automated solar dryer.
";
        let (drafts, skipped) = read_drafts(csv.as_bytes());

        assert_eq!(skipped, 0);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].supervisor, "");
        assert_eq!(drafts[0].student, "");
    }

    #[test]
    fn abstract_column_maps_to_abstract_text() {
        let (drafts, _) = read_drafts(WELL_FORMED.as_bytes());
        assert_eq!(drafts[0].abstract_text, "An automated solar dryer.");
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let csv = "\
title,year,abstract,supervisor,student
Good Row,2025,Fine abstract.,Dr. Rahim,A. Tan
Bad Row,2025
Another Good Row,2024,Also fine.,Dr. Lee,B. Kumar
";
        let (drafts, skipped) = read_drafts(csv.as_bytes());

        assert_eq!(skipped, 1);
        let titles: Vec<&str> = drafts.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["Good Row", "Another Good Row"]);
    }

    #[test]
    fn empty_file_imports_nothing() {
        let mut store = CatalogStore::open_in_memory().expect("open in-memory db");
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"title,year,abstract,supervisor,student\n")
            .expect("write csv");

        let report = import_csv_file(&mut store, file.path()).expect("import");

        assert_eq!(report, ImportReport { inserted: 0, skipped: 0 });
    }
}
