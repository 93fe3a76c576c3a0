// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Search query model.
//
// A raw query is whitespace-split into words; every word must match for a
// record to qualify.  The year filter is a separate exact comparison.  The
// parsed words double as the highlight keywords on the Browse page.

/// A parsed catalogue search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Words that must each match title or abstract.
    pub words: Vec<String>,
    /// Exact year to restrict to, if any.
    pub year: Option<String>,
}

impl SearchQuery {
    /// Split a raw query string on whitespace and normalise the year
    /// filter (blank selections count as no filter).
    pub fn parse(raw: &str, year: Option<&str>) -> Self {
        let words = raw.split_whitespace().map(str::to_string).collect();
        let year = year
            .map(str::trim)
            .filter(|y| !y.is_empty())
            .map(str::to_string);
        Self { words, year }
    }

    /// Whether this query restricts anything at all.
    pub fn is_unfiltered(&self) -> bool {
        self.words.is_empty() && self.year.is_none()
    }
}
