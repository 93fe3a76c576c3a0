// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Keyword highlighting for rendered search results.
//
// Rather than splicing markup into strings, the text is segmented into
// plain and highlighted runs and the UI renders each run as it sees fit.
// Matching is case-insensitive over regex-escaped literals; longer
// keywords are tried first so "solar dryer" wins over "solar" at the same
// position.

use regex::RegexBuilder;

/// One contiguous run of output text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: false,
        }
    }

    fn marked(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: true,
        }
    }
}

/// Split `text` into plain and highlighted segments.
///
/// Concatenating the segment texts reproduces the input exactly; matched
/// runs keep their original casing.  Empty text yields no segments; with
/// no usable keywords the whole text comes back as one plain segment.
pub fn highlight_segments(text: &str, keywords: &[String]) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut kws: Vec<&str> = keywords
        .iter()
        .map(String::as_str)
        .filter(|k| !k.trim().is_empty())
        .collect();
    if kws.is_empty() {
        return vec![Segment::plain(text)];
    }

    // Longest first, duplicates removed (equal strings sort adjacently).
    kws.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    kws.dedup();

    let pattern = kws
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");

    let re = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re,
        // The pattern is an alternation of escaped literals; a build
        // failure means degenerate input, so fall back to no highlighting.
        Err(_) => return vec![Segment::plain(text)],
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for m in re.find_iter(text) {
        if m.start() > last {
            segments.push(Segment::plain(&text[last..m.start()]));
        }
        segments.push(Segment::marked(m.as_str()));
        last = m.end();
    }
    if last < text.len() {
        segments.push(Segment::plain(&text[last..]));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn joined(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn no_keywords_yields_one_plain_segment() {
        let segments = highlight_segments("An automated solar dryer.", &[]);
        assert_eq!(segments, vec![Segment::plain("An automated solar dryer.")]);
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(highlight_segments("", &kw(&["solar"])).is_empty());
    }

    #[test]
    fn matching_is_case_insensitive_and_preserves_case() {
        let segments = highlight_segments("Solar power for SOLAR dryers", &kw(&["solar"]));
        let marked: Vec<&str> = segments
            .iter()
            .filter(|s| s.highlighted)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(marked, vec!["Solar", "SOLAR"]);
    }

    #[test]
    fn longest_keyword_wins_at_the_same_position() {
        let segments =
            highlight_segments("a solar dryer prototype", &kw(&["solar", "solar dryer"]));
        let marked: Vec<&str> = segments
            .iter()
            .filter(|s| s.highlighted)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(marked, vec!["solar dryer"]);
    }

    #[test]
    fn segments_concatenate_back_to_the_input() {
        let text = "Moisture-driven drip irrigation with solar power.";
        let segments = highlight_segments(text, &kw(&["drip", "solar", "power"]));
        assert_eq!(joined(&segments), text);
        assert!(segments.iter().any(|s| s.highlighted));
    }

    #[test]
    fn regex_metacharacters_in_keywords_are_literal() {
        let segments = highlight_segments("uses C++ and .NET daily", &kw(&["c++", ".net"]));
        let marked: Vec<&str> = segments
            .iter()
            .filter(|s| s.highlighted)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(marked, vec!["C++", ".NET"]);
    }

    #[test]
    fn blank_keywords_are_ignored() {
        let segments = highlight_segments("plain text", &kw(&["  ", ""]));
        assert_eq!(segments, vec![Segment::plain("plain text")]);
    }
}
