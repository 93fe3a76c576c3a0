// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

/// Persistent application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Character count at which an abstract is split into a short/full pair.
    /// Abstracts at or under the limit render in full and carry no toggle.
    pub short_abstract_limit: usize,
    /// Expand every abstract to its full text while the page renders for
    /// print, restoring per-card state afterwards.
    pub auto_expand_for_print: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            short_abstract_limit: 300,
            auto_expand_for_print: true,
        }
    }
}
