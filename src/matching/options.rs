//! Build-time tuning for the jump-table cost model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default upper bound (inclusive) on literal count for a linear-search table.
pub const DEFAULT_LINEAR_SEARCH_MAX: usize = 4;
/// Default lower bound (inclusive) on literal count for a compiled trie.
pub const DEFAULT_TRIE_THRESHOLD: usize = 32;

/// When literal comparison should use the chunked ASCII comparator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vectorize {
    /// Vectorize ASCII literals of at least four bytes
    #[default]
    Auto,
    /// Vectorize every ASCII literal regardless of length
    Always,
    /// Always use the scalar comparator
    Never,
}

impl Vectorize {
    /// Whether a literal of `len` ASCII bytes should take the chunked path.
    #[inline]
    #[must_use]
    pub fn applies_to(self, len: usize) -> bool {
        match self {
            Vectorize::Auto => len >= super::ascii::MIN_VECTORIZED_LEN,
            Vectorize::Always => true,
            Vectorize::Never => false,
        }
    }
}

impl FromStr for Vectorize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Vectorize::Auto),
            "always" | "on" | "true" => Ok(Vectorize::Always),
            "never" | "off" | "false" => Ok(Vectorize::Never),
            other => Err(format!("unknown vectorize mode '{other}'")),
        }
    }
}

impl fmt::Display for Vectorize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Vectorize::Auto => "auto",
            Vectorize::Always => "always",
            Vectorize::Never => "never",
        };
        f.write_str(s)
    }
}

/// Options controlling which jump table variant each state receives.
///
/// - 0 literals: zero-entry table
/// - 1 literal: single-entry table
/// - up to `linear_search_max` literals: linear search
/// - at least `trie_threshold` literals (when set): compiled trie
/// - anything in between: dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherOptions {
    /// Largest literal count served by a linear scan
    pub linear_search_max: usize,
    /// Smallest literal count compiled into a trie; `None` never builds tries
    pub trie_threshold: Option<usize>,
    /// Chunked comparator policy for single-entry tables and trie leaves
    pub vectorize: Vectorize,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            linear_search_max: DEFAULT_LINEAR_SEARCH_MAX,
            trie_threshold: Some(DEFAULT_TRIE_THRESHOLD),
            vectorize: Vectorize::Auto,
        }
    }
}
