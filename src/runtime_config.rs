//! # Runtime Configuration Module
//!
//! Environment variable overrides for the matcher cost model.
//!
//! ## Overview
//!
//! Route table files carry an `options:` block ([`MatcherOptions`]). These variables
//! override it at startup, which is handy for benchmarking one table under different
//! jump-table policies without editing the file.
//!
//! ## Environment Variables
//!
//! ### `RDFA_LINEAR_SEARCH_MAX`
//!
//! Largest literal count served by a linear scan. Accepts decimal (`4`) or hexadecimal
//! (`0x4`).
//!
//! ### `RDFA_TRIE_THRESHOLD`
//!
//! Smallest literal count compiled into a trie. Decimal or hexadecimal; `off` (or `none`)
//! disables tries.
//!
//! ### `RDFA_VECTORIZE`
//!
//! `auto`, `always` or `never`.
//!
//! Unset or unparsable variables leave the file's value alone.
//!
//! ## Usage
//!
//! ```rust
//! use routedfa::matching::MatcherOptions;
//! use routedfa::runtime_config::RuntimeConfig;
//!
//! let mut options = MatcherOptions::default();
//! RuntimeConfig::from_env().apply(&mut options);
//! ```
//!
//! ## Example Configuration
//!
//! ```bash
//! # Never build tries; dictionaries above 8 literals
//! export RDFA_TRIE_THRESHOLD=off
//! export RDFA_LINEAR_SEARCH_MAX=8
//! routedfa inspect --routes routes.yaml
//! ```

use std::env;
use tracing::warn;

use crate::matching::{MatcherOptions, Vectorize};

/// Matcher overrides loaded from environment variables.
///
/// Load this at startup using [`RuntimeConfig::from_env()`] and [`RuntimeConfig::apply`]
/// it to the options of a route table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub linear_search_max: Option<usize>,
    /// `Some(None)` disables tries
    pub trie_threshold: Option<Option<usize>>,
    pub vectorize: Option<Vectorize>,
}

fn parse_usize(val: &str) -> Option<usize> {
    let val = val.trim();
    if let Some(hex) = val.strip_prefix("0x").or_else(|| val.strip_prefix("0X")) {
        usize::from_str_radix(hex, 16).ok()
    } else {
        val.parse().ok()
    }
}

fn parse_threshold(val: &str) -> Option<Option<usize>> {
    match val.trim().to_ascii_lowercase().as_str() {
        "off" | "none" | "never" => Some(None),
        other => parse_usize(other).map(Some),
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| -> Option<String> { lookup(key).filter(|v| !v.trim().is_empty()) };

        let linear_search_max = read("RDFA_LINEAR_SEARCH_MAX").and_then(|v| {
            let parsed = parse_usize(&v);
            if parsed.is_none() {
                warn!(value = %v, "ignoring invalid RDFA_LINEAR_SEARCH_MAX");
            }
            parsed
        });
        let trie_threshold = read("RDFA_TRIE_THRESHOLD").and_then(|v| {
            let parsed = parse_threshold(&v);
            if parsed.is_none() {
                warn!(value = %v, "ignoring invalid RDFA_TRIE_THRESHOLD");
            }
            parsed
        });
        let vectorize = read("RDFA_VECTORIZE").and_then(|v| match v.parse::<Vectorize>() {
            Ok(mode) => Some(mode),
            Err(_) => {
                warn!(value = %v, "ignoring invalid RDFA_VECTORIZE");
                None
            }
        });

        RuntimeConfig {
            linear_search_max,
            trie_threshold,
            vectorize,
        }
    }

    /// Overwrite the fields of `options` that have an override.
    pub fn apply(&self, options: &mut MatcherOptions) {
        if let Some(max) = self.linear_search_max {
            options.linear_search_max = max;
        }
        if let Some(threshold) = self.trie_threshold {
            options.trie_threshold = threshold;
        }
        if let Some(vectorize) = self.vectorize {
            options.vectorize = vectorize;
        }
    }
}
