//! # Matching Module
//!
//! The matching module is the route-matching engine: it compiles route templates into a
//! deterministic, segment-by-segment automaton and walks that automaton once per request.
//!
//! ## Overview
//!
//! - [`segment`] splits a request path into `(start, length)` views without allocating
//! - [`jump_table`] maps one segment to the next state; the variant per state is picked by
//!   literal count ([`MatcherOptions`])
//! - [`trie`] is the many-literal variant, with a chunked (SWAR) case-insensitive
//!   comparator from [`ascii`] at its leaves
//! - [`builder`] compiles endpoints into states
//! - [`dfa`] holds the immutable automaton and its walk
//!
//! ## Architecture
//!
//! 1. **Compilation**: [`MatcherBuilder`] grows a node tree over the endpoints' segment
//!    requirements and turns every node into a state with one jump table.
//! 2. **Matching**: [`DfaMatcher::match_path`] tokenizes the path into a stack buffer and
//!    follows one jump-table lookup per segment. The reached state's candidates, in
//!    registration order, are the result; an empty set means no route matched.
//!
//! Choosing between several candidates (HTTP method, constraints) is left to the caller;
//! [`crate::router::Router`] does the simplest version of it.
//!
//! ## Example
//!
//! ```rust
//! use routedfa::matching::{MatcherBuilder, MatcherOptions};
//!
//! let mut builder = MatcherBuilder::new(MatcherOptions::default());
//! builder.add_template("/product", "list").unwrap();
//! builder.add_template("/product/{id}", "get").unwrap();
//! let matcher = builder.build().unwrap();
//!
//! let set = matcher.match_path("/product/5");
//! let candidate = &set.candidates()[0];
//! assert_eq!(candidate.endpoint, "get");
//! assert_eq!(set.values(candidate)[0].1, "5");
//! assert!(matcher.match_path("/product/5/6").is_empty());
//! ```

pub mod ascii;
pub mod builder;
pub mod candidate;
pub mod dfa;
pub mod error;
pub mod jump_table;
pub mod options;
pub mod pattern;
pub mod segment;
pub mod trie;


pub use builder::MatcherBuilder;
pub use candidate::{Candidate, CandidateSet, Capture, ParamVec};
pub use dfa::{DfaMatcher, DfaState};
pub use error::BuildError;
pub use jump_table::{JumpTable, JumpTableKind, NO_MATCH};
pub use options::{MatcherOptions, Vectorize};
pub use pattern::{RoutePattern, SegmentRequirement};
pub use segment::{tokenize, PathSegment};
