//! The compiled automaton and its per-request walk.
//!
//! # Hot path
//!
//! [`DfaMatcher::find_candidate_set`] is the request hot path: one jump-table lookup per
//! segment, no locks, no allocation, no backtracking. [`DfaMatcher::match_path`] adds
//! tokenization into a stack buffer (`SmallVec`, inline up to
//! [`INLINE_SEGMENTS`] segments).

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use smallvec::{smallvec, SmallVec};
use std::collections::BTreeMap;
use std::fmt;

use super::candidate::{Candidate, CandidateSet, INLINE_SEGMENTS};
use super::jump_table::{JumpTable, JumpTableKind, NO_MATCH};
use super::segment::{tokenize, PathSegment};

/// One automaton state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfaState<T> {
    pub(crate) label: Box<str>,
    pub(crate) candidates: Box<[Candidate<T>]>,
    /// `None` for states that consume the rest of the path (catch-alls)
    pub(crate) transitions: Option<JumpTable>,
}

impl<T> DfaState<T> {
    /// Route-shaped label of this state, e.g. `/product/{...}`.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn candidates(&self) -> &[Candidate<T>] {
        &self.candidates
    }

    /// The segment jump table, or `None` when the walk stops here.
    #[must_use]
    pub fn transitions(&self) -> Option<&JumpTable> {
        self.transitions.as_ref()
    }

    /// Whether reaching this state (at the end of the path) yields candidates.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !self.candidates.is_empty()
    }
}

/// Immutable route-matching automaton. State 0 is the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfaMatcher<T> {
    states: Box<[DfaState<T>]>,
    max_segment_count: usize,
}

impl<T> DfaMatcher<T> {
    pub(crate) fn new(states: Vec<DfaState<T>>, max_segment_count: usize) -> Self {
        Self {
            states: states.into_boxed_slice(),
            max_segment_count,
        }
    }

    /// Final state for an already tokenized path, and whether the walk stopped early on a
    /// state that consumes the rest of the path.
    #[inline]
    fn walk(&self, path: &str, segments: &[PathSegment]) -> Option<(usize, bool)> {
        let mut state = 0;
        for segment in segments {
            let Some(table) = &self.states.get(state)?.transitions else {
                return Some((state, true));
            };
            state = table.destination(path, *segment);
            if state == NO_MATCH {
                return None;
            }
        }
        let stopped = self.states.get(state)?.transitions.is_none();
        Some((state, stopped))
    }

    /// Candidates for an already tokenized path.
    ///
    /// Walks one state per segment; a `NO_MATCH` transition yields an empty slice. A
    /// state without transitions ends the walk early and its candidates are returned.
    #[inline]
    #[must_use]
    pub fn find_candidate_set(&self, path: &str, segments: &[PathSegment]) -> &[Candidate<T>] {
        self.walk(path, segments)
            .and_then(|(state, _)| self.states.get(state))
            .map_or(&[][..], |s| &s.candidates[..])
    }

    /// Tokenize `path` and return its candidate set.
    ///
    /// The segment buffer holds `max_segment_count + 2` entries: one more than the deepest
    /// route for a trailing empty segment (which lands in an exit state) and one for the
    /// segment after it. If the path still does not fit, the unconsumed tail is a no-match
    /// unless the walk already reached a catch-all.
    #[must_use]
    pub fn match_path<'m, 'p>(&'m self, path: &'p str) -> CandidateSet<'m, 'p, T> {
        let mut segments: SmallVec<[PathSegment; INLINE_SEGMENTS]> =
            smallvec![PathSegment::default(); self.segment_buffer_len()];
        let count = tokenize(path, &mut segments);
        let truncated = count == segments.len()
            && segments
                .last()
                .is_some_and(|s| ((s.start + s.length) as usize) < path.len());
        segments.truncate(count);

        let candidates: &[Candidate<T>] = match self.walk(path, &segments) {
            Some((state, stopped)) if stopped || !truncated => self
                .states
                .get(state)
                .map_or(&[][..], |s| &s.candidates[..]),
            _ => &[][..],
        };
        CandidateSet::new(path, segments, candidates)
    }

    /// States visited while matching `path`, root first. Diagnostic only: allocates.
    #[must_use]
    pub fn trace(&self, path: &str) -> Vec<usize> {
        let mut segments = vec![PathSegment::default(); self.segment_buffer_len()];
        let count = tokenize(path, &mut segments);

        let mut visited = vec![0];
        let mut state = 0;
        for segment in &segments[..count] {
            let Some(table) = self.states.get(state).and_then(|s| s.transitions.as_ref()) else {
                break;
            };
            state = table.destination(path, *segment);
            if state == NO_MATCH {
                break;
            }
            visited.push(state);
        }
        visited
    }

    /// Deepest registered route, in segments.
    #[must_use]
    pub fn max_segment_count(&self) -> usize {
        self.max_segment_count
    }

    /// Segment buffer size callers should provide to [`tokenize`].
    #[must_use]
    pub fn segment_buffer_len(&self) -> usize {
        self.max_segment_count + 2
    }

    #[must_use]
    pub fn states(&self) -> &[DfaState<T>] {
        &self.states
    }

    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// How many states use each jump-table variant.
    #[must_use]
    pub fn table_histogram(&self) -> BTreeMap<JumpTableKind, usize> {
        let mut histogram = BTreeMap::new();
        for table in self.states.iter().filter_map(|s| s.transitions.as_ref()) {
            *histogram.entry(table.kind()).or_insert(0) += 1;
        }
        histogram
    }
}

impl<T: fmt::Display> fmt::Display for DfaMatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "states={} max_segments={}",
            self.states.len(),
            self.max_segment_count
        )?;
        for (id, state) in self.states.iter().enumerate() {
            write!(f, "[{id}] {}", state.label)?;
            match &state.transitions {
                Some(table) => writeln!(f, " -> {table}")?,
                None => writeln!(f, " -> (rest of path)")?,
            }
            for candidate in state.candidates.iter() {
                writeln!(f, "    {} (score {})", candidate.endpoint, candidate.score)?;
            }
        }
        Ok(())
    }
}
