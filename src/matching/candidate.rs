//! Candidates: what a terminal state hands to the endpoint selection layer.

use smallvec::SmallVec;
use std::sync::Arc;

use super::pattern::{RoutePattern, SegmentRequirement};
use super::segment::PathSegment;

/// Maximum number of captured values kept inline before spilling to the heap.
/// Most routes have ≤4 parameters (e.g. /users/{id}/posts/{post_id}).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Segment buffer size that avoids heap allocation for typical paths.
pub const INLINE_SEGMENTS: usize = 32;

/// Captured route values borrowed from the request path.
///
/// Names come from the compiled automaton (`Arc` clone, no copy); values are slices of
/// the path.
pub type ParamVec<'p> = SmallVec<[(Arc<str>, &'p str); MAX_INLINE_PARAMS]>;

/// Where a parameter's value lives in the tokenized path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Capture {
    /// Parameter name
    pub name: Arc<str>,
    /// Index into the tokenized segments
    pub segment_index: usize,
}

/// One endpoint that the reached state accepts, with route-value hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<T> {
    /// The opaque endpoint handle supplied to the builder
    pub endpoint: T,
    /// Precedence group: candidates sharing a score are equally specific
    pub score: u32,
    /// Single-segment parameters in template order
    pub captures: Box<[Capture]>,
    /// Catch-all parameter, whose value runs to the end of the path
    pub catch_all: Option<Capture>,
}

impl<T> Candidate<T> {
    pub(crate) fn new(endpoint: T, pattern: &RoutePattern, score: u32) -> Self {
        let mut captures = Vec::new();
        let mut catch_all = None;
        for (segment_index, requirement) in pattern.segments().iter().enumerate() {
            match requirement {
                SegmentRequirement::Literal(_) => {}
                SegmentRequirement::Parameter { name, .. } => captures.push(Capture {
                    name: Arc::clone(name),
                    segment_index,
                }),
                SegmentRequirement::CatchAll(name) => {
                    catch_all = Some(Capture {
                        name: Arc::clone(name),
                        segment_index,
                    });
                }
            }
        }
        Self {
            endpoint,
            score,
            captures: captures.into_boxed_slice(),
            catch_all,
        }
    }

    /// Whether this candidate extracts any route values.
    #[must_use]
    pub fn has_captures(&self) -> bool {
        !self.captures.is_empty() || self.catch_all.is_some()
    }

    /// Read this candidate's route values out of a tokenized path.
    ///
    /// Optional parameters and catch-alls with no (or an empty) segment are omitted.
    #[must_use]
    pub fn values<'p>(&self, path: &'p str, segments: &[PathSegment]) -> ParamVec<'p> {
        let mut values = ParamVec::new();
        for capture in self.captures.iter() {
            if let Some(segment) = segments.get(capture.segment_index) {
                if !segment.is_empty() {
                    values.push((Arc::clone(&capture.name), segment.text(path)));
                }
            }
        }
        if let Some(capture) = &self.catch_all {
            if let Some(segment) = segments.get(capture.segment_index) {
                let rest = segment.rest(path);
                if !rest.is_empty() {
                    values.push((Arc::clone(&capture.name), rest));
                }
            }
        }
        values
    }
}

/// The ordered candidates for one matched path, plus the tokenized path they refer to.
#[derive(Debug, Clone)]
pub struct CandidateSet<'m, 'p, T> {
    path: &'p str,
    segments: SmallVec<[PathSegment; INLINE_SEGMENTS]>,
    candidates: &'m [Candidate<T>],
}

impl<'m, 'p, T> CandidateSet<'m, 'p, T> {
    pub(crate) fn new(
        path: &'p str,
        segments: SmallVec<[PathSegment; INLINE_SEGMENTS]>,
        candidates: &'m [Candidate<T>],
    ) -> Self {
        Self {
            path,
            segments,
            candidates,
        }
    }

    #[must_use]
    pub fn path(&self) -> &'p str {
        self.path
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[must_use]
    pub fn candidates(&self) -> &'m [Candidate<T>] {
        self.candidates
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'m, Candidate<T>> {
        self.candidates.iter()
    }

    /// Route values of `candidate` for this path.
    #[must_use]
    pub fn values(&self, candidate: &Candidate<T>) -> ParamVec<'p> {
        candidate.values(self.path, &self.segments)
    }
}
