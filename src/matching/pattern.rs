//! Segment requirements: the builder's view of a route template.
//!
//! The matcher never parses templates itself. Callers hand the builder a sequence of
//! [`SegmentRequirement`]s per endpoint; [`RoutePattern::parse`] is a small convenience
//! reader for the common `/literal/{param}/{opt?}/{*rest}` shape used by route-table files
//! and tests.

use std::fmt;
use std::sync::Arc;

use super::error::BuildError;

/// What one path segment of a route requires.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SegmentRequirement {
    /// Exact text, compared ASCII case-insensitively
    Literal(Arc<str>),
    /// Any non-empty segment, captured under `name`
    Parameter { name: Arc<str>, optional: bool },
    /// Every remaining segment (possibly none), captured under `name`
    CatchAll(Arc<str>),
}

impl SegmentRequirement {
    pub fn literal(text: &str) -> Self {
        SegmentRequirement::Literal(text.into())
    }

    pub fn parameter(name: &str) -> Self {
        SegmentRequirement::Parameter {
            name: name.into(),
            optional: false,
        }
    }

    pub fn optional(name: &str) -> Self {
        SegmentRequirement::Parameter {
            name: name.into(),
            optional: true,
        }
    }

    pub fn catch_all(name: &str) -> Self {
        SegmentRequirement::CatchAll(name.into())
    }

    /// Whether a path may end before this requirement.
    #[inline]
    #[must_use]
    pub fn may_be_absent(&self) -> bool {
        matches!(
            self,
            SegmentRequirement::Parameter { optional: true, .. } | SegmentRequirement::CatchAll(_)
        )
    }

    /// Precedence digit: lower is more specific.
    #[must_use]
    pub fn precedence(&self) -> u8 {
        match self {
            SegmentRequirement::Literal(_) => 1,
            SegmentRequirement::Parameter {
                optional: false, ..
            } => 3,
            SegmentRequirement::Parameter { optional: true, .. } => 4,
            SegmentRequirement::CatchAll(_) => 5,
        }
    }
}

impl fmt::Display for SegmentRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentRequirement::Literal(text) => f.write_str(text),
            SegmentRequirement::Parameter {
                name,
                optional: false,
            } => write!(f, "{{{name}}}"),
            SegmentRequirement::Parameter {
                name,
                optional: true,
            } => write!(f, "{{{name}?}}"),
            SegmentRequirement::CatchAll(name) => write!(f, "{{*{name}}}"),
        }
    }
}

/// An ordered list of segment requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RoutePattern {
    segments: Vec<SegmentRequirement>,
}

impl RoutePattern {
    #[must_use]
    pub fn new(segments: Vec<SegmentRequirement>) -> Self {
        Self { segments }
    }

    /// Read a `/a/{id}/{opt?}/{*rest}` style template.
    ///
    /// Empty components (`//`, trailing `/`) are ignored. The result is checked with
    /// [`RoutePattern::validate`].
    pub fn parse(template: &str) -> Result<Self, BuildError> {
        let mut segments = Vec::new();
        for part in template.split('/').filter(|s| !s.is_empty()) {
            let unsupported = || BuildError::UnsupportedSegment {
                template: template.to_string(),
                segment: part.to_string(),
            };
            let requirement = match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                Some(inner) if inner.contains(['{', '}']) => return Err(unsupported()),
                Some(inner) => {
                    let (name, requirement) = if let Some(name) =
                        inner.strip_prefix("**").or_else(|| inner.strip_prefix('*'))
                    {
                        (name, SegmentRequirement::catch_all(name))
                    } else if let Some(name) = inner.strip_suffix('?') {
                        (name, SegmentRequirement::optional(name))
                    } else {
                        (inner, SegmentRequirement::parameter(inner))
                    };
                    if name.contains(['?', '*']) {
                        return Err(unsupported());
                    }
                    requirement
                }
                None if part.contains(['{', '}']) => return Err(unsupported()),
                None => SegmentRequirement::literal(part),
            };
            segments.push(requirement);
        }

        let pattern = Self { segments };
        pattern.validate(template)?;
        Ok(pattern)
    }

    /// Reject structurally invalid requirement sequences.
    ///
    /// `label` names the route in the error (usually its template).
    pub fn validate(&self, label: &str) -> Result<(), BuildError> {
        let mut seen_optional = false;
        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                SegmentRequirement::Literal(text) => {
                    if text.is_empty() || text.contains('/') {
                        return Err(BuildError::InvalidLiteral {
                            route: label.to_string(),
                            index,
                        });
                    }
                }
                SegmentRequirement::Parameter { name, .. } | SegmentRequirement::CatchAll(name) => {
                    if name.is_empty() {
                        return Err(BuildError::EmptyParameterName {
                            route: label.to_string(),
                            index,
                        });
                    }
                }
            }

            if let SegmentRequirement::CatchAll(name) = segment {
                if index + 1 != self.segments.len() {
                    return Err(BuildError::CatchAllNotLast {
                        route: label.to_string(),
                        name: name.to_string(),
                    });
                }
            }

            if seen_optional && !segment.may_be_absent() {
                return Err(BuildError::RequiredAfterOptional {
                    route: label.to_string(),
                    index,
                });
            }
            seen_optional |= matches!(segment, SegmentRequirement::Parameter { optional: true, .. });
        }
        Ok(())
    }

    #[must_use]
    pub fn segments(&self) -> &[SegmentRequirement] {
        &self.segments
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Per-segment precedence digits; compares lexicographically, lower is more specific.
    #[must_use]
    pub fn precedence(&self) -> Vec<u8> {
        self.segments.iter().map(SegmentRequirement::precedence).collect()
    }
}

impl From<Vec<SegmentRequirement>> for RoutePattern {
    fn from(segments: Vec<SegmentRequirement>) -> Self {
        Self::new(segments)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}
