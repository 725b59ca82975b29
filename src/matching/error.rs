use std::fmt;

/// Route configuration error
///
/// Returned when a route's segment requirements cannot be compiled. These are raised once
/// while building a matcher, never while matching a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A catch-all requirement is followed by further segments
    CatchAllNotLast {
        /// The offending route
        route: String,
        /// Name of the catch-all parameter
        name: String,
    },
    /// A required segment follows an optional parameter
    RequiredAfterOptional {
        /// The offending route
        route: String,
        /// Index of the required segment
        index: usize,
    },
    /// A literal is empty or contains `/`
    InvalidLiteral {
        /// The offending route
        route: String,
        /// Index of the literal segment
        index: usize,
    },
    /// A parameter or catch-all has an empty name
    EmptyParameterName {
        /// The offending route
        route: String,
        /// Index of the parameter segment
        index: usize,
    },
    /// A template segment the reader cannot represent (e.g. `{a}-{b}`, `{a{b}`, `{*x?}`)
    UnsupportedSegment {
        /// The template being read
        template: String,
        /// The segment that could not be read
        segment: String,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::CatchAllNotLast { route, name } => write!(
                f,
                "route configuration error: catch-all parameter '{name}' in '{route}' must be the last segment"
            ),
            BuildError::RequiredAfterOptional { route, index } => write!(
                f,
                "route configuration error: segment {index} of '{route}' is required but follows an optional parameter"
            ),
            BuildError::InvalidLiteral { route, index } => write!(
                f,
                "route configuration error: literal segment {index} of '{route}' is empty or contains '/'"
            ),
            BuildError::EmptyParameterName { route, index } => write!(
                f,
                "route configuration error: parameter at segment {index} of '{route}' has no name"
            ),
            BuildError::UnsupportedSegment { template, segment } => write!(
                f,
                "route configuration error: segment '{segment}' of '{template}' is not a literal, parameter or catch-all"
            ),
        }
    }
}

impl std::error::Error for BuildError {}
