//! Router core module - hot path for request routing.
//!
//! # Hot path
//!
//! [`Router::route`] loads the current automaton snapshot (one atomic load, no lock), walks
//! it, and borrows captured values straight out of the request path. The following clippy
//! lints are denied to keep allocations out of this module:
//!
//! - `clippy::inefficient_to_string` - Catches unnecessary allocations
//! - `clippy::format_push_string` - Prevents format! string building
//! - `clippy::unnecessary_to_owned` - Catches owned copies of borrowed data

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use arc_swap::ArcSwap;
use http::Method;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::matching::{BuildError, DfaMatcher, ParamVec};
use crate::routes::{RouteEntry, RouteTable};

/// The automaton a [`Router`] serves: endpoints are shared route entries.
pub type RouteMatcher = DfaMatcher<Arc<RouteEntry>>;

/// Matches slower than this are logged at `warn`.
const SLOW_MATCH: Duration = Duration::from_millis(1);

/// Result of successfully matching a request path to a route
///
/// Parameter names are shared with the compiled automaton and values borrow the request
/// path, so building a match does not allocate for routes with ≤8 parameters.
#[derive(Debug, Clone)]
pub struct RouteMatch<'p> {
    /// The selected route
    pub route: Arc<RouteEntry>,
    /// Path parameters extracted from the URL (e.g., `{id}` → `("id", "123")`)
    pub path_params: ParamVec<'p>,
    /// Name of the handler that should process this request
    pub handler_name: Arc<str>,
}

impl RouteMatch<'_> {
    /// Get a path parameter by name
    ///
    /// Uses "last write wins" semantics: if duplicate parameter names exist
    /// at different path depths (e.g., `/org/{id}/team/{team_id}/user/{id}`),
    /// returns the last occurrence (the user id, not the org id).
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| *v)
    }

    /// Convert path_params to a HashMap
    /// Note: This allocates - use get_path_param() in hot paths instead
    #[must_use]
    pub fn path_params_map(&self) -> HashMap<String, String> {
        self.path_params
            .iter()
            .map(|(k, v)| (k.to_string(), (*v).to_string()))
            .collect()
    }
}

/// Router that matches HTTP requests to route entries through a compiled DFA
///
/// The automaton is published through an [`ArcSwap`]: [`Router::replace`] and
/// [`Router::swap`] install a new one atomically while in-flight matches finish on the
/// snapshot they loaded.
///
/// # Performance
///
/// - Route matching: one jump-table lookup per path segment, independent of route count
/// - No locks on the read path
/// - No allocation for paths up to 32 segments and routes up to 8 parameters
pub struct Router {
    matcher: ArcSwap<RouteMatcher>,
}

impl Router {
    /// Compile `table` and serve it.
    pub fn new(table: &RouteTable) -> Result<Self, BuildError> {
        let matcher = table.build_matcher()?;
        info!(
            routes_count = table.len(),
            states = matcher.state_count(),
            routing_algorithm = "dfa",
            "Routing table loaded"
        );
        Ok(Self::from_matcher(matcher))
    }

    /// Serve an already compiled automaton.
    #[must_use]
    pub fn from_matcher(matcher: RouteMatcher) -> Self {
        Self {
            matcher: ArcSwap::from_pointee(matcher),
        }
    }

    /// Match an HTTP request to a route
    ///
    /// Candidates come back in route table order; the first one whose method is unset or
    /// equal to `method` is selected.
    ///
    /// # Returns
    ///
    /// * `Some(RouteMatch)` - If a matching route is found
    /// * `None` - If no route matches (results in 404, or 405 when only the method differs)
    #[must_use]
    pub fn route<'p>(&self, method: Method, path: &'p str) -> Option<RouteMatch<'p>> {
        debug!(
            method = %method,
            path = %path,
            algorithm = "dfa",
            "Route match attempt"
        );

        let match_start = Instant::now();
        let matcher = self.matcher.load();
        let set = matcher.match_path(path);
        let selected = set.iter().find(|c| c.endpoint.accepts(&method));
        let result = selected.map(|candidate| RouteMatch {
            route: Arc::clone(&candidate.endpoint),
            path_params: set.values(candidate),
            handler_name: Arc::clone(&candidate.endpoint.handler_name),
        });
        let match_duration = match_start.elapsed();

        match &result {
            Some(m) if match_duration > SLOW_MATCH => {
                warn!(
                    method = %method,
                    path = %path,
                    handler_name = %m.handler_name,
                    route_pattern = %m.route.path_pattern,
                    path_params = ?m.path_params,
                    duration_us = match_duration.as_micros(),
                    algorithm = "dfa",
                    "Slow route matching detected"
                );
            }
            Some(m) => {
                debug!(
                    method = %method,
                    path = %path,
                    handler_name = %m.handler_name,
                    route_pattern = %m.route.path_pattern,
                    path_params = ?m.path_params,
                    duration_us = match_duration.as_micros(),
                    algorithm = "dfa",
                    "Route matched"
                );
            }
            None if !set.is_empty() => {
                warn!(
                    method = %method,
                    path = %path,
                    candidates = set.len(),
                    duration_us = match_duration.as_micros(),
                    "No candidate accepts method"
                );
            }
            None => {
                warn!(
                    method = %method,
                    path = %path,
                    duration_us = match_duration.as_micros(),
                    algorithm = "dfa",
                    "No route matched"
                );
            }
        }

        result
    }

    /// Every candidate route for `path`, in order, regardless of method.
    /// Note: This allocates - use route() in hot paths instead
    #[must_use]
    pub fn candidates(&self, path: &str) -> Vec<Arc<RouteEntry>> {
        let matcher = self.matcher.load();
        let set = matcher.match_path(path);
        set.iter().map(|c| Arc::clone(&c.endpoint)).collect()
    }

    /// Compile `table` and publish it. On error the current automaton stays live.
    pub fn replace(&self, table: &RouteTable) -> Result<(), BuildError> {
        let matcher = table.build_matcher()?;
        let previous = self.swap(matcher);
        info!(
            routes_count = table.len(),
            states = self.snapshot().state_count(),
            previous_states = previous.state_count(),
            "Routing table replaced"
        );
        Ok(())
    }

    /// Publish `matcher`, returning the automaton it replaced.
    pub fn swap(&self, matcher: RouteMatcher) -> Arc<RouteMatcher> {
        self.matcher.swap(Arc::new(matcher))
    }

    /// The automaton currently being served.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RouteMatcher> {
        self.matcher.load_full()
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let matcher = self.matcher.load();
        f.debug_struct("Router")
            .field("states", &matcher.state_count())
            .field("max_segment_count", &matcher.max_segment_count())
            .finish()
    }
}
