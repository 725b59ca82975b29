use http::Method;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::matching::{BuildError, DfaMatcher, MatcherBuilder, MatcherOptions, RoutePattern};

/// One `routes:` item as written in a route table file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    pub path: String,
    /// Absent means the route answers every method
    #[serde(default)]
    pub method: Option<String>,
    pub handler: String,
}

/// A route table file before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTableFile {
    #[serde(default)]
    pub options: MatcherOptions,
    #[serde(default)]
    pub routes: Vec<RouteDefinition>,
}

/// A validated route: the endpoint handle stored in the compiled matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    /// `None` accepts any method
    pub method: Option<Method>,
    /// The template as written, e.g. `/product/{id}`
    pub path_pattern: String,
    pub pattern: RoutePattern,
    pub handler_name: Arc<str>,
}

impl RouteEntry {
    /// Whether this route answers `method`.
    #[inline]
    #[must_use]
    pub fn accepts(&self, method: &Method) -> bool {
        self.method.as_ref().map_or(true, |m| m == method)
    }
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.method {
            Some(method) => write!(f, "{method} ")?,
            None => f.write_str("* ")?,
        }
        write!(f, "{} -> {}", self.path_pattern, self.handler_name)
    }
}

/// Ordered routes plus the options their matcher is built with.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    pub options: MatcherOptions,
    pub routes: Vec<Arc<RouteEntry>>,
}

impl RouteTable {
    #[must_use]
    pub fn new(options: MatcherOptions) -> Self {
        Self {
            options,
            routes: Vec::new(),
        }
    }

    /// Append a route given as a template.
    pub fn push(
        &mut self,
        method: Option<Method>,
        template: &str,
        handler_name: &str,
    ) -> Result<(), BuildError> {
        let pattern = RoutePattern::parse(template)?;
        self.routes.push(Arc::new(RouteEntry {
            method,
            path_pattern: template.to_string(),
            pattern,
            handler_name: handler_name.into(),
        }));
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Compile the table; candidate order follows table order.
    pub fn build_matcher(&self) -> Result<DfaMatcher<Arc<RouteEntry>>, BuildError> {
        let mut builder = MatcherBuilder::new(self.options);
        for route in &self.routes {
            builder.add_endpoint(route.pattern.clone(), Arc::clone(route));
        }
        builder.build()
    }
}
