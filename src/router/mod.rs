//! # Router Module
//!
//! The router module hosts a compiled route-matching automaton and performs the simplest
//! useful endpoint selection on top of it: the first candidate whose HTTP method matches.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling a [`RouteTable`](crate::routes::RouteTable) into a [`RouteMatcher`]
//! - Matching incoming requests and selecting a route by method
//! - Extracting path parameters from the matched route
//! - Publishing rebuilt automata without blocking readers
//!
//! ## Architecture
//!
//! 1. **Compilation**: route templates (e.g., `/pets/{id}`) are compiled once into a DFA
//!    with one jump table per state (see [`crate::matching`]).
//!
//! 2. **Matching**: for each request the router loads the current automaton snapshot, walks
//!    it one segment at a time, and picks a candidate; parameter values are slices of the
//!    request path.
//!
//! 3. **Reload**: [`Router::replace`] compiles a new table and swaps it in atomically;
//!    requests already matching keep the snapshot they started with.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use routedfa::router::Router;
//! use routedfa::routes::RouteTable;
//!
//! let mut table = RouteTable::default();
//! table.push(Some(Method::GET), "/pets/{id}", "get_pet").unwrap();
//! let router = Router::new(&table).unwrap();
//!
//! let m = router.route(Method::GET, "/pets/123").unwrap();
//! assert_eq!(m.handler_name.as_ref(), "get_pet");
//! assert_eq!(m.get_path_param("id"), Some("123"));
//! ```

mod core;

pub use core::{RouteMatch, RouteMatcher, Router};
