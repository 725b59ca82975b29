//! # routedfa
//!
//! **routedfa** is a request-path route-matching engine: it compiles a table of route
//! templates into a deterministic automaton that is walked one path segment at a time, so
//! matching cost depends on path depth, not on how many routes are registered.
//!
//! ## Overview
//!
//! Each automaton state owns a *jump table* mapping the next segment's text to the next
//! state. The jump-table variant is picked per state by how many literal edges it has,
//! from a plain comparison up to a compiled trie whose leaves use a chunked (SWAR)
//! case-insensitive comparator. A walk never backtracks and never allocates for paths up to
//! 32 segments.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`matching`]** - Tokenizer, jump tables, builder and the DFA itself
//! - **[`routes`]** - Route tables and their YAML/JSON file format
//! - **[`router`]** - Hosts an automaton behind an atomic swap and selects routes by method
//! - **[`hot_reload`]** - Rebuilds the router when the route table file changes
//! - **[`runtime_config`]** - Environment overrides for the jump-table cost model
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `routedfa` command-line tool
//!
//! ### Request Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Router
//!     participant Dfa as DfaMatcher
//!     participant Table as JumpTable
//!
//!     Caller->>Router: route(GET, "/product/5")
//!     Router->>Dfa: match_path("/product/5")
//!     Dfa->>Dfa: tokenize into ["product", "5"]
//!     Dfa->>Table: state 0: destination("product")
//!     Table-->>Dfa: state 1
//!     Dfa->>Table: state 1: destination("5")
//!     Table-->>Dfa: default (parameter) state
//!     Dfa-->>Router: candidates [GET /product/{id}]
//!     Router-->>Caller: RouteMatch { handler, id = "5" }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use http::Method;
//! use routedfa::router::Router;
//! use routedfa::routes::{parse_route_table, TableFormat};
//!
//! let table = parse_route_table(
//!     r#"
//! routes:
//!   - { path: /product, method: GET, handler: list_products }
//!   - { path: "/product/{id}", method: GET, handler: get_product }
//!   - { path: "/static/{*file}", handler: assets }
//! "#,
//!     TableFormat::Yaml,
//! )
//! .unwrap();
//! let router = Router::new(&table).unwrap();
//!
//! let m = router.route(Method::GET, "/PRODUCT/5").unwrap();
//! assert_eq!(m.handler_name.as_ref(), "get_product");
//! assert_eq!(m.get_path_param("id"), Some("5"));
//!
//! let m = router.route(Method::GET, "/static/css/site.css").unwrap();
//! assert_eq!(m.get_path_param("file"), Some("css/site.css"));
//!
//! assert!(router.route(Method::GET, "/product/5/6").is_none());
//! ```
//!
//! ## Matching Rules
//!
//! - Literal segments compare ASCII case-insensitively; other bytes compare exactly
//! - Parameters match any non-empty segment
//! - Catch-alls match the rest of the path, including nothing
//! - An empty segment (`//` or a trailing `/`) only continues through a catch-all, or ends
//!   the path at the current state (`/product/` matches `/product`)
//! - When several routes reach the same state they are all candidates, in table order
//!
//! ## Configuration
//!
//! The jump-table cost model is set in the route table file and can be overridden from the
//! environment:
//!
//! ```yaml
//! options:
//!   linear_search_max: 4   # up to this many literals: linear scan
//!   trie_threshold: 32     # from this many literals: compiled trie (null disables)
//!   vectorize: auto        # auto | always | never
//! ```
//!
//! ```bash
//! export RDFA_TRIE_THRESHOLD=off
//! export RDFA_LOG_LEVEL=debug RDFA_LOG_FORMAT=pretty
//! ```

pub mod cli;
pub mod hot_reload;
pub mod logging;
pub mod matching;
pub mod router;
pub mod routes;
pub mod runtime_config;

pub use matching::{DfaMatcher, MatcherBuilder, MatcherOptions, RoutePattern, SegmentRequirement};
pub use router::{RouteMatch, Router};
pub use routes::{load_route_table, RouteEntry, RouteTable};
