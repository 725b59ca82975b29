//! # Routes Module
//!
//! Route tables: the list of `(method, template, handler)` entries a [`crate::router::Router`]
//! serves, plus the options its matcher is compiled with. Tables are usually loaded from a
//! YAML or JSON file:
//!
//! ```yaml
//! options:
//!   linear_search_max: 4
//!   trie_threshold: 32
//!   vectorize: auto
//! routes:
//!   - { path: /product, method: GET, handler: list_products }
//!   - { path: "/product/{id}", method: GET, handler: get_product }
//!   - { path: "/static/{*file}", handler: serve_static }
//! ```
//!
//! Entries keep file order; that order is the candidate order the matcher reports.

mod build;
mod load;
mod types;

pub use build::*;
pub use load::*;
pub use types::*;
