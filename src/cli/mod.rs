//! # CLI Module
//!
//! Command-line access to the matcher: compile a route table, look at the automaton, and
//! match paths against it.
//!
//! ## Commands
//!
//! ### `match`
//!
//! Match one or more paths and print the candidates and the selected route:
//!
//! ```bash
//! routedfa match --routes routes.yaml --method POST /account/42 /account
//! ```
//!
//! Options:
//! - `--routes <FILE>` - Route table (YAML or JSON, required)
//! - `--method <METHOD>` - Method used to select a candidate (default: GET)
//! - `--trace` - Also print the states visited
//!
//! ### `inspect`
//!
//! Print the compiled automaton, one state per line with its jump table and candidates:
//!
//! ```bash
//! routedfa inspect --routes routes.yaml
//! ```
//!
//! ### `watch`
//!
//! Hot-reload the route table while matching paths read from stdin, one per line:
//!
//! ```bash
//! tail -f paths.log | routedfa watch --routes routes.yaml
//! ```
//!
//! ## Environment
//!
//! `RDFA_LINEAR_SEARCH_MAX`, `RDFA_TRIE_THRESHOLD` and `RDFA_VECTORIZE` override the table's
//! `options:` (see [`crate::runtime_config`]); `RDFA_LOG_*` configure logging (see
//! [`crate::logging`]).

mod commands;


pub use commands::{execute, run_cli, Cli, Commands};
