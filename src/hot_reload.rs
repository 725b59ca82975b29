//! # Hot Reload Module
//!
//! Live reloading of route table files without restarting the service.
//!
//! ## Overview
//!
//! [`watch_route_table`] watches a route table file and, on every modify/create event:
//! - Reloads and validates the table
//! - Compiles a new automaton
//! - Publishes it through [`Router::swap`]
//! - Calls a reload hook with the new table
//!
//! ## Usage
//!
//! ```rust,ignore
//! use routedfa::hot_reload::watch_route_table;
//! use routedfa::router::Router;
//! use std::sync::Arc;
//!
//! let table = routedfa::routes::load_route_table("routes.yaml")?;
//! let router = Arc::new(Router::new(&table)?);
//!
//! let watcher = watch_route_table("routes.yaml", Arc::clone(&router), |table| {
//!     println!("Reloaded {} routes", table.len());
//! })?;
//!
//! // Keep watcher alive for as long as reloads should happen
//! ```
//!
//! ## Error Handling
//!
//! If the new file fails to parse or compile:
//! - The error is logged
//! - The previous automaton remains active
//! - The hook is not called
//!
//! Saving a half-edited file therefore never takes routes offline.
//!
//! ## Performance
//!
//! Compilation happens on the watcher thread. Readers are never blocked: in-flight matches
//! finish on the snapshot they loaded and later ones see the new automaton.

use crate::{
    router::Router,
    routes::{self, RouteTable},
};
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Reload `path`, rebuild the automaton, and publish it on `router`.
///
/// Returns the new table, or the load/compile error after logging it.
pub fn reload_route_table(path: &Path, router: &Router) -> anyhow::Result<RouteTable> {
    let result = routes::load_route_table(path).and_then(|table| {
        let matcher = table.build_matcher()?;
        Ok((table, matcher))
    });
    match result {
        Ok((table, matcher)) => {
            let states = matcher.state_count();
            router.swap(matcher);
            info!(
                path = %path.display(),
                routes_count = table.len(),
                states,
                "hot-reload: route table applied"
            );
            Ok(table)
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %format!("{e:#}"),
                "hot-reload: rejected route table, keeping previous routes"
            );
            Err(e)
        }
    }
}

/// Watch a route table file and rebuild the [`Router`] when it changes.
///
/// The provided callback receives each successfully applied table.
pub fn watch_route_table<P, F>(
    table_path: P,
    router: Arc<Router>,
    mut on_reload: F,
) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
    F: FnMut(&RouteTable) + Send + 'static,
{
    let path: PathBuf = table_path.as_ref().to_path_buf();
    let watch_path = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    if let Ok(table) = reload_route_table(&watch_path, &router) {
                        on_reload(&table);
                    }
                }
            }
            Err(e) => warn!(error = ?e, "hot-reload: watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}
