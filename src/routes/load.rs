use anyhow::Context;
use std::path::Path;
use tracing::info;

use super::build::build_routes;
use super::types::{RouteTable, RouteTableFile};
use crate::runtime_config::RuntimeConfig;

/// Serialization format of a route table file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Yaml,
    Json,
}

impl TableFormat {
    /// YAML for `.yaml`/`.yml`, JSON otherwise.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                TableFormat::Yaml
            }
            _ => TableFormat::Json,
        }
    }
}

/// Parse route table text in the given format.
pub fn parse_route_table(content: &str, format: TableFormat) -> anyhow::Result<RouteTable> {
    let file: RouteTableFile = match format {
        TableFormat::Yaml => serde_yaml::from_str(content)?,
        TableFormat::Json => serde_json::from_str(content)?,
    };
    build_routes(file)
}

/// Read and validate a route table file.
///
/// `RDFA_*` environment overrides ([`RuntimeConfig`]) are applied on top of the file's
/// `options:` block.
pub fn load_route_table(path: impl AsRef<Path>) -> anyhow::Result<RouteTable> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading route table {}", path.display()))?;
    let mut table = parse_route_table(&content, TableFormat::from_path(path))
        .with_context(|| format!("parsing route table {}", path.display()))?;
    RuntimeConfig::from_env().apply(&mut table.options);
    info!(
        path = %path.display(),
        routes_count = table.len(),
        options = ?table.options,
        "Route table loaded"
    );
    Ok(table)
}
