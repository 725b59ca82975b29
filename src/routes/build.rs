use anyhow::{anyhow, Context};
use http::Method;

use super::types::{RouteDefinition, RouteTable, RouteTableFile};

const METHODS: [Method; 9] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::OPTIONS,
    Method::HEAD,
    Method::TRACE,
    Method::CONNECT,
];

/// Parse a method name case-insensitively; only the standard verbs are accepted.
pub fn parse_method(name: &str) -> anyhow::Result<Method> {
    let upper = name.trim().to_ascii_uppercase();
    METHODS
        .iter()
        .find(|m| m.as_str() == upper)
        .cloned()
        .ok_or_else(|| anyhow!("unsupported HTTP method '{name}'"))
}

/// Validate every definition and assemble a [`RouteTable`] in file order.
pub fn build_routes(file: RouteTableFile) -> anyhow::Result<RouteTable> {
    let mut table = RouteTable::new(file.options);
    for (index, RouteDefinition { path, method, handler }) in file.routes.iter().enumerate() {
        if handler.trim().is_empty() {
            return Err(anyhow!("route {index} ('{path}') has no handler"));
        }
        let method = method
            .as_deref()
            .map(parse_method)
            .transpose()
            .with_context(|| format!("route {index} ('{path}')"))?;
        table
            .push(method, path, handler)
            .with_context(|| format!("route {index} ('{path}')"))?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(path: &str, method: Option<&str>, handler: &str) -> RouteDefinition {
        RouteDefinition {
            path: path.to_string(),
            method: method.map(str::to_string),
            handler: handler.to_string(),
        }
    }

    #[test]
    fn test_parse_method_is_case_insensitive() {
        assert_eq!(parse_method("get").expect("get"), Method::GET);
        assert_eq!(parse_method(" Patch ").expect("patch"), Method::PATCH);
        assert!(parse_method("BREW").is_err());
    }

    #[test]
    fn test_build_routes_keeps_file_order() {
        let file = RouteTableFile {
            routes: vec![
                definition("/b", Some("GET"), "b"),
                definition("/a", None, "a"),
            ],
            ..RouteTableFile::default()
        };
        let table = build_routes(file).expect("table");
        let handlers: Vec<&str> = table.routes.iter().map(|r| r.handler_name.as_ref()).collect();
        assert_eq!(handlers, vec!["b", "a"]);
        assert_eq!(table.routes[0].method, Some(Method::GET));
        assert_eq!(table.routes[1].method, None);
    }

    #[test]
    fn test_bad_template_names_the_route() {
        let file = RouteTableFile {
            routes: vec![definition("/{*rest}/tail", None, "h")],
            ..RouteTableFile::default()
        };
        let err = build_routes(file).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("route 0"), "{message}");
        assert!(message.contains("catch-all"), "{message}");
    }

    #[test]
    fn test_missing_handler_rejected() {
        let file = RouteTableFile {
            routes: vec![definition("/a", None, " ")],
            ..RouteTableFile::default()
        };
        assert!(build_routes(file).is_err());
    }
}
