#![deny(missing_docs)]

//! # Route Matching
//!
//! Maps OpenAPI path templates onto Mockoon endpoints and finds the route
//! serving a given operation.

use crate::mockoon::Route;
use regex::Regex;
use std::sync::OnceLock;

/// Converts an OpenAPI path template into a Mockoon endpoint.
///
/// Leading slashes are stripped and `{param}` segments become `:param`.
/// e.g. `/users/{id}` -> `users/:id`
pub fn normalize_path(path: &str) -> String {
    static PARAM_RE: OnceLock<Regex> = OnceLock::new();
    let param_re = PARAM_RE.get_or_init(|| Regex::new(r"\{([^}]+)\}").expect("Invalid regex"));

    param_re
        .replace_all(path.trim_start_matches('/'), ":${1}")
        .into_owned()
}

/// Finds the first route whose endpoint equals `endpoint` and whose method equals
/// the lower-cased `method`.
pub fn find_route<'a>(
    routes: &'a mut [Route],
    method: &str,
    endpoint: &str,
) -> Option<&'a mut Route> {
    let method = method.to_lowercase();
    routes
        .iter_mut()
        .find(|route| route.method == method && route.endpoint == endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(method: &str, endpoint: &str) -> Route {
        Route {
            method: method.into(),
            endpoint: endpoint.into(),
            ..Route::default()
        }
    }

    #[test]
    fn test_normalize_single_param() {
        assert_eq!(normalize_path("/users/{id}"), "users/:id");
    }

    #[test]
    fn test_normalize_multiple_params() {
        assert_eq!(normalize_path("/a/{b}/c/{d}"), "a/:b/c/:d");
    }

    #[test]
    fn test_normalize_strips_all_leading_slashes() {
        assert_eq!(normalize_path("//health"), "health");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        assert_eq!(normalize_path("users/list"), "users/list");
        assert_eq!(normalize_path(&normalize_path("/users/{id}")), "users/:id");
    }

    #[test]
    fn test_normalize_param_inside_segment() {
        assert_eq!(normalize_path("/files/{name}.{ext}"), "files/:name.:ext");
    }

    #[test]
    fn test_find_route_by_method_and_endpoint() {
        let mut routes = vec![
            route("get", "users"),
            route("post", "users/:id"),
            route("get", "users/:id"),
        ];
        let found = find_route(&mut routes, "GET", "users/:id").unwrap();
        assert_eq!(found.method, "get");
        assert_eq!(found.endpoint, "users/:id");
    }

    #[test]
    fn test_find_route_returns_first_match() {
        let mut routes = vec![route("get", "a"), route("get", "a")];
        routes[1].extra.insert("uuid".into(), "second".into());
        let found = find_route(&mut routes, "get", "a").unwrap();
        assert!(found.extra.is_empty());
    }

    #[test]
    fn test_find_route_none() {
        let mut routes = vec![route("get", "users")];
        assert!(find_route(&mut routes, "delete", "users").is_none());
        assert!(find_route(&mut routes, "get", "/users").is_none());
    }
}
