//! Upstream URL construction
//!
//! The request path is appended to the base URL the way plain string
//! concatenation would (so a base of `https://host/api` keeps its `/api`
//! prefix), but the result is parsed and checked: the path cannot move the
//! request to another scheme, host or port, and cannot climb out of the
//! base's path prefix with `..` segments. Characters that are not allowed in
//! a URL are percent-encoded by the parser.

use url::Url;

use crate::error::{BridgeError, Result};

/// Parse and validate a base URL
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let invalid = |reason: String| BridgeError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not carry a query or fragment".to_string()));
    }

    Ok(url)
}

/// Join `path` onto `base`.
///
/// # Errors
///
/// [`BridgeError::InvalidPath`] when the path is not rooted at `/`, starts
/// with `//`, contains control characters, or resolves outside the base.
pub fn join_path(base: &Url, path: &str) -> Result<Url> {
    if !path.starts_with('/') {
        return Err(BridgeError::invalid_path(path, "must start with '/'"));
    }
    if path.starts_with("//") {
        return Err(BridgeError::invalid_path(path, "must not start with '//'"));
    }
    if path.chars().any(char::is_control) {
        return Err(BridgeError::invalid_path(path, "contains control characters"));
    }

    let prefix = base.as_str().trim_end_matches('/');
    let joined = Url::parse(&format!("{prefix}{path}"))
        .map_err(|e| BridgeError::invalid_path(path, e.to_string()))?;

    if joined.origin() != base.origin() {
        return Err(BridgeError::invalid_path(path, "changes the upstream origin"));
    }

    let base_path = base.path().trim_end_matches('/');
    let inside = joined.path() == base_path
        || joined
            .path()
            .strip_prefix(base_path)
            .is_some_and(|rest| rest.starts_with('/'));
    if !inside {
        return Err(BridgeError::invalid_path(
            path,
            format!("escapes the base path {base_path:?}"),
        ));
    }

    Ok(joined)
}
