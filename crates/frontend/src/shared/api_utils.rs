//! URL helpers for calls to the dashboard backend
//!
//! The backend serves both the wasm bundle and the API, so requests go to the
//! page's own origin.

/// Origin of the current page, e.g. "http://localhost:3000"
///
/// Empty when no window is available, which turns every API URL into a
/// relative one.
pub fn api_base() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Full API URL for a path starting with "/api/"
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/b2c/filters?start=2024-01-01");
/// ```
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
