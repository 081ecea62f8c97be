use contracts::dashboards::d100_b2c_overview::{DashboardResponse, FilterOptions};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

const API_BASE: &str = "/api/b2c";

/// Options for the four filter widgets within the URL's period
pub async fn get_filter_options(search: &str) -> Result<FilterOptions, String> {
    let url = api_url(&format!("{}/filters{}", API_BASE, query_suffix(search)));

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Aggregated dashboard data for the URL's period and filters
pub async fn get_overview(search: &str) -> Result<DashboardResponse, String> {
    let url = api_url(&format!("{}/overview{}", API_BASE, query_suffix(search)));

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// The page query string is forwarded to the API unchanged
fn query_suffix(search: &str) -> String {
    let query = search.trim_start_matches('?');
    if query.is_empty() {
        String::new()
    } else {
        format!("?{}", query)
    }
}
