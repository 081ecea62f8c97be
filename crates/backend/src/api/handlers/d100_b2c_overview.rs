use axum::{
    extract::{RawQuery, State},
    Json,
};
use chrono::Local;
use contracts::dashboards::d100_b2c_overview::{DashboardRequest, DashboardResponse, FilterOptions};

use crate::dashboards::d100_b2c_overview::service;
use crate::AppState;

/// GET /api/b2c/filters?start=2024-01-01&end=2024-01-31
pub async fn get_filters(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Json<FilterOptions> {
    let request = DashboardRequest::from_query(query.as_deref().unwrap_or(""), Local::now().date_naive());
    let options = service::filter_options(&state.store, request.start, request.end);

    tracing::info!(
        "B2C filters {}..{}: {} brands, {} platforms, {} shops, {} statuses",
        request.start,
        request.end,
        options.brands.len(),
        options.platforms.len(),
        options.shops.len(),
        options.statuses.len()
    );
    Json(options)
}

/// GET /api/b2c/overview?start=..&end=..&brands=..&platforms=..&shops=..&statuses=..
///
/// Filter keys are repeated once per selected value.
pub async fn get_overview(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Json<DashboardResponse> {
    let request = DashboardRequest::from_query(query.as_deref().unwrap_or(""), Local::now().date_naive());
    tracing::info!(
        "B2C overview {}..{} with {} active filters",
        request.start,
        request.end,
        request.filters.active_count()
    );

    let response = service::get_overview(&state.store, &request);
    tracing::info!(
        "B2C overview: {} orders, {} statuses, {} provinces",
        response.kpi.orders,
        response.statuses.len(),
        response.provinces.len()
    );
    Json(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d100_b2c_overview::OrderStore;
    use std::sync::Arc;

    const CSV: &str = "order_id,created_at,brand,platform,shop,status,province,revenue
O1,2024-01-10 09:00:00,Nike,Shopee,Shop A,Đang giao,Hà Nội,100
O2,2024-01-10 10:00:00,Adidas,Tiktok,Shop B,Đã hủy,Huế,50
O3,2024-01-11 11:00:00,Nike,Tiktok,Shop B,Đang giao,Huế,70
";

    fn state() -> AppState {
        let (store, _) = OrderStore::from_csv_str(CSV).unwrap();
        AppState {
            store: Arc::new(store),
        }
    }

    #[tokio::test]
    async fn test_overview_applies_repeated_filter_keys() {
        let query = "start=2024-01-10&end=2024-01-11&statuses=%C4%90ang+giao&brands=Nike";
        let Json(response) = get_overview(State(state()), RawQuery(Some(query.to_string()))).await;

        assert_eq!(response.start, "2024-01-10");
        assert_eq!(response.end, "2024-01-11");
        assert_eq!(response.kpi.orders, 2);
        assert_eq!(response.kpi.revenue, 170.0);
    }

    #[tokio::test]
    async fn test_filters_cover_the_period() {
        let query = "start=2024-01-10&end=2024-01-10";
        let Json(options) = get_filters(State(state()), RawQuery(Some(query.to_string()))).await;

        assert_eq!(options.brands, vec!["Adidas", "Nike"]);
        assert_eq!(options.shops, vec!["Shop A", "Shop B"]);
        assert_eq!(options.statuses.len(), 2);
    }
}
