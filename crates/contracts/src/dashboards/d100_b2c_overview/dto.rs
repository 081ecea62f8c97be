use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::filter_key::{FilterKey, FilterSet, UrlFilterState};

/// Dashboard request resolved from the page URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardRequest {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub filters: FilterSet,
}

impl DashboardRequest {
    /// Build a request from a raw query string.
    ///
    /// A missing or unparsable `start`/`end` resets the period to `today`
    /// for both ends. A reversed range is swapped.
    pub fn from_query(query: &str, today: NaiveDate) -> Self {
        let state = UrlFilterState::parse(query);
        let start = state.start.as_deref().and_then(parse_iso_date);
        let end = state.end.as_deref().and_then(parse_iso_date);

        let (start, end) = match (start, end) {
            (Some(s), Some(e)) if s <= e => (s, e),
            (Some(s), Some(e)) => (e, s),
            _ => (today, today),
        };

        Self {
            start,
            end,
            filters: state.filters,
        }
    }

    /// Period of the same length that ends the day before `start`.
    ///
    /// None when that period falls outside the calendar range.
    pub fn previous_period(&self) -> Option<(NaiveDate, NaiveDate)> {
        let length = self.end.signed_duration_since(self.start);
        let prev_end = self.start.checked_sub_signed(Duration::days(1))?;
        let prev_start = prev_end.checked_sub_signed(length)?;
        Some((prev_start, prev_end))
    }
}

pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Distinct values available for each filter widget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub brands: Vec<String>,
    pub platforms: Vec<String>,
    pub shops: Vec<String>,
    pub statuses: Vec<String>,
}

impl FilterOptions {
    pub fn get(&self, key: FilterKey) -> &[String] {
        match key {
            FilterKey::Brands => &self.brands,
            FilterKey::Platforms => &self.platforms,
            FilterKey::Shops => &self.shops,
            FilterKey::Statuses => &self.statuses,
        }
    }
}

/// Headline numbers with growth against the previous period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub revenue: f64,
    pub orders: u64,
    /// Average order value
    pub aov: f64,
    /// None when the previous period had no revenue
    pub revenue_growth_pct: Option<f64>,
    pub orders_growth_pct: Option<f64>,
}

/// Data for the dual-axis hourly trend chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyTrend {
    /// "0:00" .. "23:00"
    pub hours: Vec<String>,
    pub revenue: Vec<f64>,
    pub orders: Vec<u64>,
}

/// One slice of the status donut
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSlice {
    pub name: String,
    pub orders: u64,
}

/// One province record for the choropleth map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvinceOrders {
    #[serde(rename = "provinceName")]
    pub province_name: String,
    #[serde(rename = "orderCount")]
    pub order_count: u64,
    pub revenue: f64,
}

/// Category/series pairs for stacked bar charts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorySeries {
    pub categories: Vec<String>,
    pub series: Vec<SeriesData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesData {
    pub name: String,
    pub data: Vec<f64>,
}

/// One row of the brand performance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandPerformanceRow {
    pub brand: String,
    pub revenue: f64,
    pub orders: u64,
    /// 100 when the brand is new in this period
    pub revenue_growth_pct: f64,
    pub orders_growth_pct: f64,
}

/// Grand total row; growth is 0 when the previous period was empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandPerformanceTotal {
    pub revenue: f64,
    pub orders: u64,
    pub revenue_growth_pct: f64,
    pub orders_growth_pct: f64,
}

/// Brand table, revenue pie and the bar scale for both columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandPerformance {
    pub brands: Vec<BrandPerformanceRow>,
    pub total: BrandPerformanceTotal,
    /// Largest brand revenue, at least 1
    pub max_revenue: f64,
    /// Largest brand order count, at least 1
    pub max_orders: u64,
}

impl Default for BrandPerformance {
    fn default() -> Self {
        Self {
            brands: Vec::new(),
            total: BrandPerformanceTotal::default(),
            max_revenue: 1.0,
            max_orders: 1,
        }
    }
}

/// Response of GET /api/b2c/overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// Resolved period start, YYYY-MM-DD
    pub start: String,
    /// Resolved period end, YYYY-MM-DD
    pub end: String,
    pub kpi: KpiSummary,
    pub hourly: HourlyTrend,
    pub statuses: Vec<StatusSlice>,
    pub provinces: Vec<ProvinceOrders>,
    pub brand_platform: CategorySeries,
    pub brand_performance: BrandPerformance,
}
