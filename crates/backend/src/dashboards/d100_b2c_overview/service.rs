use chrono::{NaiveDate, Timelike};
use contracts::dashboards::d100_b2c_overview::{
    BrandPerformance, BrandPerformanceRow, BrandPerformanceTotal, CategorySeries,
    DashboardRequest, DashboardResponse, FilterKey, FilterOptions, FilterSet, HourlyTrend,
    KpiSummary, ProvinceOrders, SeriesData, StatusSlice,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::store::{OrderRecord, OrderStore};

/// Number of provinces returned for the map
pub const TOP_PROVINCES: usize = 20;

fn field(order: &OrderRecord, key: FilterKey) -> &str {
    match key {
        FilterKey::Brands => &order.brand,
        FilterKey::Platforms => &order.platform,
        FilterKey::Shops => &order.shop,
        FilterKey::Statuses => &order.status,
    }
}

/// An empty selection does not restrict its key
pub fn matches_filters(order: &OrderRecord, filters: &FilterSet) -> bool {
    FilterKey::ALL.iter().all(|key| {
        let selection = filters.get(*key);
        selection.is_empty() || selection.contains(field(order, *key))
    })
}

fn filtered<'a>(
    store: &'a OrderStore,
    start: NaiveDate,
    end: NaiveDate,
    filters: &'a FilterSet,
) -> Vec<&'a OrderRecord> {
    store
        .in_period(start, end)
        .filter(|order| matches_filters(order, filters))
        .collect()
}

/// Distinct, sorted values for every filter widget within the period
pub fn filter_options(store: &OrderStore, start: NaiveDate, end: NaiveDate) -> FilterOptions {
    let mut sets: HashMap<FilterKey, BTreeSet<&str>> = HashMap::new();
    for order in store.in_period(start, end) {
        for key in FilterKey::ALL {
            let value = field(order, key);
            if !value.is_empty() {
                sets.entry(key).or_default().insert(value);
            }
        }
    }

    let mut take = |key: FilterKey| -> Vec<String> {
        sets.remove(&key)
            .map(|set| set.into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    };

    FilterOptions {
        brands: take(FilterKey::Brands),
        platforms: take(FilterKey::Platforms),
        shops: take(FilterKey::Shops),
        statuses: take(FilterKey::Statuses),
    }
}

fn growth_pct(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        None
    } else {
        Some((current - previous) / previous * 100.0)
    }
}

pub fn kpi_summary(current: &[&OrderRecord], previous: &[&OrderRecord]) -> KpiSummary {
    let revenue: f64 = current.iter().map(|o| o.revenue).sum();
    let orders = current.len() as u64;
    let prev_revenue: f64 = previous.iter().map(|o| o.revenue).sum();
    let prev_orders = previous.len() as f64;

    KpiSummary {
        revenue,
        orders,
        aov: if orders > 0 {
            revenue / orders as f64
        } else {
            0.0
        },
        revenue_growth_pct: growth_pct(revenue, prev_revenue),
        orders_growth_pct: growth_pct(orders as f64, prev_orders),
    }
}

/// Revenue and order counts in 24 hourly buckets
pub fn hourly_trend(orders: &[&OrderRecord]) -> HourlyTrend {
    let mut revenue = vec![0.0; 24];
    let mut counts = vec![0u64; 24];
    for order in orders {
        let hour = order.created_at.hour() as usize;
        revenue[hour] += order.revenue;
        counts[hour] += 1;
    }
    HourlyTrend {
        hours: (0..24).map(|h| format!("{}:00", h)).collect(),
        revenue,
        orders: counts,
    }
}

/// Orders per status, largest first
pub fn status_breakdown(orders: &[&OrderRecord]) -> Vec<StatusSlice> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for order in orders {
        *counts.entry(order.status.as_str()).or_insert(0) += 1;
    }
    let mut slices: Vec<StatusSlice> = counts
        .into_iter()
        .map(|(name, orders)| StatusSlice {
            name: name.to_string(),
            orders,
        })
        .collect();
    // Stable sort keeps name order for equal counts
    slices.sort_by(|a, b| b.orders.cmp(&a.orders));
    slices
}

/// Provinces ranked by order count, at most `limit`
pub fn top_provinces(orders: &[&OrderRecord], limit: usize) -> Vec<ProvinceOrders> {
    let mut totals: BTreeMap<&str, (u64, f64)> = BTreeMap::new();
    for order in orders {
        if order.province.is_empty() {
            continue;
        }
        let entry = totals.entry(order.province.as_str()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += order.revenue;
    }
    let mut provinces: Vec<ProvinceOrders> = totals
        .into_iter()
        .map(|(name, (count, revenue))| ProvinceOrders {
            province_name: name.to_string(),
            order_count: count,
            revenue,
        })
        .collect();
    provinces.sort_by(|a, b| b.order_count.cmp(&a.order_count));
    provinces.truncate(limit);
    provinces
}

/// Revenue per brand (categories, by total revenue desc) split by platform
pub fn brand_platform_revenue(orders: &[&OrderRecord]) -> CategorySeries {
    let mut brand_totals: HashMap<&str, f64> = HashMap::new();
    let mut platforms: BTreeSet<&str> = BTreeSet::new();
    let mut cells: HashMap<(&str, &str), f64> = HashMap::new();

    for order in orders {
        *brand_totals.entry(order.brand.as_str()).or_insert(0.0) += order.revenue;
        platforms.insert(order.platform.as_str());
        *cells
            .entry((order.brand.as_str(), order.platform.as_str()))
            .or_insert(0.0) += order.revenue;
    }

    let mut brands: Vec<(&str, f64)> = brand_totals.into_iter().collect();
    brands.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let categories: Vec<&str> = brands.into_iter().map(|(brand, _)| brand).collect();

    let series = platforms
        .into_iter()
        .map(|platform| SeriesData {
            name: platform.to_string(),
            data: categories
                .iter()
                .map(|brand| cells.get(&(*brand, platform)).copied().unwrap_or(0.0))
                .collect(),
        })
        .collect();

    CategorySeries {
        categories: categories.into_iter().map(str::to_string).collect(),
        series,
    }
}

/// Growth used by the brand table: a brand with no previous revenue but
/// current revenue counts as +100%
fn brand_growth_pct(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else if current > 0.0 {
        100.0
    } else {
        0.0
    }
}

fn total_growth_pct(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    }
}

#[derive(Default)]
struct BrandTotals {
    revenue: f64,
    orders: u64,
    prev_revenue: f64,
    prev_orders: u64,
}

/// Per-brand revenue and orders against the previous period, largest revenue first.
/// Only brands sold in the current period are listed.
pub fn brand_performance(current: &[&OrderRecord], previous: &[&OrderRecord]) -> BrandPerformance {
    let mut totals: HashMap<&str, BrandTotals> = HashMap::new();
    for order in current {
        let entry = totals.entry(order.brand.as_str()).or_default();
        entry.revenue += order.revenue;
        entry.orders += 1;
    }
    for order in previous {
        if let Some(entry) = totals.get_mut(order.brand.as_str()) {
            entry.prev_revenue += order.revenue;
            entry.prev_orders += 1;
        }
    }

    let mut ranked: Vec<(&str, BrandTotals)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.revenue.total_cmp(&a.1.revenue).then_with(|| a.0.cmp(b.0)));

    let mut sum = BrandTotals::default();
    let mut performance = BrandPerformance::default();
    for (brand, t) in ranked {
        sum.revenue += t.revenue;
        sum.orders += t.orders;
        sum.prev_revenue += t.prev_revenue;
        sum.prev_orders += t.prev_orders;
        performance.max_revenue = performance.max_revenue.max(t.revenue);
        performance.max_orders = performance.max_orders.max(t.orders);

        performance.brands.push(BrandPerformanceRow {
            brand: (if brand.is_empty() { "Unknown" } else { brand }).to_string(),
            revenue: t.revenue,
            orders: t.orders,
            revenue_growth_pct: brand_growth_pct(t.revenue, t.prev_revenue),
            orders_growth_pct: brand_growth_pct(t.orders as f64, t.prev_orders as f64),
        });
    }

    performance.total = BrandPerformanceTotal {
        revenue: sum.revenue,
        orders: sum.orders,
        revenue_growth_pct: total_growth_pct(sum.revenue, sum.prev_revenue),
        orders_growth_pct: total_growth_pct(sum.orders as f64, sum.prev_orders as f64),
    };
    performance
}

pub fn get_overview(store: &OrderStore, request: &DashboardRequest) -> DashboardResponse {
    let current = filtered(store, request.start, request.end, &request.filters);
    let previous = match request.previous_period() {
        Some((prev_start, prev_end)) => filtered(store, prev_start, prev_end, &request.filters),
        None => {
            tracing::warn!(
                "No previous period before {}, growth is not compared",
                request.start
            );
            Vec::new()
        }
    };

    DashboardResponse {
        start: request.start.format("%Y-%m-%d").to_string(),
        end: request.end.format("%Y-%m-%d").to_string(),
        kpi: kpi_summary(&current, &previous),
        hourly: hourly_trend(&current),
        statuses: status_breakdown(&current),
        provinces: top_provinces(&current, TOP_PROVINCES),
        brand_platform: brand_platform_revenue(&current),
        brand_performance: brand_performance(&current, &previous),
    }
}
