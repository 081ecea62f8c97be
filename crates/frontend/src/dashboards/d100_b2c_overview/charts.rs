//! Hands dashboard payloads to the page's chart library (`window.ChartFactory`
//! and `window.initVietnamMap`). All visual decisions live on the JS side.

use contracts::dashboards::d100_b2c_overview::DashboardResponse;
use js_sys::{Function, Reflect};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::{JsCast, JsValue};

use crate::shared::components::kpi_card::format_money;

pub const HOURLY_CHART_ID: &str = "hourlyTrendChart";
pub const STATUS_CHART_ID: &str = "statusPieChart";
pub const BRAND_PLATFORM_CHART_ID: &str = "brandPlatformChart";
pub const BRAND_PIE_CHART_ID: &str = "brandPerformancePie";

/// Donut point as the chart library expects it
#[derive(Debug, Serialize, PartialEq)]
struct DonutPoint<'a> {
    name: &'a str,
    y: f64,
}

pub fn render_charts(data: &DashboardResponse) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let factory = match Reflect::get(&window, &JsValue::from_str("ChartFactory")) {
        Ok(factory) if factory.is_object() => Some(factory),
        _ => {
            log::warn!("ChartFactory not found, skipping charts");
            None
        }
    };

    if let Some(factory) = factory.as_ref() {
        if !data.hourly.hours.is_empty() {
            call_chart(factory, "createDualLine", HOURLY_CHART_ID, &data.hourly, None);
        }

        let points = donut_points(data);
        if !points.is_empty() {
            call_chart(factory, "createDonut", STATUS_CHART_ID, &points, None);
        }

        if !data.brand_platform.categories.is_empty() {
            call_chart(
                factory,
                "createStackedBar",
                BRAND_PLATFORM_CHART_ID,
                &data.brand_platform,
                None,
            );
        }

        let brand_points = brand_pie_points(data);
        if !brand_points.is_empty() {
            // Center label of the donut
            let total = format_money(data.brand_performance.total.revenue);
            call_chart(
                factory,
                "createPerfDonut",
                BRAND_PIE_CHART_ID,
                &brand_points,
                Some(&total),
            );
        }
    }

    match Reflect::get(&window, &JsValue::from_str("initVietnamMap")) {
        Ok(init_map) if init_map.is_function() => {
            let result = to_js(&data.provinces).and_then(|records| {
                let init_map: Function = init_map.dyn_into()?;
                init_map.call1(&JsValue::NULL, &records)
            });
            if let Err(err) = result {
                log::error!("Failed to render province map: {:?}", err);
            }
        }
        _ => log::warn!("initVietnamMap function not found"),
    }
}

fn donut_points(data: &DashboardResponse) -> Vec<DonutPoint<'_>> {
    data.statuses
        .iter()
        .map(|slice| DonutPoint {
            name: if slice.name.is_empty() {
                "Unknown"
            } else {
                slice.name.as_str()
            },
            y: slice.orders as f64,
        })
        .collect()
}

fn brand_pie_points(data: &DashboardResponse) -> Vec<DonutPoint<'_>> {
    data.brand_performance
        .brands
        .iter()
        .map(|row| DonutPoint {
            name: row.brand.as_str(),
            y: row.revenue,
        })
        .collect()
}

fn call_chart<T: Serialize>(
    factory: &JsValue,
    method: &str,
    container_id: &str,
    payload: &T,
    label: Option<&str>,
) {
    let result = to_js(payload).and_then(|payload| {
        let create: Function = Reflect::get(factory, &JsValue::from_str(method))?.dyn_into()?;
        let container = JsValue::from_str(container_id);
        match label {
            Some(label) => create.call3(factory, &container, &payload, &JsValue::from_str(label)),
            None => create.call2(factory, &container, &payload),
        }
    });
    if let Err(err) = result {
        log::error!("ChartFactory.{} failed for #{}: {:?}", method, container_id, err);
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d100_b2c_overview::{
        BrandPerformance, BrandPerformanceRow, CategorySeries, HourlyTrend, KpiSummary,
        StatusSlice,
    };

    fn empty_response() -> DashboardResponse {
        DashboardResponse {
            start: "2024-01-01".to_string(),
            end: "2024-01-01".to_string(),
            kpi: KpiSummary::default(),
            hourly: HourlyTrend::default(),
            statuses: vec![],
            provinces: vec![],
            brand_platform: CategorySeries::default(),
            brand_performance: BrandPerformance::default(),
        }
    }

    #[test]
    fn test_donut_points_name_unknown_status() {
        let data = DashboardResponse {
            statuses: vec![
                StatusSlice {
                    name: "Đang giao".to_string(),
                    orders: 4,
                },
                StatusSlice {
                    name: String::new(),
                    orders: 1,
                },
            ],
            ..empty_response()
        };

        assert_eq!(
            donut_points(&data),
            vec![
                DonutPoint {
                    name: "Đang giao",
                    y: 4.0
                },
                DonutPoint {
                    name: "Unknown",
                    y: 1.0
                },
            ]
        );
    }

    #[test]
    fn test_brand_pie_uses_revenue_per_brand() {
        let mut data = empty_response();
        data.brand_performance.brands = vec![BrandPerformanceRow {
            brand: "Nike".to_string(),
            revenue: 500.0,
            orders: 2,
            revenue_growth_pct: 100.0,
            orders_growth_pct: 100.0,
        }];

        assert_eq!(
            brand_pie_points(&data),
            vec![DonutPoint {
                name: "Nike",
                y: 500.0
            }]
        );
        assert!(brand_pie_points(&empty_response()).is_empty());
    }
}
