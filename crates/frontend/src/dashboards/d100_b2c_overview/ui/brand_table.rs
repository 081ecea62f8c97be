use contracts::dashboards::d100_b2c_overview::BrandPerformance;
use leptos::prelude::*;

use crate::dashboards::d100_b2c_overview::charts::BRAND_PIE_CHART_ID;
use crate::shared::components::kpi_card::{format_money, format_thousands, growth_class};

/// Bar width in percent of the column maximum
fn bar_width(value: f64, max: f64) -> String {
    let pct = if max > 0.0 {
        (value / max * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };
    format!("width: {:.1}%", pct)
}

fn growth_view(pct: f64) -> impl IntoView {
    let (arrow, cls) = growth_class(pct);
    view! { <span class=cls>{format!("{}{:.1}%", arrow, pct.abs())}</span> }
}

/// Brand performance table with inline bars, next to the brand revenue donut
#[component]
pub fn BrandPerformanceTable(#[prop(into)] data: Signal<Option<BrandPerformance>>) -> impl IntoView {
    let rows = move || {
        data.get().map(|perf| {
            let max_revenue = perf.max_revenue;
            let max_orders = perf.max_orders as f64;
            let total = perf.total.clone();
            view! {
                <tbody>
                    {perf
                        .brands
                        .into_iter()
                        .map(|row| {
                            view! {
                                <tr>
                                    <td>{row.brand}</td>
                                    <td>
                                        <div class="brand-table__bar brand-table__bar--revenue"
                                            style=bar_width(row.revenue, max_revenue)></div>
                                        {format_money(row.revenue)}
                                        {growth_view(row.revenue_growth_pct)}
                                    </td>
                                    <td>
                                        <div class="brand-table__bar brand-table__bar--orders"
                                            style=bar_width(row.orders as f64, max_orders)></div>
                                        {format_thousands(row.orders as i64)}
                                        {growth_view(row.orders_growth_pct)}
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()}
                    <tr class="brand-table__total">
                        <td>"Tổng"</td>
                        <td>{format_money(total.revenue)} {growth_view(total.revenue_growth_pct)}</td>
                        <td>
                            {format_thousands(total.orders as i64)}
                            {growth_view(total.orders_growth_pct)}
                        </td>
                    </tr>
                </tbody>
            }
        })
    };

    view! {
        <div class="brand-performance">
            <table class="brand-table">
                <thead>
                    <tr>
                        <th>"Brand"</th>
                        <th>"Doanh thu"</th>
                        <th>"Đơn hàng"</th>
                    </tr>
                </thead>
                {rows}
            </table>
            <div id=BRAND_PIE_CHART_ID class="b2c-dashboard__chart"></div>
        </div>
    }
}
