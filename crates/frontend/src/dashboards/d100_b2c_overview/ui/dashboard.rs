use contracts::dashboards::d100_b2c_overview::{DashboardResponse, FilterOptions};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::brand_table::BrandPerformanceTable;
use super::filter_bar::FilterBar;
use crate::dashboards::d100_b2c_overview::api;
use crate::dashboards::d100_b2c_overview::browser::{LocationNavigator, VirtualSelectWidget};
use crate::dashboards::d100_b2c_overview::charts::{
    self, BRAND_PLATFORM_CHART_ID, HOURLY_CHART_ID, STATUS_CHART_ID,
};
use crate::dashboards::d100_b2c_overview::controller::{
    ControllerPhase, FilterStateController, FilterWidgets, Navigator,
};
use crate::shared::components::kpi_card::{KpiCard, KpiFormat};

type PageController = FilterStateController<VirtualSelectWidget, LocationNavigator>;

/// B2C overview: filters, KPI cards and charts for the period in the URL
#[component]
pub fn B2cOverviewDashboard() -> impl IntoView {
    let controller = StoredValue::new_local(None::<PageController>);
    let (reset_enabled, set_reset_enabled) = signal(false);

    let (data, set_data) = signal(None::<DashboardResponse>);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);

    // Mount widgets once options are known, then sync them from the URL.
    // Data is requested only when the URL already carries the statuses filter.
    Effect::new(move |_| {
        let search = LocationNavigator.current_search();
        spawn_local(async move {
            let options = match api::get_filter_options(&search).await {
                Ok(options) => options,
                Err(err) => {
                    log::error!("Failed to load filter options: {}", err);
                    FilterOptions::default()
                }
            };

            let widgets = FilterWidgets::lookup(|key| VirtualSelectWidget::mount(key, options.get(key)));
            let mut page_controller = FilterStateController::new(widgets, LocationNavigator);
            let outcome = page_controller.initialize();
            set_reset_enabled.set(outcome.reset_enabled);
            controller.set_value(Some(page_controller));

            if outcome.phase == ControllerPhase::AutoRedirecting {
                return;
            }

            match api::get_overview(&search).await {
                Ok(response) => {
                    set_data.set(Some(response));
                    set_loading.set(false);
                }
                Err(err) => {
                    log::error!("Failed to load B2C overview: {}", err);
                    set_error.set(Some(err));
                    set_loading.set(false);
                }
            }
        });
    });

    Effect::new(move |_| {
        if let Some(current) = data.get() {
            charts::render_charts(&current);
        }
    });

    let on_apply = Callback::new(move |_: ()| {
        controller.update_value(|page_controller| {
            if let Some(page_controller) = page_controller {
                if let Err(err) = page_controller.apply_filters() {
                    log::warn!("Apply ignored: {}", err);
                }
            }
        });
    });

    let on_reset = Callback::new(move |_: ()| {
        controller.update_value(|page_controller| {
            if let Some(page_controller) = page_controller {
                if let Err(err) = page_controller.reset_filters() {
                    log::warn!("Reset ignored: {}", err);
                }
            }
        });
    });

    let period = Signal::derive(move || data.get().map(|d| (d.start, d.end)));
    let kpi = move || data.get().map(|d| d.kpi);

    view! {
        <div id="d100_b2c_overview--dashboard" class="b2c-dashboard">
            <h1 class="b2c-dashboard__title">"[B2C] Revenue & Orders Dashboard"</h1>

            <FilterBar
                period=period
                reset_enabled=reset_enabled
                on_apply=on_apply
                on_reset=on_reset
            />

            {move || loading.get().then(|| view! {
                <div class="b2c-dashboard__loading">"Đang tải dữ liệu..."</div>
            })}

            {move || error.get().map(|err| view! {
                <div class="b2c-dashboard__error">
                    <strong>"⚠ Lỗi: "</strong>
                    {err}
                </div>
            })}

            <div class="b2c-dashboard__kpis">
                <KpiCard
                    label="Doanh thu"
                    value=Signal::derive(move || kpi().map(|k| k.revenue))
                    format=KpiFormat::Money
                    change_percent=Signal::derive(move || kpi().and_then(|k| k.revenue_growth_pct))
                />
                <KpiCard
                    label="Đơn hàng"
                    value=Signal::derive(move || kpi().map(|k| k.orders as f64))
                    format=KpiFormat::Integer
                    change_percent=Signal::derive(move || kpi().and_then(|k| k.orders_growth_pct))
                />
                <KpiCard
                    label="Giá trị đơn TB"
                    value=Signal::derive(move || kpi().map(|k| k.aov))
                    format=KpiFormat::Money
                    change_percent=Signal::derive(|| None::<f64>)
                />
            </div>

            <div class="b2c-dashboard__charts">
                <div id=HOURLY_CHART_ID class="b2c-dashboard__chart b2c-dashboard__chart--wide"></div>
                <div id=STATUS_CHART_ID class="b2c-dashboard__chart"></div>
                <div id="vnMapChart" class="b2c-dashboard__chart"></div>
                <div id=BRAND_PLATFORM_CHART_ID class="b2c-dashboard__chart b2c-dashboard__chart--wide"></div>
            </div>

            <BrandPerformanceTable data=Signal::derive(move || data.get().map(|d| d.brand_performance)) />
        </div>
    }
}
