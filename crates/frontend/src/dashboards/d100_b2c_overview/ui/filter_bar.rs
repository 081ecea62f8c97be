use contracts::dashboards::d100_b2c_overview::FilterKey;
use leptos::prelude::*;

pub const APPLY_BUTTON_ID: &str = "btn-apply-filter";
pub const RESET_BUTTON_ID: &str = "btn-reset-filter";

fn filter_label(key: FilterKey) -> &'static str {
    match key {
        FilterKey::Brands => "Brand",
        FilterKey::Platforms => "Nền tảng",
        FilterKey::Shops => "Shop",
        FilterKey::Statuses => "Trạng thái",
    }
}

/// Filter bar with one mount point per multi-select widget and the
/// Apply/Reset buttons. The widgets themselves are created by the JS library
/// on the empty mount points.
#[component]
pub fn FilterBar(
    /// Period shown next to the filters (YYYY-MM-DD .. YYYY-MM-DD)
    #[prop(into)]
    period: Signal<Option<(String, String)>>,
    #[prop(into)]
    reset_enabled: Signal<bool>,
    on_apply: Callback<()>,
    on_reset: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="filter-bar">
            <div class="filter-bar__period">
                {move || period.get().map(|(start, end)| {
                    if start == end {
                        start
                    } else {
                        format!("{} → {}", start, end)
                    }
                })}
            </div>

            {FilterKey::ALL.into_iter().map(|key| view! {
                <div class="filter-bar__item">
                    <label class="filter-bar__label" for=key.element_id()>
                        {filter_label(key)}
                    </label>
                    <div id=key.element_id()></div>
                </div>
            }).collect_view()}

            <div class="filter-bar__actions">
                <button
                    id=APPLY_BUTTON_ID
                    type="button"
                    class="button button--primary"
                    on:click=move |_| on_apply.run(())
                >
                    "Áp dụng"
                </button>
                <button
                    id=RESET_BUTTON_ID
                    type="button"
                    class="button button--secondary"
                    class:disabled=move || !reset_enabled.get()
                    disabled=move || !reset_enabled.get()
                    on:click=move |_| on_reset.run(())
                >
                    "Đặt lại"
                </button>
            </div>
        </div>
    }
}
