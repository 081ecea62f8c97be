use crate::dashboards::B2cOverviewDashboard;
use crate::layout::Sidebar;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <div class="app">
            <Sidebar>
                <a class="sidebar__link sidebar__link--active" href="/">
                    "B2C Overview"
                </a>
            </Sidebar>
            <main class="app__content">
                <B2cOverviewDashboard />
            </main>
        </div>
    }
}
