//! Sidebar with a collapsed/expanded preference kept in localStorage.

use leptos::prelude::*;
use web_sys::window;

const SIDEBAR_STORAGE_KEY: &str = "sidebarCollapsed";
const COLLAPSED_BODY_CLASS: &str = "sidebar-collapsed";

fn parse_collapsed(stored: Option<&str>) -> bool {
    stored == Some("true")
}

fn stored_value(collapsed: bool) -> &'static str {
    if collapsed {
        "true"
    } else {
        "false"
    }
}

fn load_collapsed_from_storage() -> bool {
    let stored = window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(SIDEBAR_STORAGE_KEY).ok().flatten());
    parse_collapsed(stored.as_deref())
}

fn save_collapsed_to_storage(collapsed: bool) {
    if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(SIDEBAR_STORAGE_KEY, stored_value(collapsed));
    }
}

fn apply_body_class(collapsed: bool) {
    let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) else {
        return;
    };
    if let Err(err) = body
        .class_list()
        .toggle_with_force(COLLAPSED_BODY_CLASS, collapsed)
    {
        log::warn!("Failed to toggle body class: {:?}", err);
    }
}

#[component]
pub fn Sidebar(children: Children) -> impl IntoView {
    let collapsed = RwSignal::new(load_collapsed_from_storage());

    Effect::new(move |_| {
        apply_body_class(collapsed.get());
    });

    let toggle = move |_| {
        collapsed.update(|c| *c = !*c);
        save_collapsed_to_storage(collapsed.get_untracked());
    };

    view! {
        <aside class="sidebar">
            <button id="toggleSidebar" type="button" class="sidebar__toggle" on:click=toggle>
                "☰"
            </button>
            <nav class="sidebar__nav">{children()}</nav>
        </aside>
    }
}
