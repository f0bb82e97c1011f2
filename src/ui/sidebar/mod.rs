//! Sidebar: mode and toggles, session actions, documents, backend badge

pub mod mode_picker;
pub mod rag_panel;
pub mod session_panel;

use crate::app::{AppState, View};
use dioxus::prelude::*;
use mode_picker::ModePicker;
use rag_panel::RagPanel;
use session_panel::SessionPanel;

#[component]
pub fn Sidebar() -> Element {
    let app_state = use_context::<AppState>();
    let view = *app_state.view.read();
    let server_url = app_state.settings.read().server_url.clone();

    let (badge, badge_class) = match app_state.health.read().as_ref() {
        Some(health) if health.ok => (health.badge(), "badge ok"),
        Some(health) => (health.badge(), "badge warn"),
        None => ("offline".to_string(), "badge warn"),
    };

    let mut app_state_nav = app_state.clone();
    let (nav_label, next_view) = match view {
        View::Chat => ("Settings", View::Settings),
        View::Settings => ("Back to chat", View::Chat),
    };

    rsx! {
        aside { class: "sidebar",
            div { class: "brand",
                span { class: "brand-name", "SprintChat" }
                span { class: "{badge_class}", title: "{server_url}", "{badge}" }
            }
            ModePicker {}
            SessionPanel {}
            RagPanel {}
            div { class: "sidebar-footer",
                button {
                    class: "btn link",
                    onclick: move |_| app_state_nav.view.set(next_view),
                    "{nav_label}"
                }
            }
        }
    }
}
