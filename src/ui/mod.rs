//! UI components for SprintChat
//!
//! This module contains all user interface components built with Dioxus.

pub mod chat;
pub mod settings;
pub mod sidebar;

use crate::app::{AppState, View};
use chat::ChatView;
use dioxus::prelude::*;
use settings::Settings;
use sidebar::Sidebar;

#[component]
pub fn Layout() -> Element {
    let app_state = use_context::<AppState>();
    let view = *app_state.view.read();

    rsx! {
        div { class: "layout",
            Sidebar {}
            main { class: "main-pane",
                match view {
                    View::Chat => rsx! { ChatView {} },
                    View::Settings => rsx! { Settings {} },
                }
            }
        }
    }
}
