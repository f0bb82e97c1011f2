#![allow(non_snake_case)]

pub mod appearance;
pub mod connection;

use crate::ui::settings::appearance::AppearanceSettings;
use crate::ui::settings::connection::ConnectionSettings;
use dioxus::prelude::*;

#[derive(PartialEq, Clone, Copy)]
enum SettingsTab {
    Connection,
    Appearance,
}

pub fn Settings() -> Element {
    let mut active_tab = use_signal(|| SettingsTab::Connection);

    rsx! {
        div { class: "settings",
            div { class: "tabs",
                TabButton {
                    active: active_tab() == SettingsTab::Connection,
                    onclick: move |_| active_tab.set(SettingsTab::Connection),
                    label: "Connection",
                }
                TabButton {
                    active: active_tab() == SettingsTab::Appearance,
                    onclick: move |_| active_tab.set(SettingsTab::Appearance),
                    label: "Appearance",
                }
            }

            div { class: "settings-body",
                match active_tab() {
                    SettingsTab::Connection => rsx! { ConnectionSettings {} },
                    SettingsTab::Appearance => rsx! { AppearanceSettings {} },
                }
            }
        }
    }
}

#[component]
fn TabButton(active: bool, onclick: EventHandler<MouseEvent>, label: String) -> Element {
    let classes = if active { "tab active" } else { "tab" };

    rsx! {
        button {
            class: "{classes}",
            onclick: onclick,
            "{label}"
        }
    }
}
