use crate::app::AppState;
use crate::storage::settings::save_settings;
use dioxus::prelude::*;

pub fn AppearanceSettings() -> Element {
    let app_state = use_context::<AppState>();
    let current_theme = app_state.settings.read().theme.clone();

    rsx! {
        div { class: "card",
            h3 { "Theme" }
            div { class: "choice-row",
                for (value, label) in [("dark", "Dark"), ("light", "Light")] {
                    button {
                        class: if current_theme == value { "choice selected" } else { "choice" },
                        onclick: {
                            let mut app_state = app_state.clone();
                            move |_: MouseEvent| {
                                let mut settings = app_state.settings.write();
                                settings.theme = value.to_string();
                                if let Err(error) = save_settings(&settings) {
                                    tracing::error!("Failed to save settings: {}", error);
                                }
                            }
                        },
                        "{label}"
                    }
                }
            }
        }
    }
}
