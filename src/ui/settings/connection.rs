use crate::app::AppState;
use crate::chat;
use crate::storage::settings::save_settings;
use dioxus::prelude::*;

pub fn ConnectionSettings() -> Element {
    let app_state = use_context::<AppState>();
    let settings = app_state.settings.read().clone();

    let mut server_url = use_signal(|| settings.server_url.clone());
    let mut timeout = use_signal(|| settings.request_timeout_secs.to_string());
    let mut saved_note = use_signal(String::new);
    let restore_history = settings.restore_history;
    let mut app_state_restore = app_state.clone();

    let handle_save = {
        let app_state = app_state.clone();
        move |_: MouseEvent| {
            let mut state = app_state.clone();
            let mut updated = state.settings.read().clone();
            updated.server_url = server_url();
            updated.request_timeout_secs = timeout().trim().parse().unwrap_or(updated.request_timeout_secs);
            updated.validate();

            if let Err(e) = save_settings(&updated) {
                tracing::error!("Failed to save settings: {}", e);
            }
            server_url.set(updated.server_url.clone());
            timeout.set(updated.request_timeout_secs.to_string());
            state.rebuild_client(&updated);
            state.settings.set(updated);
            saved_note.set("Saved. Checking server...".to_string());

            spawn(async move {
                let client = state.client();
                let health = chat::check_health(&client).await;
                saved_note.set(match &health {
                    Some(h) => format!("Connected ({})", h.badge()),
                    None => "Server unreachable".to_string(),
                });
                state.health.set(health);
            });
        }
    };

    rsx! {
        div { class: "card",
            h3 { "Backend" }

            label { class: "field",
                span { "Server URL" }
                input {
                    r#type: "text",
                    value: "{server_url}",
                    oninput: move |evt| server_url.set(evt.value()),
                }
            }

            label { class: "field",
                span { "Request timeout (seconds)" }
                input {
                    r#type: "number",
                    min: "1",
                    max: "600",
                    value: "{timeout}",
                    oninput: move |evt| timeout.set(evt.value()),
                }
            }

            label { class: "toggle",
                input {
                    r#type: "checkbox",
                    checked: restore_history,
                    onchange: move |evt: FormEvent| {
                        let mut settings = app_state_restore.settings.write();
                        settings.restore_history = evt.checked();
                        if let Err(error) = save_settings(&settings) {
                            tracing::error!("Failed to save settings: {}", error);
                        }
                    },
                }
                "Restore chat history on startup"
            }

            div { class: "button-row",
                button { class: "btn", onclick: handle_save, "Save & reconnect" }
                span { class: "note", "{saved_note}" }
            }
        }
    }
}
