use crate::app::AppState;
use crate::chat::{self, error_text};
use crate::types::message::Role;
use crate::ui::chat::scroll_to_bottom;
use dioxus::prelude::*;

/// Session id display with the "New chat" and "Clear" actions
#[component]
pub fn SessionPanel() -> Element {
    let app_state = use_context::<AppState>();
    let session_id = app_state.session_id.read().clone();

    let handle_new_chat = {
        let app_state = app_state.clone();
        move |_: MouseEvent| {
            let mut state = app_state.clone();
            spawn(async move {
                let client = state.client();
                let result = {
                    let mut sessions = state.sessions.lock().await;
                    chat::start_new_chat(&client, &mut sessions).await
                };
                match result {
                    Ok((session_id, rag_status)) => {
                        state.session_id.set(session_id);
                        state.transcript.write().clear();
                        state.rag_status.set(rag_status);
                    }
                    Err(e) => {
                        tracing::error!("Failed to start a new session: {}", e);
                        state.transcript.write().push(Role::Bot, error_text(&e));
                        scroll_to_bottom();
                    }
                }
            });
        }
    };

    let handle_clear = {
        let app_state = app_state.clone();
        move |_: MouseEvent| {
            let mut state = app_state.clone();
            spawn(async move {
                let client = state.client();
                let session_id = state.session_id.read().clone();
                match chat::clear_chat(&client, &session_id).await {
                    Ok(rag_status) => {
                        state.transcript.write().clear();
                        state.rag_status.set(rag_status);
                    }
                    Err(e) => {
                        tracing::error!("Failed to clear session: {}", e);
                        state.transcript.write().push(Role::Bot, error_text(&e));
                        scroll_to_bottom();
                    }
                }
            });
        }
    };

    rsx! {
        div { class: "panel",
            label { class: "panel-title", "Session" }
            code { class: "session-id", title: "{session_id}",
                if session_id.is_empty() { "(none)" } else { "{session_id}" }
            }
            div { class: "button-row",
                button { class: "btn", onclick: handle_new_chat, "New chat" }
                button { class: "btn secondary", onclick: handle_clear, "Clear" }
            }
        }
    }
}
