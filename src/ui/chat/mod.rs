//! Chat interface components
//!
//! Contains the main chat view, message display, and input components.

pub mod input;
pub mod message;

use crate::app::AppState;
use crate::chat::{
    error_text, prepare_input, send_buffered, send_streaming, stream_error_suffix, STATUS_THINKING,
};
use crate::types::api::ChatRequest;
use crate::types::message::Role;
use dioxus::prelude::*;
use input::ChatInput;
use message::MessageBubble;

const CHAT_BOX_ID: &str = "chat-box";

/// Keep the newest message in view
pub fn scroll_to_bottom() {
    let _ = document::eval(&format!(
        "const el = document.getElementById('{CHAT_BOX_ID}'); if (el) {{ el.scrollTop = el.scrollHeight; }}"
    ));
}

#[component]
pub fn ChatView() -> Element {
    let app_state = use_context::<AppState>();

    // Handler for sending a message
    let handle_send = {
        let app_state = app_state.clone();
        move |raw: String| {
            let Some(text) = prepare_input(&raw) else {
                return;
            };

            let mut state = app_state.clone();
            state.transcript.write().push(Role::User, text.clone());
            state.status.set(STATUS_THINKING.to_string());
            state.is_busy.set(true);
            scroll_to_bottom();

            let (stream, use_rag) = {
                let settings = state.settings.read();
                (settings.stream_responses, settings.use_rag)
            };
            let request = ChatRequest {
                session_id: state.session_id.read().clone(),
                message: text,
                mode: state.mode.read().clone(),
                use_rag,
            };

            spawn(async move {
                let client = state.client();

                if stream {
                    let bot = state.transcript.write().push(Role::Bot, "");
                    let mut transcript = state.transcript;
                    let result = send_streaming(&client, &request, |acc| {
                        transcript.write().set_content(bot, acc);
                        scroll_to_bottom();
                    })
                    .await;
                    if let Err(e) = result {
                        tracing::error!("Streaming chat failed: {}", e);
                        state.transcript.write().append(bot, &stream_error_suffix(&e));
                    }
                } else {
                    let text = match send_buffered(&client, &request).await {
                        Ok(reply) => reply,
                        Err(e) => {
                            tracing::error!("Chat request failed: {}", e);
                            error_text(&e)
                        }
                    };
                    state.transcript.write().push(Role::Bot, text);
                }

                state.status.set(String::new());
                state.is_busy.set(false);
                scroll_to_bottom();
            });
        }
    };

    let is_busy = *app_state.is_busy.read();
    let status = app_state.status.read().clone();

    rsx! {
        div { class: "chat-view",
            div { id: CHAT_BOX_ID, class: "chat-box",
                for msg in app_state.transcript.read().messages().iter() {
                    MessageBubble { key: "{msg.id}", message: msg.clone() }
                }
                if is_busy {
                    div { class: "typing",
                        span { class: "dot" }
                        span { class: "dot" }
                        span { class: "dot" }
                    }
                }
            }
            div { class: "status-line", "{status}" }
            ChatInput { on_send: handle_send, is_busy }
        }
    }
}
