//! Message bubble

use crate::types::message::{ChatMessage, Role};
use dioxus::prelude::*;

/// One chat bubble. Content is rendered as plain text, newlines preserved by CSS.
#[component]
pub fn MessageBubble(message: ChatMessage) -> Element {
    let side = match message.role {
        Role::User => "user",
        Role::Bot => "bot",
    };
    let time = message.created_at.with_timezone(&chrono::Local).format("%H:%M").to_string();

    rsx! {
        div { class: "msg-row {side}",
            div { class: "msg {side}", title: "{time}",
                "{message.content}"
            }
        }
    }
}
