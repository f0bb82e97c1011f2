//! Chat input: Enter sends, Shift+Enter inserts a newline

use dioxus::prelude::*;

/// Estimate how many rows the textarea needs based on content
fn compute_rows(text: &str) -> usize {
    let newlines = text.chars().filter(|&c| c == '\n').count();
    // ~70 chars per visual line at the input's width
    let wrap_lines: usize = text
        .lines()
        .map(|line| line.chars().count().saturating_sub(1) / 70)
        .sum();
    (newlines + wrap_lines + 1).clamp(1, 6)
}

#[component]
pub fn ChatInput(on_send: EventHandler<String>, is_busy: bool) -> Element {
    let mut text = use_signal(String::new);

    let handle_keydown = move |evt: KeyboardEvent| {
        if evt.key() == Key::Enter && !evt.modifiers().contains(Modifiers::SHIFT) {
            evt.prevent_default();
            if !is_busy && !text().trim().is_empty() {
                on_send.call(text());
                text.set(String::new());
            }
        }
    };

    let can_send = !is_busy && !text().trim().is_empty();
    let rows = compute_rows(&text());
    let send_class = if can_send { "send-btn" } else { "send-btn disabled" };

    rsx! {
        div { class: "input-bar",
            textarea {
                class: "msg-input",
                placeholder: "Type a message...",
                value: "{text}",
                rows: "{rows}",
                oninput: move |evt| text.set(evt.value()),
                onkeydown: handle_keydown,
            }
            button {
                class: "{send_class}",
                disabled: !can_send,
                title: "Send (Enter)",
                onclick: move |_| {
                    if can_send {
                        on_send.call(text());
                        text.set(String::new());
                    }
                },
                "Send"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_rows() {
        assert_eq!(compute_rows(""), 1);
        assert_eq!(compute_rows("one\ntwo"), 2);
        assert_eq!(compute_rows(&"x".repeat(150)), 3);
        assert_eq!(compute_rows(&"\n".repeat(20)), 6);
    }
}
