use crate::app::AppState;
use crate::storage::settings::save_settings;
use dioxus::prelude::*;

/// Mode select plus the stream / RAG toggles
#[component]
pub fn ModePicker() -> Element {
    let app_state = use_context::<AppState>();
    let modes = app_state.modes.read().clone();
    let selected = app_state.mode.read().clone();
    let (stream_on, rag_on) = {
        let settings = app_state.settings.read();
        (settings.stream_responses, settings.use_rag)
    };

    let handle_mode_change = {
        let app_state = app_state.clone();
        move |evt: FormEvent| {
            let mode = evt.value();
            let mut state = app_state.clone();
            state.mode.set(mode.clone());
            spawn(async move {
                let mut sessions = state.sessions.lock().await;
                if let Err(e) = sessions.set_mode(&mode) {
                    tracing::error!("Failed to save mode: {}", e);
                }
            });
        }
    };

    let mut app_state_stream = app_state.clone();
    let mut app_state_rag = app_state.clone();

    rsx! {
        div { class: "panel",
            label { class: "panel-title", "Mode" }
            select {
                class: "mode-select",
                value: "{selected}",
                onchange: handle_mode_change,
                for mode in modes.iter() {
                    option {
                        key: "{mode}",
                        value: "{mode}",
                        selected: *mode == selected,
                        "{mode}"
                    }
                }
            }

            label { class: "toggle",
                input {
                    r#type: "checkbox",
                    checked: stream_on,
                    onchange: move |evt: FormEvent| {
                        let mut settings = app_state_stream.settings.write();
                        settings.stream_responses = evt.checked();
                        if let Err(e) = save_settings(&settings) {
                            tracing::error!("Failed to save settings: {}", e);
                        }
                    },
                }
                "Stream"
            }
            label { class: "toggle",
                input {
                    r#type: "checkbox",
                    checked: rag_on,
                    onchange: move |evt: FormEvent| {
                        let mut settings = app_state_rag.settings.write();
                        settings.use_rag = evt.checked();
                        if let Err(e) = save_settings(&settings) {
                            tracing::error!("Failed to save settings: {}", e);
                        }
                    },
                }
                "Use RAG"
            }
        }
    }
}
