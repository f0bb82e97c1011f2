use crate::app::AppState;
use crate::chat::{
    self, upload_error_text, UploadFile, UploadOutcome, STATUS_UPLOADING, STATUS_UPLOAD_OK,
    UPLOAD_OK_VISIBLE_FOR,
};
use crate::types::message::Role;
use crate::ui::chat::scroll_to_bottom;
use dioxus::prelude::*;
use std::path::Path;

/// Document picker, upload button and chunk counts
#[component]
pub fn RagPanel() -> Element {
    let app_state = use_context::<AppState>();
    let mut selected = use_signal(|| None::<UploadFile>);

    let handle_pick = move |evt: FormEvent| {
        let Some(engine) = evt.files() else {
            selected.set(None);
            return;
        };
        let Some(path) = engine.files().into_iter().next() else {
            selected.set(None);
            return;
        };
        spawn(async move {
            let name = Path::new(&path)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.clone());
            match engine.read_file(&path).await {
                Some(bytes) => selected.set(Some(UploadFile { name, bytes })),
                None => {
                    tracing::warn!("Could not read {}", path);
                    selected.set(None);
                }
            }
        });
    };

    let handle_upload = {
        let app_state = app_state.clone();
        move |_: MouseEvent| {
            let file = selected.read().clone();
            if file.is_none() {
                return;
            }

            let mut state = app_state.clone();
            state.status.set(STATUS_UPLOADING.to_string());
            spawn(async move {
                let client = state.client();
                let session_id = state.session_id.read().clone();
                match chat::upload_document(&client, &session_id, file).await {
                    Ok(UploadOutcome::Uploaded(rag_status)) => {
                        state.rag_status.set(rag_status);
                        state.status.set(STATUS_UPLOAD_OK.to_string());
                        tokio::time::sleep(UPLOAD_OK_VISIBLE_FOR).await;
                        if *state.status.read() == STATUS_UPLOAD_OK {
                            state.status.set(String::new());
                        }
                    }
                    Ok(UploadOutcome::Skipped) => state.status.set(String::new()),
                    Err(e) => {
                        tracing::error!("Upload failed: {}", e);
                        state.status.set(String::new());
                        state.transcript.write().push(Role::Bot, upload_error_text(&e));
                        scroll_to_bottom();
                    }
                }
            });
        }
    };

    let (label, breakdown) = match app_state.rag_status.read().as_ref() {
        Some(status) => (status.label(), status.breakdown()),
        None => (String::new(), String::new()),
    };
    let can_upload = selected.read().is_some();

    rsx! {
        div { class: "panel",
            label { class: "panel-title", "Documents" }
            input {
                r#type: "file",
                accept: ".txt,.md,.pdf",
                multiple: false,
                onchange: handle_pick,
            }
            button {
                class: "btn",
                disabled: !can_upload,
                onclick: handle_upload,
                "Upload"
            }
            div { class: "rag-status", title: "{breakdown}", "{label}" }
        }
    }
}
