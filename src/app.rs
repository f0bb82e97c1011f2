//! Root Dioxus application component
//!
//! This module contains the main App component that serves as the root of the UI tree.

use crate::chat::{self, init_error_text, Transcript};
use crate::client::ApiClient;
use crate::session::SessionManager;
use crate::storage::local::LocalStore;
use crate::storage::settings::{load_settings, AppSettings};
use crate::types::api::{HealthResponse, RagStatus};
use crate::types::message::Role;
use crate::ui::Layout;
use dioxus::prelude::*;
use std::sync::Arc;
use tokio::sync::Mutex;

const STYLE: &str = include_str!("../assets/main.css");

/// Which main view is shown next to the sidebar
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum View {
    Chat,
    Settings,
}

/// Global application state shared across components
#[derive(Clone)]
pub struct AppState {
    /// Rebuilt whenever the server URL or timeout changes
    pub client: Signal<Arc<ApiClient>>,
    pub sessions: Arc<Mutex<SessionManager>>,
    pub settings: Signal<AppSettings>,
    pub transcript: Signal<Transcript>,
    pub session_id: Signal<String>,
    pub modes: Signal<Vec<String>>,
    pub mode: Signal<String>,
    /// Status line under the chat pane
    pub status: Signal<String>,
    pub rag_status: Signal<Option<RagStatus>>,
    pub health: Signal<Option<HealthResponse>>,
    /// A chat request is in flight
    pub is_busy: Signal<bool>,
    pub view: Signal<View>,
}

impl AppState {
    pub fn new() -> Self {
        let settings = load_settings();
        let store = match LocalStore::open_default() {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("No data directory ({}), keeping local storage in the working directory", e);
                LocalStore::open("local_storage.json")
            }
        };
        tracing::info!("Local storage: {}", store.path().display());
        let sessions = SessionManager::new(store);
        let session_id = sessions.session_id().unwrap_or_default().to_string();
        tracing::info!("AppState initialized (server: {})", settings.server_url);

        Self {
            client: Signal::new(Arc::new(build_client(&settings))),
            sessions: Arc::new(Mutex::new(sessions)),
            settings: Signal::new(settings),
            transcript: Signal::new(Transcript::new()),
            session_id: Signal::new(session_id),
            modes: Signal::new(Vec::new()),
            mode: Signal::new(String::new()),
            status: Signal::new(String::new()),
            rag_status: Signal::new(None),
            health: Signal::new(None),
            is_busy: Signal::new(false),
            view: Signal::new(View::Chat),
        }
    }

    /// Snapshot of the current client for use across `.await`
    pub fn client(&self) -> Arc<ApiClient> {
        self.client.read().clone()
    }

    /// Point the client at the server in `settings`
    pub fn rebuild_client(&mut self, settings: &AppSettings) {
        self.client.set(Arc::new(build_client(settings)));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_client(settings: &AppSettings) -> ApiClient {
    let config = settings.client_config();
    match ApiClient::new(config.clone()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to configure HTTP client, using defaults: {}", e);
            ApiClient::with_http_client(reqwest::Client::new(), config)
        }
    }
}

/// Startup: health badge alongside modes, session and history
async fn run_init(mut state: AppState) {
    let client = state.client();
    let restore = state.settings.read().restore_history;

    let (health, result) = {
        let mut sessions = state.sessions.lock().await;
        chat::startup(&client, &mut sessions, restore).await
    };
    state.health.set(health);

    match result {
        Ok(init) => {
            state.modes.set(init.modes);
            state.mode.set(init.mode.unwrap_or_default());
            state.session_id.set(init.session_id);
            state.transcript.set(init.transcript);
            state.rag_status.set(init.rag_status);
        }
        Err(e) => {
            tracing::error!("Initialization failed: {}", e);
            state.transcript.write().push(Role::Bot, init_error_text(&e));
        }
    }
}

#[component]
pub fn App() -> Element {
    let app_state = use_context_provider(AppState::new);

    {
        let app_state = app_state.clone();
        use_effect(move || {
            spawn(run_init(app_state.clone()));
        });
    }

    let theme = app_state.settings.read().theme.clone();

    rsx! {
        style { {STYLE} }
        div { class: "app theme-{theme}",
            Layout {}
        }
    }
}
