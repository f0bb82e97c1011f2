use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use sprintchat::app::App;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sprintchat=info")),
        )
        .init();

    tracing::info!("Starting SprintChat {}", env!("CARGO_PKG_VERSION"));

    let window = WindowBuilder::new()
        .with_title("SprintChat")
        .with_inner_size(LogicalSize::new(1040.0, 760.0));

    dioxus::LaunchBuilder::desktop()
        .with_cfg(Config::new().with_window(window))
        .launch(App);
}
