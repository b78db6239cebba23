mod app;
mod components;
mod config;
mod pages;
mod story;

fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));

    #[cfg(all(not(target_arch = "wasm32"), any(feature = "desktop", feature = "mobile")))]
    if let Err(e) = simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
    {
        eprintln!("Failed to initialize logger: {}", e);
    }
}

#[cfg(feature = "desktop")]
fn launch() {
    use dioxus_desktop::{Config, WindowBuilder};

    let window = WindowBuilder::new().with_title(config::constants::WINDOW_TITLE);
    dioxus::LaunchBuilder::desktop()
        .with_cfg(Config::new().with_window(window))
        .launch(app::App);
}

#[cfg(not(feature = "desktop"))]
fn launch() {
    dioxus::launch(app::App);
}

fn main() {
    init_logging();
    log::info!("Starting welcome screen");
    launch();
}
