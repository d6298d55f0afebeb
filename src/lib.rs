/// go/links - Chrome Extension for go-link redirects and management
/// Built with Rust + WASM + Yew

pub mod api;
mod bridge;
pub mod config;
pub mod error;
pub mod link;
pub mod panel;
pub mod recent;
pub mod redirect;
pub mod schedule;
pub mod ui;

use config::GoConfig;
use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the redirect URL builder for JavaScript access
#[wasm_bindgen]
pub fn go_url(key: &str) -> Option<String> {
    redirect::go_url(&GoConfig::default().redirect_base, key)
}

// Register the omnibox keyword handlers; the side panel variant also
// makes the toolbar icon open the panel
#[wasm_bindgen]
pub fn start_background(open_side_panel: bool) {
    let config = GoConfig::default();
    bridge::register_omnibox(&config);
    if open_side_panel {
        bridge::register_side_panel_behavior();
    }
}

// Start the Yew app for the link manager side panel
#[wasm_bindgen]
pub fn start_panel() {
    yew::Renderer::<ui::panel::LinkPanel>::new().render();
}

// Start the Yew app for the quick-open popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
