/// Bookmark Helper - Chrome Extension background coordinator and popup
/// Built with Rust + WASM + Yew

mod bridge;
pub mod client;
pub mod config;
pub mod convert;
pub mod coordinator;
pub mod error;
pub mod host;
pub mod menu;
pub mod messages;
mod timeout;
pub mod ui;

use wasm_bindgen::prelude::*;

pub use bridge::{handle_installed, handle_menu_click, handle_message, handle_tab_updated, init_background};

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    // Log everything to the console; the effective level comes from config
    wasm_logger::init(wasm_logger::Config::new(log::Level::Trace));
    log::set_max_level(log::LevelFilter::Info);
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
