/// CuraQ Saver - Browser extension for saving pages to CuraQ
/// Built with Rust + WASM + Yew

pub mod api;
mod background;
pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod links;
pub mod protocol;
pub mod status;
pub mod storage;
pub mod tab_data;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the toolbar popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::with_props(ui::popup::AppProps {
        origin: controller::Origin::Toolbar,
    })
    .render();
}

// Start the Yew app for the confirmation window opened from the context menu
#[wasm_bindgen]
pub fn start_confirm() {
    let article = web_sys::window()
        .and_then(|window| window.location().href().ok())
        .and_then(|href| links::article_from_query(&href));
    if article.is_none() {
        log::warn!("Confirmation window opened without an article");
    }

    yew::Renderer::<ui::popup::App>::with_props(ui::popup::AppProps {
        origin: controller::Origin::ContextMenu(article),
    })
    .render();
}

// Register the background worker's context menu and message listener
#[wasm_bindgen]
pub fn start_background() {
    background::start();
}
