/// Topic Radar - Chrome Extension for topic monitoring
/// Built with Rust + WASM + Yew

pub mod api;
pub mod background;
mod bridge;
pub mod config;
pub mod counts;
pub mod forms;
pub mod operations;
pub mod storage;
pub mod topic;
pub mod ui;

use background::RuntimeMessage;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Companion page: scan button + auto-reload
#[wasm_bindgen]
pub fn start_scan_page() {
    ui::scan_page::mount();
}

// Background worker entry, called on startup and on install/update
#[wasm_bindgen]
pub fn start_background() {
    background::restart();
}

// Forwarded from chrome.storage.onChanged
#[wasm_bindgen]
pub fn on_storage_changed(changes: JsValue, area: &str) {
    let keys: Vec<String> = changes
        .dyn_ref::<js_sys::Object>()
        .map(|object| {
            js_sys::Object::keys(object)
                .iter()
                .filter_map(|key| key.as_string())
                .collect()
        })
        .unwrap_or_default();

    if storage::api_url_changed(area, keys.iter().map(String::as_str)) {
        log::info!("API URL changed, restarting periodic updates");
        background::restart();
    }
}

// Forwarded from chrome.runtime.onMessage; resolves to the reply, or
// `undefined` for messages this worker does not handle
#[wasm_bindgen]
pub fn handle_runtime_message(request: JsValue) -> js_sys::Promise {
    future_to_promise(async move {
        let message = serde_wasm_bindgen::from_value::<serde_json::Value>(request)
            .ok()
            .and_then(RuntimeMessage::parse);

        match message {
            Some(message) => {
                let reply = background::handle_message(message).await;
                serde_wasm_bindgen::to_value(&reply).map_err(|e| JsValue::from_str(&e.to_string()))
            }
            None => Ok(JsValue::UNDEFINED),
        }
    })
}
