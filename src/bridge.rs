/// JS bridge to the extension APIs (chrome.*, fetch, timers)

use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/extension.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    pub async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    /// Resolves to `{ status, ok, body }`; rejects only on network failure
    #[wasm_bindgen(catch)]
    pub async fn fetchJson(url: &str, method: &str, body: Option<String>) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn setBadge(text: &str, color: Option<String>) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn sendRuntimeMessage(message: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn sleep(ms: i32) -> Result<(), JsValue>;

    pub fn startInterval(callback: &js_sys::Function, ms: i32) -> i32;

    pub fn stopInterval(handle: i32);
}

/// Render a rejected JS value as text for error messages
pub fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}
