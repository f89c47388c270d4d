//! Browser tests for values that cross the JS boundary.
//! Run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use topic_radar::background::{MessageReply, RuntimeMessage};
use topic_radar::counts::StatusCounts;
use topic_radar::handle_runtime_message;
use topic_radar::ui::scan_page::{mount_into, ScanMount};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn counts_round_trip_through_js() {
    let counts = StatusCounts {
        red: 2,
        yellow: 1,
        green: 5,
        total: 8,
    };

    let js = serde_wasm_bindgen::to_value(&counts).unwrap();
    let red = js_sys::Reflect::get(&js, &JsValue::from_str("rojo")).unwrap();
    let back: StatusCounts = serde_wasm_bindgen::from_value(js).unwrap();

    assert_eq!(red.as_f64(), Some(2.0));
    assert_eq!(back, counts);
}

#[wasm_bindgen_test]
fn refresh_message_is_a_plain_object() {
    let js = serde_wasm_bindgen::to_value(&RuntimeMessage::RefreshNow).unwrap();
    let action = js_sys::Reflect::get(&js, &JsValue::from_str("action")).unwrap();

    assert_eq!(action.as_string().as_deref(), Some("actualizarDatos"));
}

#[wasm_bindgen_test]
fn failure_reply_parses_from_js() {
    let js = js_sys::JSON::parse(r#"{"success": false, "error": "sin conexión"}"#).unwrap();
    let reply: MessageReply = serde_wasm_bindgen::from_value(js).unwrap();

    assert!(!reply.success);
    assert_eq!(reply.error.as_deref(), Some("sin conexión"));
}

#[wasm_bindgen_test]
async fn unknown_message_resolves_undefined() {
    let request = js_sys::JSON::parse(r#"{"action": "otra"}"#).unwrap();

    let reply = JsFuture::from(handle_runtime_message(request)).await.unwrap();

    assert!(reply.is_undefined());
}

fn fresh_document() -> web_sys::Document {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html("");
    document
}

#[wasm_bindgen_test]
fn served_scan_button_gets_click_handler() {
    let document = fresh_document();
    let button = document
        .create_element("button")
        .unwrap()
        .dyn_into::<web_sys::HtmlButtonElement>()
        .unwrap();
    button.set_id("btnEscaneoManual");
    button.set_text_content(Some("Iniciar escaneo manual"));
    document.body().unwrap().append_child(&button).unwrap();

    assert_eq!(mount_into(&document), ScanMount::Button);
    // Served button is reused, not replaced by a rendered one
    let found = document.get_element_by_id("btnEscaneoManual").unwrap();
    assert!(found.is_same_node(Some(&button)));
    assert!(!button.disabled());
}

#[wasm_bindgen_test]
fn scan_host_without_button_falls_back_to_render() {
    let document = fresh_document();
    let host = document.create_element("div").unwrap();
    host.set_id("escaneo-manual");
    document.body().unwrap().append_child(&host).unwrap();

    assert_eq!(mount_into(&document), ScanMount::Host);
}

#[wasm_bindgen_test]
fn page_without_scan_elements_is_left_alone() {
    let document = fresh_document();

    assert_eq!(mount_into(&document), ScanMount::Absent);
}
