/// Companion page script: manual scan button and periodic reload

use crate::api::{self, ApiError};
use crate::config::{LOCAL_SCAN_ENDPOINT, PAGE_RELOAD_MS, SCAN_BUTTON_ID, SCAN_MOUNT_ID};
use crate::topic::ScanStarted;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlButtonElement};
use yew::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/js/page.js")]
extern "C" {
    fn showAlert(message: &str);

    fn reloadPage();

    fn scheduleReload(ms: i32);
}

/// How the scan behavior was wired into the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMount {
    /// Click handler attached to the page's own `#btnEscaneoManual`
    Button,
    /// Button rendered into `#escaneo-manual`
    Host,
    Absent,
}

/// Schedule the periodic reload and wire up the scan button if the page has one
pub fn mount() {
    scheduleReload(PAGE_RELOAD_MS);

    match web_sys::window().and_then(|window| window.document()) {
        Some(document) => {
            let mounted = mount_into(&document);
            log::debug!("Scan button: {:?}", mounted);
        }
        None => log::warn!("No document, auto-reload only"),
    }
}

/// Prefer the served button; fall back to rendering one into the host element
pub fn mount_into(document: &Document) -> ScanMount {
    let served_button = document
        .get_element_by_id(SCAN_BUTTON_ID)
        .and_then(|element| element.dyn_into::<HtmlButtonElement>().ok());

    if let Some(button) = served_button {
        return if attach_to_button(&button) {
            ScanMount::Button
        } else {
            ScanMount::Absent
        };
    }

    match document.get_element_by_id(SCAN_MOUNT_ID) {
        Some(host) => {
            yew::Renderer::<ScanButton>::with_root(host).render();
            ScanMount::Host
        }
        None => ScanMount::Absent,
    }
}

fn attach_to_button(button: &HtmlButtonElement) -> bool {
    let target = button.clone();
    let on_click = Closure::wrap(Box::new(move || {
        if target.disabled() {
            return;
        }
        set_scanning(&target, true);

        let target = target.clone();
        spawn_local(async move {
            run_scan().await;
            set_scanning(&target, false);
        });
    }) as Box<dyn FnMut()>);

    if let Err(e) = button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref()) {
        log::error!("Failed to attach scan handler: {:?}", e);
        return false;
    }

    // Lives as long as the page
    on_click.forget();
    true
}

fn set_scanning(button: &HtmlButtonElement, scanning: bool) {
    button.set_disabled(scanning);
    button.set_text_content(Some(scan_button_label(scanning)));
}

/// POST the scan, alert the outcome and reload on success
async fn run_scan() {
    let result: Result<ScanStarted, ApiError> =
        api::request(LOCAL_SCAN_ENDPOINT, "POST", None).await;

    if let Err(e) = &result {
        log::error!("Manual scan failed: {}", e);
    }
    showAlert(&scan_alert_text(&result));
    if result.is_ok() {
        reloadPage();
    }
}

#[function_component(ScanButton)]
pub fn scan_button() -> Html {
    let scanning = use_state(|| false);

    let onclick = {
        let scanning = scanning.clone();

        Callback::from(move |_: MouseEvent| {
            if *scanning {
                return;
            }
            scanning.set(true);

            let scanning = scanning.clone();
            spawn_local(async move {
                run_scan().await;
                scanning.set(false);
            });
        })
    };

    html! {
        <button id={SCAN_BUTTON_ID} class="btn btn-primary" disabled={*scanning} {onclick}>
            {scan_button_label(*scanning)}
        </button>
    }
}

fn scan_button_label(scanning: bool) -> &'static str {
    if scanning {
        "Escaneando..."
    } else {
        "Iniciar escaneo manual"
    }
}

fn scan_alert_text(result: &Result<ScanStarted, ApiError>) -> String {
    match result {
        Ok(started) => format!("Escaneo completado: {}", started.mensaje),
        Err(e) => format!("Error durante el escaneo: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_label() {
        assert_eq!(scan_button_label(true), "Escaneando...");
        assert_eq!(scan_button_label(false), "Iniciar escaneo manual");
    }

    #[test]
    fn test_alert_text_success() {
        let result = Ok(ScanStarted {
            mensaje: "Escaneo manual completado correctamente".to_string(),
        });

        assert_eq!(
            scan_alert_text(&result),
            "Escaneo completado: Escaneo manual completado correctamente"
        );
    }

    #[test]
    fn test_alert_text_failure() {
        let result = Err(ApiError::Server("Error al iniciar escaneo: timeout".to_string()));

        assert_eq!(
            scan_alert_text(&result),
            "Error durante el escaneo: Error al iniciar escaneo: timeout"
        );
    }
}
