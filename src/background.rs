/// Background poller: periodic topic counts and badge updates

use crate::api::{ApiClient, ApiError};
use crate::bridge;
use crate::config::POLL_INTERVAL_MS;
use crate::counts::{Badge, StatusCounts};
use crate::storage;
use crate::topic::TopicFilter;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

thread_local! {
    static POLLER: RefCell<Option<PollTimer>> = const { RefCell::new(None) };
    static GENERATION: Cell<u64> = const { Cell::new(0) };
}

/// Live interval; dropping it clears the JS timer before the closure goes away
struct PollTimer {
    handle: i32,
    _tick: Closure<dyn FnMut()>,
}

impl Drop for PollTimer {
    fn drop(&mut self) {
        bridge::stopInterval(self.handle);
    }
}

/// Clear any running timer, poll now, then poll every `POLL_INTERVAL_MS`
pub fn restart() {
    stop();

    spawn_local(run_logged());

    let tick = Closure::wrap(Box::new(|| spawn_local(run_logged())) as Box<dyn FnMut()>);
    let handle = bridge::startInterval(tick.as_ref().unchecked_ref(), POLL_INTERVAL_MS);

    POLLER.with(|poller| {
        *poller.borrow_mut() = Some(PollTimer {
            handle,
            _tick: tick,
        });
    });

    log::info!("Started periodic updates every {} minutes", POLL_INTERVAL_MS / 60_000);
}

fn stop() {
    let previous = POLLER.with(|poller| poller.borrow_mut().take());
    if previous.is_some() {
        log::debug!("Stopped periodic updates");
    }
}

async fn run_logged() {
    match refresh().await {
        Ok(_) => {}
        Err(ApiError::NotConfigured) => log::info!("API URL not configured, skipping update"),
        Err(e) => log::error!("Background update failed: {}", e),
    }
}

/// One poll: fetch all topics, count them, update badge and cache.
///
/// Only the most recently started poll writes the badge and the cache.
pub async fn refresh() -> Result<StatusCounts, ApiError> {
    let generation = next_generation();

    let api_url = storage::load_api_url().await?;
    let client = ApiClient::new(api_url.as_deref())?;

    log::info!("Updating topics in background from {}", client.base());
    let topics = client.topics(TopicFilter::All).await?;
    let counts = StatusCounts::tally(&topics);

    if !is_current(generation) {
        log::debug!("Poll {} superseded, leaving badge untouched", generation);
        return Ok(counts);
    }

    apply_badge(&Badge::for_counts(&counts)).await?;
    storage::save_counts(&counts).await?;

    log::info!(
        "Background update done: {} red, {} yellow, {} green of {}",
        counts.red,
        counts.yellow,
        counts.green,
        counts.total
    );
    Ok(counts)
}

fn next_generation() -> u64 {
    GENERATION.with(|generation| {
        let next = generation.get() + 1;
        generation.set(next);
        next
    })
}

fn is_current(generation: u64) -> bool {
    GENERATION.with(|current| current.get() == generation)
}

async fn apply_badge(badge: &Badge) -> Result<(), ApiError> {
    let color = match badge {
        Badge::Alert { color, .. } => Some(color.to_string()),
        Badge::Clear => None,
    };

    bridge::setBadge(badge.text(), color)
        .await
        .map_err(|e| ApiError::Extension(bridge::describe(&e)))
}

/// Messages accepted from other extension surfaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum RuntimeMessage {
    #[serde(rename = "actualizarDatos")]
    RefreshNow,
}

impl RuntimeMessage {
    pub fn parse(value: serde_json::Value) -> Option<RuntimeMessage> {
        serde_json::from_value(value).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageReply {
    /// Worker-side failures keep their own text (configuration, connection,
    /// server message) rather than being reported as a messaging failure
    pub fn into_result(self) -> Result<(), ApiError> {
        match self {
            MessageReply { success: true, .. } => Ok(()),
            MessageReply { error, .. } => Err(ApiError::Server(
                error.unwrap_or_else(|| "Actualización fallida".to_string()),
            )),
        }
    }

    pub fn from_result<T>(result: &Result<T, ApiError>) -> MessageReply {
        match result {
            Ok(_) => MessageReply {
                success: true,
                error: None,
            },
            Err(e) => MessageReply {
                success: false,
                error: Some(e.to_string()),
            },
        }
    }
}

pub async fn handle_message(message: RuntimeMessage) -> MessageReply {
    match message {
        RuntimeMessage::RefreshNow => {
            let result = refresh().await;
            if let Err(e) = &result {
                log::warn!("Requested update failed: {}", e);
            }
            MessageReply::from_result(&result)
        }
    }
}

/// Ask the background worker to poll immediately (used by the popup)
pub async fn request_refresh() -> Result<(), ApiError> {
    let message = serde_wasm_bindgen::to_value(&RuntimeMessage::RefreshNow)
        .map_err(|e| ApiError::Extension(format!("Failed to serialize message: {:?}", e)))?;

    let reply_js = bridge::sendRuntimeMessage(message)
        .await
        .map_err(|e| ApiError::Extension(bridge::describe(&e)))?;

    let reply: MessageReply = serde_wasm_bindgen::from_value(reply_js)
        .map_err(|e| ApiError::Extension(format!("Failed to parse reply: {:?}", e)))?;

    reply.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CONNECTION_MESSAGE, NOT_CONFIGURED_MESSAGE};
    use crate::forms::error_text;

    #[test]
    fn test_parse_refresh_message() {
        let message = RuntimeMessage::parse(serde_json::json!({"action": "actualizarDatos"}));
        assert_eq!(message, Some(RuntimeMessage::RefreshNow));
    }

    #[test]
    fn test_parse_unknown_message() {
        assert_eq!(RuntimeMessage::parse(serde_json::json!({"action": "otra"})), None);
        assert_eq!(RuntimeMessage::parse(serde_json::json!({})), None);
        assert_eq!(RuntimeMessage::parse(serde_json::Value::Null), None);
    }

    #[test]
    fn test_message_wire_format() {
        let json = serde_json::to_value(RuntimeMessage::RefreshNow).unwrap();
        assert_eq!(json, serde_json::json!({"action": "actualizarDatos"}));
    }

    #[test]
    fn test_success_reply_has_no_error_key() {
        let reply = MessageReply::from_result::<()>(&Ok(()));
        let json = serde_json::to_value(&reply).unwrap();

        assert_eq!(json, serde_json::json!({"success": true}));
    }

    #[test]
    fn test_failure_reply_carries_message() {
        let reply = MessageReply::from_result::<()>(&Err(ApiError::NotConfigured));

        assert!(!reply.success);
        assert_eq!(
            reply.error.as_deref(),
            Some("Por favor, configura primero la URL de la API")
        );
    }

    #[test]
    fn test_failed_refresh_shows_worker_text() {
        let not_configured = MessageReply::from_result::<()>(&Err(ApiError::NotConfigured));
        let offline = MessageReply::from_result::<()>(&Err(ApiError::Network(
            "TypeError: Failed to fetch".to_string(),
        )));

        let not_configured = not_configured.into_result().unwrap_err();
        let offline = offline.into_result().unwrap_err();

        assert_eq!(error_text(&not_configured), NOT_CONFIGURED_MESSAGE);
        assert_eq!(error_text(&offline), CONNECTION_MESSAGE);
    }

    #[test]
    fn test_failed_refresh_without_text() {
        let reply = MessageReply {
            success: false,
            error: None,
        };

        assert_eq!(
            reply.into_result(),
            Err(ApiError::Server("Actualización fallida".to_string()))
        );
    }

    #[test]
    fn test_successful_refresh_reply() {
        let reply = MessageReply {
            success: true,
            error: None,
        };
        assert_eq!(reply.into_result(), Ok(()));
    }

    #[test]
    fn test_generation_tracks_latest_poll() {
        let first = next_generation();
        let second = next_generation();

        assert!(!is_current(first));
        assert!(is_current(second));
    }
}
