/// Persisted settings in chrome.storage.local

use crate::api::ApiError;
use crate::bridge;
use crate::counts::StatusCounts;
use wasm_bindgen::JsValue;

/// Key holding the API base URL string
pub const API_URL_KEY: &str = "apiUrl";

/// Key holding the last computed `StatusCounts`
pub const COUNTS_KEY: &str = "conteoTemas";

/// Normalize user input: trimmed, `None` when blank
pub fn normalize_api_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// True when a `storage.onChanged` event touched the API URL in local storage
pub fn api_url_changed<'a>(area: &str, mut changed_keys: impl Iterator<Item = &'a str>) -> bool {
    area == "local" && changed_keys.any(|key| key == API_URL_KEY)
}

pub async fn load_api_url() -> Result<Option<String>, ApiError> {
    let value = bridge::getStorage(API_URL_KEY)
        .await
        .map_err(|e| ApiError::Storage(bridge::describe(&e)))?;

    Ok(value.as_string().and_then(|raw| normalize_api_url(&raw)))
}

pub async fn save_api_url(api_url: &str) -> Result<(), ApiError> {
    bridge::setStorage(API_URL_KEY, JsValue::from_str(api_url.trim()))
        .await
        .map_err(|e| ApiError::Storage(bridge::describe(&e)))
}

pub async fn load_counts() -> Result<Option<StatusCounts>, ApiError> {
    let value = bridge::getStorage(COUNTS_KEY)
        .await
        .map_err(|e| ApiError::Storage(bridge::describe(&e)))?;

    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }

    serde_wasm_bindgen::from_value(value)
        .map(Some)
        .map_err(|e| ApiError::Storage(format!("Failed to parse counts: {:?}", e)))
}

pub async fn save_counts(counts: &StatusCounts) -> Result<(), ApiError> {
    let value = serde_wasm_bindgen::to_value(counts)
        .map_err(|e| ApiError::Storage(format!("Failed to serialize counts: {:?}", e)))?;

    bridge::setStorage(COUNTS_KEY, value)
        .await
        .map_err(|e| ApiError::Storage(bridge::describe(&e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_api_url() {
        assert_eq!(normalize_api_url("  http://host/api  "), Some("http://host/api".to_string()));
        assert_eq!(normalize_api_url(""), None);
        assert_eq!(normalize_api_url(" \t "), None);
    }

    #[test]
    fn test_api_url_changed() {
        assert!(api_url_changed("local", ["apiUrl"].into_iter()));
        assert!(api_url_changed("local", ["conteoTemas", "apiUrl"].into_iter()));
    }

    #[test]
    fn test_other_changes_ignored() {
        assert!(!api_url_changed("local", ["conteoTemas"].into_iter()));
        assert!(!api_url_changed("sync", ["apiUrl"].into_iter()));
        assert!(!api_url_changed("local", std::iter::empty()));
    }
}
