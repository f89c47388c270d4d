/// HTTP client for the monitoring API

use crate::bridge;
use crate::topic::{MediumCreated, NewMedium, ScanStarted, Topic, TopicFilter};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

pub const NOT_CONFIGURED_MESSAGE: &str = "Por favor, configura primero la URL de la API";
pub const CONNECTION_MESSAGE: &str = "Error al conectar con la API";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("{}", NOT_CONFIGURED_MESSAGE)]
    NotConfigured,
    #[error("URL de API no válida: {0}")]
    InvalidUrl(String),
    #[error("{}", CONNECTION_MESSAGE)]
    Network(String),
    /// `{ "error": ... }` body returned by the server
    #[error("{0}")]
    Server(String),
    #[error("La API respondió con el estado {0}")]
    Status(u16),
    #[error("Respuesta inesperada de la API: {0}")]
    Decode(String),
    #[error("Error de almacenamiento: {0}")]
    Storage(String),
    /// Badge or runtime messaging failure
    #[error("Error de la extensión: {0}")]
    Extension(String),
}

/// Raw reply handed back by the `fetchJson` bridge
#[derive(Debug, Clone, Deserialize)]
pub struct HttpReply {
    pub status: u16,
    pub ok: bool,
    #[serde(default)]
    pub body: serde_json::Value,
}

/// Turn a reply into a typed value; an `error` field wins over the status code
pub fn interpret<T: DeserializeOwned>(reply: HttpReply) -> Result<T, ApiError> {
    if let Some(message) = reply.body.get("error").and_then(|e| e.as_str()) {
        return Err(ApiError::Server(message.to_string()));
    }
    if !reply.ok {
        return Err(ApiError::Status(reply.status));
    }
    serde_json::from_value(reply.body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Perform a request through the bridge and interpret the reply
pub async fn request<T: DeserializeOwned>(
    url: &str,
    method: &str,
    body: Option<String>,
) -> Result<T, ApiError> {
    let reply_js = bridge::fetchJson(url, method, body)
        .await
        .map_err(|e| ApiError::Network(bridge::describe(&e)))?;

    let reply: HttpReply = serde_wasm_bindgen::from_value(reply_js)
        .map_err(|e| ApiError::Decode(e.to_string()))?;

    interpret(reply)
}

/// Client bound to a configured API base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base: Url,
}

impl ApiClient {
    /// Fails with `NotConfigured` for a missing or blank URL, so no request
    /// can be built without configuration
    pub fn new(api_url: Option<&str>) -> Result<ApiClient, ApiError> {
        let raw = api_url.map(str::trim).unwrap_or("");
        if raw.is_empty() {
            return Err(ApiError::NotConfigured);
        }

        let base = Url::parse(raw).map_err(|e| ApiError::InvalidUrl(format!("{} ({})", raw, e)))?;
        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(raw.to_string()));
        }

        Ok(ApiClient { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segment: &str) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(segment);
        }
        url
    }

    pub fn topics_url(&self, filter: TopicFilter) -> Url {
        let mut url = self.endpoint("temas");
        if let Some(kind) = filter.medium_kind() {
            url.query_pairs_mut().append_pair("tipo", kind.as_param());
        }
        url
    }

    pub fn media_url(&self) -> Url {
        self.endpoint("medios")
    }

    pub fn scan_url(&self) -> Url {
        self.endpoint("iniciar-escaneo")
    }

    pub async fn topics(&self, filter: TopicFilter) -> Result<Vec<Topic>, ApiError> {
        request(self.topics_url(filter).as_str(), "GET", None).await
    }

    pub async fn add_medium(&self, medium: &NewMedium) -> Result<MediumCreated, ApiError> {
        let body = serde_json::to_string(medium).map_err(|e| ApiError::Decode(e.to_string()))?;
        request(self.media_url().as_str(), "POST", Some(body)).await
    }

    pub async fn start_scan(&self) -> Result<ScanStarted, ApiError> {
        request(self.scan_url().as_str(), "POST", None).await
    }
}
