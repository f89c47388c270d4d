/// Popup form handling: add-medium validation and request outcomes

use crate::api::{ApiError, CONNECTION_MESSAGE};
use crate::config::SCAN_RELOAD_DELAY_MS;
use crate::storage::normalize_api_url;
use crate::topic::{MediumCreated, MediumKind, NewMedium, ScanStarted};

pub const MISSING_FIELDS_MESSAGE: &str = "Por favor, completa todos los campos";

/// Inline message shown under a form or table
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Loading,
    Success(String),
    Error(String),
}

/// Text of an error notice: server-provided text when available, otherwise
/// a generic message per failure kind
pub fn error_text(error: &ApiError) -> String {
    match error {
        ApiError::Network(_) | ApiError::Decode(_) | ApiError::Status(_) => CONNECTION_MESSAGE.to_string(),
        other => other.to_string(),
    }
}

/// Current contents of the add-medium inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediumDraft {
    pub name: String,
    pub url: String,
    pub kind: MediumKind,
}

impl MediumDraft {
    /// Checks run before any request: filled fields, then API configuration
    pub fn validate(&self, api_configured: bool) -> Result<NewMedium, Notice> {
        let name = self.name.trim();
        let url = self.url.trim();

        if name.is_empty() || url.is_empty() {
            return Err(Notice::Error(MISSING_FIELDS_MESSAGE.to_string()));
        }
        if !api_configured {
            return Err(Notice::Error(ApiError::NotConfigured.to_string()));
        }

        Ok(NewMedium {
            nombre: name.to_string(),
            url: url.to_string(),
            tipo: self.kind,
        })
    }

    /// Name and URL are cleared; the kind selection is kept
    pub fn cleared(&self) -> MediumDraft {
        MediumDraft {
            kind: self.kind,
            ..MediumDraft::default()
        }
    }
}

/// Effect of committing the API URL field
#[derive(Debug, Clone, PartialEq)]
pub struct ApiUrlEdit {
    /// Trimmed text, shown in the field and persisted
    pub text: String,
    pub api_url: Option<String>,
    /// Tables reload on every commit, even when the URL is unchanged
    pub reload: bool,
}

pub fn api_url_edit(raw: &str) -> ApiUrlEdit {
    ApiUrlEdit {
        text: raw.trim().to_string(),
        api_url: normalize_api_url(raw),
        reload: true,
    }
}

/// What the popup does once a request settles
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub notice: Notice,
    pub clear_inputs: bool,
    /// `Some(0)` reloads now, `Some(ms)` after a delay
    pub reload_after_ms: Option<i32>,
}

pub fn medium_outcome(result: Result<MediumCreated, ApiError>) -> SubmitOutcome {
    match result {
        Ok(created) => SubmitOutcome {
            notice: Notice::Success(format!(
                "Medio agregado correctamente (ID: {})",
                created.id_text()
            )),
            clear_inputs: true,
            reload_after_ms: Some(0),
        },
        Err(e) => failed(&e),
    }
}

pub fn scan_outcome(result: Result<ScanStarted, ApiError>) -> SubmitOutcome {
    match result {
        Ok(started) => SubmitOutcome {
            notice: Notice::Success(started.mensaje),
            clear_inputs: false,
            reload_after_ms: Some(SCAN_RELOAD_DELAY_MS),
        },
        Err(e) => failed(&e),
    }
}

fn failed(error: &ApiError) -> SubmitOutcome {
    log::error!("Request failed: {}", error);
    SubmitOutcome {
        notice: Notice::Error(error_text(error)),
        clear_inputs: false,
        reload_after_ms: None,
    }
}
