/// Data structures for Topic Radar
use serde::{Deserialize, Serialize};

/// Severity tier of a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Red,
    Yellow,
    Green,
}

impl Status {
    /// Parse the label used by the monitoring API ("rojo", "amarillo", "verde")
    pub fn from_label(label: &str) -> Option<Status> {
        match label.trim().to_lowercase().as_str() {
            "rojo" => Some(Status::Red),
            "amarillo" => Some(Status::Yellow),
            "verde" => Some(Status::Green),
            _ => None,
        }
    }

    /// Map the hex color the server attaches to a topic
    pub fn from_color(color: &str) -> Option<Status> {
        match color.trim().to_lowercase().as_str() {
            "#f44336" => Some(Status::Red),
            "#ffc107" => Some(Status::Yellow),
            "#4caf50" => Some(Status::Green),
            _ => None,
        }
    }

    /// Thresholds used by the server: under 4h green, under 24h yellow, else red
    pub fn from_duration(hours: f64) -> Status {
        if hours < 4.0 {
            Status::Green
        } else if hours < 24.0 {
            Status::Yellow
        } else {
            Status::Red
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Red => "rojo",
            Status::Yellow => "amarillo",
            Status::Green => "verde",
        }
    }

    /// Display precedence: red first, green last
    pub fn rank(&self) -> u8 {
        match self {
            Status::Red => 0,
            Status::Yellow => 1,
            Status::Green => 2,
        }
    }
}

/// A tracked news item as returned by `GET /temas`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Topic {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "medio", default)]
    pub medium: Option<String>,
    #[serde(rename = "medio_nombre", default)]
    pub medium_name: Option<String>,
    #[serde(rename = "medio_tipo", default)]
    pub medium_kind: Option<String>,
    #[serde(rename = "estado", default)]
    pub raw_status: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(rename = "duracion_horas", default)]
    pub duration_hours: f64,
    #[serde(rename = "ultima_vez", default)]
    pub last_seen: String,
    #[serde(default)]
    pub url: String,
}

impl Topic {
    /// Resolve the status: explicit label, then color, then duration
    pub fn status(&self) -> Status {
        self.raw_status
            .as_deref()
            .and_then(Status::from_label)
            .or_else(|| self.color.as_deref().and_then(Status::from_color))
            .unwrap_or_else(|| Status::from_duration(self.duration_hours))
    }

    pub fn medium_label(&self) -> &str {
        self.medium
            .as_deref()
            .or(self.medium_name.as_deref())
            .unwrap_or("")
    }
}

/// Kind of monitored medium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MediumKind {
    #[default]
    #[serde(rename = "propios")]
    Own,
    #[serde(rename = "competencia")]
    Competitor,
}

impl MediumKind {
    pub const ALL: [MediumKind; 2] = [MediumKind::Own, MediumKind::Competitor];

    pub fn as_param(&self) -> &'static str {
        match self {
            MediumKind::Own => "propios",
            MediumKind::Competitor => "competencia",
        }
    }

    pub fn from_param(value: &str) -> Option<MediumKind> {
        MediumKind::ALL.into_iter().find(|kind| kind.as_param() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediumKind::Own => "Propio",
            MediumKind::Competitor => "Competencia",
        }
    }
}

/// Which slice of the topic list a table shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopicFilter {
    Own,
    Competitor,
    All,
}

impl TopicFilter {
    pub const ALL: [TopicFilter; 3] = [TopicFilter::Own, TopicFilter::Competitor, TopicFilter::All];

    /// Value for the `tipo` query parameter; `None` means unfiltered
    pub fn medium_kind(&self) -> Option<MediumKind> {
        match self {
            TopicFilter::Own => Some(MediumKind::Own),
            TopicFilter::Competitor => Some(MediumKind::Competitor),
            TopicFilter::All => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TopicFilter::Own => "Propios",
            TopicFilter::Competitor => "Competencia",
            TopicFilter::All => "Todos",
        }
    }
}

/// Body of `POST /medios`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMedium {
    pub nombre: String,
    pub url: String,
    pub tipo: MediumKind,
}

/// Successful reply of `POST /medios`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MediumCreated {
    pub id: serde_json::Value,
}

impl MediumCreated {
    pub fn id_text(&self) -> String {
        match &self.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Successful reply of `POST /iniciar-escaneo`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScanStarted {
    #[serde(default)]
    pub mensaje: String,
}
