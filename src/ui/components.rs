/// Reusable UI components

use crate::api::{ApiClient, ApiError};
use crate::counts::StatusCounts;
use crate::forms::Notice;
use crate::operations::{format_duration, sort_by_status};
use crate::topic::{Status, Topic, TopicFilter};
use patternfly_yew::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

const TABLE_ERROR_MESSAGE: &str = "Error al cargar los datos. Verifica la URL de la API.";
const EMPTY_TABLE_MESSAGE: &str = "No hay temas disponibles para mostrar";
const UNCONFIGURED_TABLE_MESSAGE: &str = "Configura la URL de la API en Ajustes para ver los temas";

#[derive(Properties, PartialEq)]
pub struct StatusTagProps {
    pub status: Status,
}

#[function_component(StatusTag)]
pub fn status_tag(props: &StatusTagProps) -> Html {
    let label = props.status.label();

    html! {
        <span class={classes!("tag", label)}>{label.to_uppercase()}</span>
    }
}

#[derive(Properties, PartialEq)]
pub struct CountSummaryProps {
    pub counts: StatusCounts,
}

#[function_component(CountSummary)]
pub fn count_summary(props: &CountSummaryProps) -> Html {
    let counts = props.counts;

    html! {
        <div class="count-summary">
            <span class="tag rojo">{format!("Rojo: {}", counts.red)}</span>
            <span class="tag amarillo">{format!("Amarillo: {}", counts.yellow)}</span>
            <span class="tag verde">{format!("Verde: {}", counts.green)}</span>
            <span class="count-total">{format!("Total: {}", counts.total)}</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct NoticeViewProps {
    #[prop_or_default]
    pub notice: Option<Notice>,
}

#[function_component(NoticeView)]
pub fn notice_view(props: &NoticeViewProps) -> Html {
    match &props.notice {
        Some(Notice::Loading) => html! {
            <div class="loading-text-center">
                <Spinner />
            </div>
        },
        Some(Notice::Success(message)) => html! {
            <Alert r#type={AlertType::Success} title={message.clone()} inline={true}>
            </Alert>
        },
        Some(Notice::Error(message)) => html! {
            <Alert r#type={AlertType::Danger} title={message.clone()} inline={true}>
            </Alert>
        },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct TopicTableProps {
    pub topics: Vec<Topic>,
}

#[function_component(TopicTable)]
pub fn topic_table(props: &TopicTableProps) -> Html {
    html! {
        <table class="topic-table">
            <thead>
                <tr>
                    <th>{"Tema"}</th>
                    <th>{"Medio"}</th>
                    <th>{"Estado"}</th>
                    <th>{"Tiempo"}</th>
                    <th>{"Última Vez"}</th>
                    <th>{"Acciones"}</th>
                </tr>
            </thead>
            <tbody>
                {for props.topics.iter().map(|topic| html! {
                    <tr>
                        <td>{&topic.name}</td>
                        <td>{topic.medium_label()}</td>
                        <td><StatusTag status={topic.status()} /></td>
                        <td>{format_duration(topic.duration_hours)}</td>
                        <td>{format_last_seen(&topic.last_seen)}</td>
                        <td>
                            <a href={topic.url.clone()} target="_blank" rel="noopener noreferrer">{"Ver noticia"}</a>
                        </td>
                    </tr>
                })}
            </tbody>
        </table>
    }
}

#[derive(Properties, PartialEq)]
pub struct TopicPanelProps {
    pub filter: TopicFilter,
    pub api_url: Option<String>,
    /// Bumped by the parent to force a reload
    pub reload: u32,
}

#[derive(Debug, Clone, PartialEq)]
enum PanelState {
    Unconfigured,
    Loading,
    Empty,
    Loaded(Vec<Topic>),
    Error(String),
}

/// A client to fetch with, or the state to show when no request can be made
fn panel_client(client: Result<ApiClient, ApiError>) -> Result<ApiClient, PanelState> {
    match client {
        Ok(client) => Ok(client),
        Err(ApiError::NotConfigured) => Err(PanelState::Unconfigured),
        Err(e) => Err(PanelState::Error(e.to_string())),
    }
}

fn panel_loaded(result: Result<Vec<Topic>, ApiError>) -> PanelState {
    match result {
        Ok(topics) if topics.is_empty() => PanelState::Empty,
        Ok(topics) => PanelState::Loaded(sort_by_status(&topics)),
        Err(_) => PanelState::Error(TABLE_ERROR_MESSAGE.to_string()),
    }
}

/// One filtered view of the topic list; fetches on mount and whenever the
/// API URL or reload counter changes
#[function_component(TopicPanel)]
pub fn topic_panel(props: &TopicPanelProps) -> Html {
    let state = use_state(|| PanelState::Unconfigured);

    {
        let state = state.clone();
        let filter = props.filter;

        use_effect_with((props.api_url.clone(), props.reload), move |(api_url, _)| {
            // Set when this fetch is superseded; its response is then dropped
            let stale = Rc::new(Cell::new(false));

            match panel_client(ApiClient::new(api_url.as_deref())) {
                Ok(client) => {
                    state.set(PanelState::Loading);
                    let stale = stale.clone();

                    spawn_local(async move {
                        let result = client.topics(filter).await;
                        if stale.get() {
                            log::debug!("Discarding superseded {:?} response", filter);
                            return;
                        }
                        if let Err(e) = &result {
                            log::error!("Failed to load {:?} topics: {}", filter, e);
                        }
                        state.set(panel_loaded(result));
                    });
                }
                Err(shown) => state.set(shown),
            }

            move || stale.set(true)
        });
    }

    match &*state {
        PanelState::Unconfigured => html! {
            <p class="notice">{UNCONFIGURED_TABLE_MESSAGE}</p>
        },
        PanelState::Loading => html! {
            <div class="loading-text-center">
                <Spinner />
            </div>
        },
        PanelState::Empty => html! {
            <p>{EMPTY_TABLE_MESSAGE}</p>
        },
        PanelState::Loaded(topics) => html! {
            <TopicTable topics={topics.clone()} />
        },
        PanelState::Error(message) => html! {
            <p class="error">{message}</p>
        },
    }
}

/// Locale rendering of the server timestamp; falls back to the raw text
fn format_last_seen(raw: &str) -> String {
    let date = js_sys::Date::new(&JsValue::from_str(raw));
    if date.get_time().is_nan() {
        raw.to_string()
    } else {
        date.to_locale_string("default", &JsValue::UNDEFINED).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_topic(name: &str, status: &str) -> Topic {
        serde_json::from_value(serde_json::json!({
            "nombre": name,
            "estado": status,
        }))
        .unwrap()
    }

    #[test]
    fn test_unconfigured_panel_builds_no_client() {
        assert_eq!(panel_client(ApiClient::new(None)), Err(PanelState::Unconfigured));
        assert_eq!(panel_client(ApiClient::new(Some("  "))), Err(PanelState::Unconfigured));
    }

    #[test]
    fn test_invalid_url_panel_shows_reason() {
        let state = panel_client(ApiClient::new(Some("ftp://radar.example")));

        assert_eq!(
            state,
            Err(PanelState::Error("URL de API no válida: ftp://radar.example".to_string()))
        );
    }

    #[test]
    fn test_configured_panel_gets_client() {
        let client = panel_client(ApiClient::new(Some("http://localhost:5000/api"))).unwrap();
        assert_eq!(client.base().as_str(), "http://localhost:5000/api");
    }

    #[test]
    fn test_failed_fetch_shows_table_error() {
        let network = panel_loaded(Err(ApiError::Network("Failed to fetch".to_string())));
        let status = panel_loaded(Err(ApiError::Status(500)));

        assert_eq!(network, PanelState::Error(TABLE_ERROR_MESSAGE.to_string()));
        assert_eq!(status, PanelState::Error(TABLE_ERROR_MESSAGE.to_string()));
    }

    #[test]
    fn test_empty_list_shows_empty_message() {
        assert_eq!(panel_loaded(Ok(Vec::new())), PanelState::Empty);
    }

    #[test]
    fn test_loaded_list_is_sorted() {
        let topics = vec![
            create_test_topic("green", "verde"),
            create_test_topic("red", "rojo"),
            create_test_topic("yellow", "amarillo"),
        ];

        let state = panel_loaded(Ok(topics));

        match state {
            PanelState::Loaded(sorted) => {
                let names: Vec<&str> = sorted.iter().map(|t| t.name.as_str()).collect();
                assert_eq!(names, vec!["red", "yellow", "green"]);
            }
            other => panic!("expected loaded topics, got {:?}", other),
        }
    }
}
