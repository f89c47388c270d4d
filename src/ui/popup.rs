/// Popup UI for Topic Radar extension

use crate::api::ApiClient;
use crate::background::request_refresh;
use crate::bridge;
use crate::counts::StatusCounts;
use crate::forms::{self, MediumDraft, Notice, SubmitOutcome};
use crate::storage;
use crate::topic::{MediumKind, TopicFilter};
use crate::ui::components::{CountSummary, NoticeView, TopicPanel};
use patternfly_yew::prelude::*;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq)]
enum ActiveTab {
    Topics(TopicFilter),
    Media,
    Settings,
}

impl ActiveTab {
    fn title(&self) -> &'static str {
        match self {
            ActiveTab::Topics(filter) => filter.title(),
            ActiveTab::Media => "Medios",
            ActiveTab::Settings => "Ajustes",
        }
    }
}

const TABS: [ActiveTab; 5] = [
    ActiveTab::Topics(TopicFilter::Own),
    ActiveTab::Topics(TopicFilter::Competitor),
    ActiveTab::Topics(TopicFilter::All),
    ActiveTab::Media,
    ActiveTab::Settings,
];

/// Counter shared by the topic panels; each bump reloads all of them
#[derive(Default, PartialEq)]
struct ReloadCounter(u32);

impl Reducible for ReloadCounter {
    type Action = ();

    fn reduce(self: Rc<Self>, _: ()) -> Rc<Self> {
        Rc::new(ReloadCounter(self.0.wrapping_add(1)))
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let api_url = use_state(|| None::<String>);
    let api_input = use_state(String::new);
    let reload = use_reducer(ReloadCounter::default);
    let active_tab = use_state(|| ActiveTab::Topics(TopicFilter::Own));
    let counts = use_state(|| None::<StatusCounts>);
    let refresh_notice = use_state(|| None::<Notice>);
    let draft = use_state(MediumDraft::default);
    let add_notice = use_state(|| None::<Notice>);
    let scan_notice = use_state(|| None::<Notice>);

    // Load saved settings on mount
    {
        let api_url = api_url.clone();
        let api_input = api_input.clone();
        let counts = counts.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match storage::load_api_url().await {
                    Ok(Some(url)) => {
                        api_input.set(url.clone());
                        api_url.set(Some(url));
                    }
                    Ok(None) => log::info!("API URL not configured yet"),
                    Err(e) => log::error!("Failed to load settings: {}", e),
                }
                match storage::load_counts().await {
                    Ok(cached) => counts.set(cached),
                    Err(e) => log::warn!("Failed to load cached counts: {}", e),
                }
            });
            || ()
        });
    }

    let on_api_input = {
        let api_input = api_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                api_input.set(input.value());
            }
        })
    };

    // Persist on change; the background restarts its timer from the storage event
    let on_api_change = {
        let api_url = api_url.clone();
        let api_input = api_input.clone();
        let reload = reload.clone();

        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let edit = forms::api_url_edit(&input.value());
                let text = edit.text;
                api_input.set(text.clone());
                api_url.set(edit.api_url);
                if edit.reload {
                    reload.dispatch(());
                }

                spawn_local(async move {
                    match storage::save_api_url(&text).await {
                        Ok(()) => log::info!("API URL saved"),
                        Err(e) => log::error!("Failed to save API URL: {}", e),
                    }
                });
            }
        })
    };

    let on_refresh = {
        let reload = reload.clone();
        let counts = counts.clone();
        let refresh_notice = refresh_notice.clone();

        Callback::from(move |_: MouseEvent| {
            reload.dispatch(());
            refresh_notice.set(Some(Notice::Loading));

            let counts = counts.clone();
            let refresh_notice = refresh_notice.clone();
            spawn_local(async move {
                match request_refresh().await {
                    Ok(()) => {
                        match storage::load_counts().await {
                            Ok(cached) => counts.set(cached),
                            Err(e) => log::warn!("Failed to load cached counts: {}", e),
                        }
                        refresh_notice.set(None);
                    }
                    Err(e) => {
                        log::error!("Refresh failed: {}", e);
                        refresh_notice.set(Some(Notice::Error(forms::error_text(&e))));
                    }
                }
            });
        })
    };

    let on_name_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                draft.set(MediumDraft {
                    name: input.value(),
                    ..(*draft).clone()
                });
            }
        })
    };

    let on_url_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                draft.set(MediumDraft {
                    url: input.value(),
                    ..(*draft).clone()
                });
            }
        })
    };

    let on_kind_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                if let Some(kind) = MediumKind::from_param(&select.value()) {
                    draft.set(MediumDraft {
                        kind,
                        ..(*draft).clone()
                    });
                }
            }
        })
    };

    let on_add_medium = {
        let api_url = api_url.clone();
        let draft = draft.clone();
        let add_notice = add_notice.clone();
        let reload = reload.clone();

        Callback::from(move |_: MouseEvent| {
            let medium = match draft.validate(api_url.is_some()) {
                Ok(medium) => medium,
                Err(notice) => {
                    add_notice.set(Some(notice));
                    return;
                }
            };
            let client = match ApiClient::new(api_url.as_deref()) {
                Ok(client) => client,
                Err(e) => {
                    add_notice.set(Some(Notice::Error(forms::error_text(&e))));
                    return;
                }
            };

            add_notice.set(Some(Notice::Loading));

            let draft = draft.clone();
            let add_notice = add_notice.clone();
            let reload = reload.clone();
            spawn_local(async move {
                let outcome = forms::medium_outcome(client.add_medium(&medium).await);
                if outcome.clear_inputs {
                    draft.set(draft.cleared());
                }
                apply_outcome(outcome, add_notice, reload).await;
            });
        })
    };

    let on_scan = {
        let api_url = api_url.clone();
        let scan_notice = scan_notice.clone();
        let reload = reload.clone();

        Callback::from(move |_: MouseEvent| {
            let client = match ApiClient::new(api_url.as_deref()) {
                Ok(client) => client,
                Err(e) => {
                    scan_notice.set(Some(Notice::Error(forms::error_text(&e))));
                    return;
                }
            };

            scan_notice.set(Some(Notice::Loading));

            let scan_notice = scan_notice.clone();
            let reload = reload.clone();
            spawn_local(async move {
                let outcome = forms::scan_outcome(client.start_scan().await);
                apply_outcome(outcome, scan_notice, reload).await;
            });
        })
    };

    // Tab click handlers
    let on_tab_click = {
        let active_tab = active_tab.clone();
        move |tab: ActiveTab| {
            let active_tab = active_tab.clone();
            Callback::from(move |_| {
                active_tab.set(tab);
            })
        }
    };

    let adding = matches!(*add_notice, Some(Notice::Loading));
    let scanning = matches!(*scan_notice, Some(Notice::Loading));
    let refreshing = matches!(*refresh_notice, Some(Notice::Loading));

    html! {
        <div class="padding-20">
            <div class="popup-header">
                <h1 class="popup-title">{"Topic Radar"}</h1>
                <Button onclick={on_refresh} disabled={refreshing} variant={ButtonVariant::Secondary}>
                    {"Actualizar"}
                </Button>
            </div>

            if let Some(cached) = *counts {
                <CountSummary counts={cached} />
            }
            <NoticeView notice={(*refresh_notice).clone()} />

            // Tab navigation
            <div class="pf-v5-c-tabs tabs-nav">
                <ul class="pf-v5-c-tabs__list">
                    {for TABS.iter().map(|tab| html! {
                        <li class={if *active_tab == *tab { "pf-v5-c-tabs__item pf-m-current" } else { "pf-v5-c-tabs__item" }}>
                            <button
                                class="pf-v5-c-tabs__link"
                                onclick={on_tab_click(*tab)}
                            >
                                <span class="pf-v5-c-tabs__item-text">{tab.title()}</span>
                            </button>
                        </li>
                    })}
                </ul>
            </div>

            // Topic panels stay mounted so all three load together
            {for TopicFilter::ALL.iter().map(|filter| html! {
                <div class="tab-pane-content" hidden={*active_tab != ActiveTab::Topics(*filter)}>
                    <TopicPanel
                        filter={*filter}
                        api_url={(*api_url).clone()}
                        reload={reload.0}
                    />
                </div>
            })}

            <div class="tab-pane-content" hidden={*active_tab != ActiveTab::Media}>
                <div class="flex-column-gap">
                    <h2 class="section-title">{"Agregar medio"}</h2>
                    <input
                        type="text"
                        placeholder="Nombre del medio"
                        value={draft.name.clone()}
                        oninput={on_name_input}
                    />
                    <input
                        type="url"
                        placeholder="https://medio.example"
                        value={draft.url.clone()}
                        oninput={on_url_input}
                    />
                    <select onchange={on_kind_change}>
                        {for MediumKind::ALL.iter().map(|kind| html! {
                            <option value={kind.as_param()} selected={draft.kind == *kind}>
                                {kind.label()}
                            </option>
                        })}
                    </select>
                    <Button onclick={on_add_medium} disabled={adding} variant={ButtonVariant::Primary} block={true}>
                        {"Agregar medio"}
                    </Button>
                    <NoticeView notice={(*add_notice).clone()} />

                    <h2 class="section-title">{"Escaneo manual"}</h2>
                    <Button onclick={on_scan} disabled={scanning} variant={ButtonVariant::Secondary} block={true}>
                        {"Iniciar escaneo"}
                    </Button>
                    <NoticeView notice={(*scan_notice).clone()} />
                </div>
            </div>

            <div class="tab-pane-content" hidden={*active_tab != ActiveTab::Settings}>
                <div class="flex-column-gap">
                    <label for="apiUrl">{"URL de la API"}</label>
                    <input
                        id="apiUrl"
                        type="url"
                        placeholder="http://localhost:5000/api"
                        value={(*api_input).clone()}
                        oninput={on_api_input}
                        onchange={on_api_change}
                    />
                </div>
            </div>

            <p class="footer-popup">
                {"Topic Radar v0.1.0"}
            </p>
        </div>
    }
}

// Helper functions

async fn apply_outcome(
    outcome: SubmitOutcome,
    notice: UseStateHandle<Option<Notice>>,
    reload: UseReducerHandle<ReloadCounter>,
) {
    notice.set(Some(outcome.notice));

    match outcome.reload_after_ms {
        Some(0) => reload.dispatch(()),
        Some(ms) => {
            if let Err(e) = bridge::sleep(ms).await {
                log::warn!("Delayed reload timer failed: {}", bridge::describe(&e));
            }
            reload.dispatch(());
        }
        None => {}
    }
}
