/// Popup UI: preview of the current tab and its bookmark status

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use patternfly_yew::prelude::*;
use crate::client;
use crate::host::TabInfo;

#[derive(Clone, PartialEq)]
enum PopupState {
    Idle,
    Loading(String),
    Error(String),
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| PopupState::Loading("Reading current tab...".to_string()));
    let current_tab = use_state(|| None::<TabInfo>);
    let screenshot = use_state(|| None::<String>);
    let bookmarked = use_state(|| None::<bool>);

    // On open: resolve the active tab, then request its preview and bookmark status
    {
        let state = state.clone();
        let current_tab = current_tab.clone();
        let screenshot = screenshot.clone();
        let bookmarked = bookmarked.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                let tab = match client::active_tab().await {
                    Ok(tab) => tab,
                    Err(e) => {
                        state.set(PopupState::Error(format!("No active tab: {}", e)));
                        return;
                    }
                };
                current_tab.set(Some(tab.clone()));

                match client::capture_tab(tab.id).await {
                    Ok(url) => screenshot.set(Some(url)),
                    Err(e) => log::error!("Error capturing tab: {}", e),
                }

                if let Some(url) = &tab.url {
                    match client::is_bookmarked(url).await {
                        Ok(status) => bookmarked.set(Some(status)),
                        Err(e) => {
                            state.set(PopupState::Error(format!("Bookmark lookup failed: {}", e)));
                            return;
                        }
                    }
                }

                state.set(PopupState::Idle);
            });
            || ()
        });
    }

    let tab_url = (*current_tab).as_ref().and_then(|tab| tab.url.clone());

    // Re-sync the context menu for this page, then re-read the status it settled on
    let on_refresh = {
        let state = state.clone();
        let bookmarked = bookmarked.clone();
        let tab_url = tab_url.clone();

        Callback::from(move |_| {
            let Some(url) = tab_url.clone() else {
                return;
            };
            let state = state.clone();
            let bookmarked = bookmarked.clone();

            state.set(PopupState::Loading("Checking bookmark status...".to_string()));

            spawn_local(async move {
                if let Err(e) = client::check_bookmark(&url).await {
                    state.set(PopupState::Error(format!("Check failed: {}", e)));
                    return;
                }
                match client::is_bookmarked(&url).await {
                    Ok(status) => {
                        bookmarked.set(Some(status));
                        state.set(PopupState::Idle);
                    }
                    Err(e) => {
                        state.set(PopupState::Error(format!("Bookmark lookup failed: {}", e)));
                    }
                }
            });
        })
    };

    let is_busy = !matches!(*state, PopupState::Idle);

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Bookmark Helper"}</h1>

            // Status display
            {match &*state {
                PopupState::Loading(msg) => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{msg}</p>
                    </div>
                },
                PopupState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                PopupState::Idle => html! {}
            }}

            if let Some(tab) = (*current_tab).clone() {
                <div class="tab-details">
                    if let Some(src) = (*screenshot).clone() {
                        <img class="tab-preview" src={src} alt="Page Screenshot" />
                    }
                    <p class="tab-title">{tab.title}</p>
                    <p class="tab-url">{tab.url.unwrap_or_default()}</p>
                </div>
            }

            {match *bookmarked {
                Some(true) => html! {
                    <Alert r#type={AlertType::Success} title={"URL is already bookmarked"} inline={true}>
                    </Alert>
                },
                Some(false) => html! {
                    <Alert r#type={AlertType::Info} title={"Not bookmarked yet"} inline={true}>
                    </Alert>
                },
                None => html! {}
            }}

            <div class="flex-column-gap">
                <Button onclick={on_refresh} disabled={is_busy || tab_url.is_none()} variant={ButtonVariant::Secondary} block={true}>
                    {"Refresh bookmark status"}
                </Button>
            </div>

            <p class="footer-popup">
                {"Bookmark Helper v0.1.0"}
            </p>
        </div>
    }
}
