/// Background service worker bindings: Chrome APIs in, event entry points out
use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::config::{CONFIG_STORAGE_KEY, CoordinatorConfig};
use crate::convert::{from_js, host_error, to_js};
use crate::coordinator::Coordinator;
use crate::error::{CoordinatorError, HostError};
use crate::host::{BookmarkNode, CaptureOptions, HostApi, MenuClick, MenuItemSpec, TabInfo, TabUpdate};
use crate::menu::ContextMenuState;
use crate::messages::Response;

// Import JS bridge functions
#[wasm_bindgen(module = "/js/background_api.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn searchBookmarks(url: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getTab(tab_id: i32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn captureVisibleTab(window_id: i32, options: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn createContextMenu(item: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn updateContextMenu(id: &str, props: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = sleep)]
    async fn sleep_ms(ms: u32) -> Result<JsValue, JsValue>;
}

/// The real browser behind [`HostApi`]
pub struct ChromeHost;

#[async_trait(?Send)]
impl HostApi for ChromeHost {
    async fn search_bookmarks(&self, url: &str) -> Result<Vec<BookmarkNode>, HostError> {
        let nodes = searchBookmarks(url).await.map_err(host_error)?;
        from_js(nodes)
    }

    async fn get_tab(&self, tab_id: i32) -> Result<TabInfo, HostError> {
        let tab = getTab(tab_id).await.map_err(host_error)?;
        from_js(tab)
    }

    async fn capture_visible_tab(
        &self,
        window_id: i32,
        options: CaptureOptions,
    ) -> Result<String, HostError> {
        let data_uri = captureVisibleTab(window_id, to_js(&options)?)
            .await
            .map_err(host_error)?;
        data_uri
            .as_string()
            .ok_or_else(|| HostError::new("captureVisibleTab returned no image"))
    }

    async fn create_context_menu(&self, item: &MenuItemSpec) -> Result<(), HostError> {
        createContextMenu(to_js(item)?).await.map_err(host_error)?;
        Ok(())
    }

    async fn update_context_menu(&self, id: &str, state: &ContextMenuState) -> Result<(), HostError> {
        updateContextMenu(id, to_js(state)?).await.map_err(host_error)?;
        Ok(())
    }

    async fn sleep(&self, ms: u32) {
        let _ = sleep_ms(ms).await;
    }
}

thread_local! {
    static COORDINATOR: RefCell<Option<Rc<Coordinator<ChromeHost>>>> = const { RefCell::new(None) };
}

/// Events can arrive before `init_background` finishes; those use default config
fn coordinator() -> Rc<Coordinator<ChromeHost>> {
    COORDINATOR.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(|| Rc::new(Coordinator::new(ChromeHost, CoordinatorConfig::new())))
            .clone()
    })
}

async fn load_config() -> Result<CoordinatorConfig, CoordinatorError> {
    let stored = getStorage(CONFIG_STORAGE_KEY)
        .await
        .map_err(host_error)?;
    let stored: Option<Value> = from_js(stored)?;
    CoordinatorConfig::from_storage(stored)
}

#[wasm_bindgen]
pub async fn init_background() {
    let config = load_config().await.unwrap_or_else(|err| {
        log::warn!("Using default config: {}", err);
        CoordinatorConfig::new()
    });
    if let Ok(level) = config.level_filter() {
        log::set_max_level(level);
    }

    log::info!(
        "Background coordinator ready (policy {:?}, host timeout {}ms)",
        config.menu_policy,
        config.host_timeout_ms
    );
    COORDINATOR.with(|slot| {
        *slot.borrow_mut() = Some(Rc::new(Coordinator::new(ChromeHost, config)));
    });
}

/// `chrome.runtime.onMessage`: resolves to exactly one response object
#[wasm_bindgen]
pub async fn handle_message(message: JsValue) -> Result<JsValue, JsValue> {
    let response = match from_js::<Value>(message) {
        Ok(raw) => coordinator().dispatch(&raw).await,
        Err(err) => Response::failure(&CoordinatorError::MalformedRequest(err.to_string())),
    };
    to_js(&response).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub async fn handle_installed() {
    if let Err(err) = coordinator().on_installed().await {
        log::error!("Error creating context menu: {}", err);
    }
}

#[derive(Deserialize)]
struct ChangeInfo {
    #[serde(default)]
    status: Option<String>,
}

#[wasm_bindgen]
pub async fn handle_tab_updated(tab_id: i32, change_info: JsValue, tab: JsValue) {
    let update = from_js::<ChangeInfo>(change_info).and_then(|change| {
        Ok(TabUpdate {
            tab_id,
            status: change.status,
            tab: from_js(tab)?,
        })
    });

    let result = match update {
        Ok(update) => coordinator().on_tab_updated(&update).await,
        Err(err) => Err(err.into()),
    };
    if let Err(err) = result {
        log::error!("Error updating context menu for tab {}: {}", tab_id, err);
    }
}

#[wasm_bindgen]
pub fn handle_menu_click(info: JsValue) {
    match from_js::<MenuClick>(info) {
        Ok(click) => coordinator().on_menu_clicked(&click),
        Err(err) => log::warn!("Ignoring context menu click: {}", err),
    }
}
