/// Popup-side client for the background coordinator
use wasm_bindgen::prelude::*;

use crate::convert::{from_js, js_error_message, to_js};
use crate::error::CoordinatorError;
use crate::host::TabInfo;
use crate::messages::{Request, Response};
use crate::timeout::bounded;

// Import JS bridge functions
#[wasm_bindgen(module = "/js/popup_api.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getActiveTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn sendRuntimeMessage(message: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = sleep)]
    async fn sleep_ms(ms: u32) -> Result<JsValue, JsValue>;
}

/// How long the popup waits for the background worker to answer
pub const REQUEST_TIMEOUT_MS: u32 = 15_000;

pub async fn active_tab() -> Result<TabInfo, CoordinatorError> {
    let tab = getActiveTab()
        .await
        .map_err(|e| CoordinatorError::Transport(js_error_message(&e)))?;
    Ok(from_js(tab)?)
}

/// Send one request and wait (bounded) for its single response
pub async fn send(request: &Request) -> Result<Response, CoordinatorError> {
    let message = to_js(request)?;
    let timer = async {
        let _ = sleep_ms(REQUEST_TIMEOUT_MS).await;
    };

    let reply = bounded(sendRuntimeMessage(message), timer)
        .await
        .ok_or(CoordinatorError::Timeout {
            operation: request.action(),
            timeout_ms: REQUEST_TIMEOUT_MS,
        })?
        .map_err(|e| CoordinatorError::Transport(js_error_message(&e)))?;

    let response: Response = from_js(reply).map_err(|e| CoordinatorError::Transport(e.to_string()))?;
    response.into_result()
}

pub async fn capture_tab(tab_id: i32) -> Result<String, CoordinatorError> {
    expect_screenshot(send(&Request::CaptureTab { tab_id }).await?)
}

pub async fn is_bookmarked(url: &str) -> Result<bool, CoordinatorError> {
    let request = Request::IsBookmarked {
        url: url.to_string(),
    };
    expect_bookmarked(send(&request).await?)
}

pub async fn check_bookmark(url: &str) -> Result<(), CoordinatorError> {
    let request = Request::CheckBookmark {
        url: url.to_string(),
    };
    expect_empty("checkBookmark", send(&request).await?)
}

fn unexpected(action: &str, response: &Response) -> CoordinatorError {
    CoordinatorError::Transport(format!("unexpected reply to {}: {:?}", action, response))
}

fn expect_screenshot(response: Response) -> Result<String, CoordinatorError> {
    match response {
        Response::Screenshot { screenshot_url } => Ok(screenshot_url),
        other => Err(unexpected("captureTab", &other)),
    }
}

fn expect_bookmarked(response: Response) -> Result<bool, CoordinatorError> {
    match response {
        Response::Bookmarked { bookmarked } => Ok(bookmarked),
        other => Err(unexpected("isBookmarked", &other)),
    }
}

fn expect_empty(action: &str, response: Response) -> Result<(), CoordinatorError> {
    match response {
        Response::Empty(_) => Ok(()),
        other => Err(unexpected(action, &other)),
    }
}
