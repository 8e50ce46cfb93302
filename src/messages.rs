/// Runtime message model exchanged between the popup and the background worker
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::{CoordinatorError, ErrorKind, Result};

/// A request sent over `chrome.runtime.sendMessage`, keyed by `action`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    CaptureTab {
        #[serde(rename = "tabId")]
        tab_id: i32,
    },
    CheckBookmark {
        url: String,
    },
    IsBookmarked {
        url: String,
    },
    UpdateContextMenu {
        title: String,
        enabled: bool,
    },
}

impl Request {
    pub const ACTIONS: [&'static str; 4] = [
        "captureTab",
        "checkBookmark",
        "isBookmarked",
        "updateContextMenu",
    ];

    pub fn action(&self) -> &'static str {
        match self {
            Request::CaptureTab { .. } => "captureTab",
            Request::CheckBookmark { .. } => "checkBookmark",
            Request::IsBookmarked { .. } => "isBookmarked",
            Request::UpdateContextMenu { .. } => "updateContextMenu",
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Request::CheckBookmark { url } | Request::IsBookmarked { url } => {
                Url::parse(url).map_err(|e| {
                    CoordinatorError::MalformedRequest(format!(
                        "url must be an absolute URL ({}): {:?}",
                        e, url
                    ))
                })?;
                Ok(())
            }
            Request::CaptureTab { .. } | Request::UpdateContextMenu { .. } => Ok(()),
        }
    }
}

/// Validate an untyped inbound message into a [`Request`].
///
/// Nothing is sent to the host unless this succeeds:
/// - missing or non-string `action` → `MalformedRequest`
/// - an action outside [`Request::ACTIONS`] → `UnsupportedAction`
/// - missing fields or wrong field types → `MalformedRequest` with serde's description
pub fn parse_request(raw: &Value) -> Result<Request> {
    let action = raw
        .get("action")
        .ok_or_else(|| CoordinatorError::MalformedRequest("missing field `action`".to_string()))?
        .as_str()
        .ok_or_else(|| CoordinatorError::MalformedRequest("`action` must be a string".to_string()))?;

    if !Request::ACTIONS.contains(&action) {
        return Err(CoordinatorError::UnsupportedAction(action.to_string()));
    }

    let request: Request = serde_json::from_value(raw.clone())
        .map_err(|e| CoordinatorError::MalformedRequest(format!("{}: {}", action, e)))?;
    request.validate()?;

    Ok(request)
}

/// Exactly one of these is produced per request.
///
/// Untagged on the wire: `{screenshotUrl}`, `{bookmarked}`, `{error, kind}` or `{}`.
/// `Empty` must stay last and only accepts an object with no fields, so a reply
/// that fails to parse as anything else is an error rather than a success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Screenshot {
        #[serde(rename = "screenshotUrl")]
        screenshot_url: String,
    },
    Bookmarked {
        bookmarked: bool,
    },
    Failure {
        error: String,
        #[serde(default, deserialize_with = "lenient_kind")]
        kind: ErrorKind,
    },
    Empty(EmptyReply),
}

/// The `{}` reply
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmptyReply {}

/// Kinds this build does not know (a newer worker) still parse as a failure
fn lenient_kind<'de, D>(deserializer: D) -> std::result::Result<ErrorKind, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

impl Response {
    pub fn empty() -> Response {
        Response::Empty(EmptyReply {})
    }

    pub fn failure(err: &CoordinatorError) -> Response {
        Response::Failure {
            error: err.to_string(),
            kind: err.kind(),
        }
    }

    /// Turn a failure payload back into an error, leaving successes untouched
    pub fn into_result(self) -> Result<Response> {
        match self {
            Response::Failure { error, kind } => Err(CoordinatorError::Remote {
                kind,
                message: error,
            }),
            other => Ok(other),
        }
    }
}
