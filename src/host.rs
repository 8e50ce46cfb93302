/// Host (browser) capabilities consumed by the background coordinator
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::HostError;
use crate::menu::ContextMenuState;

/// Information about a browser tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: i32,
    pub window_id: i32,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub active: bool,
}

impl TabInfo {
    pub fn new(id: i32, window_id: i32, url: Option<String>, title: String, active: bool) -> TabInfo {
        TabInfo {
            id,
            window_id,
            url,
            title,
            active,
        }
    }
}

/// A node returned by `chrome.bookmarks.search`; folders have no url
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkNode {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl BookmarkNode {
    /// Chrome stores urls canonicalised (`https://example.com` becomes
    /// `https://example.com/`), so both sides are compared after parsing.
    /// Unparseable urls fall back to a plain string comparison.
    pub fn matches_url(&self, url: &str) -> bool {
        let Some(stored) = self.url.as_deref() else {
            return false;
        };
        match (Url::parse(stored), Url::parse(url)) {
            (Ok(stored), Ok(wanted)) => stored == wanted,
            _ => stored == url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureOptions {
    pub format: ImageFormat,
    pub quality: u8,
}

impl CaptureOptions {
    /// Screenshots are always lossy JPEG at quality 90
    pub const SCREENSHOT: CaptureOptions = CaptureOptions {
        format: ImageFormat::Jpeg,
        quality: 90,
    };
}

/// Properties passed to `chrome.contextMenus.create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemSpec {
    pub id: String,
    pub title: String,
    pub contexts: Vec<String>,
}

/// Arguments of a `chrome.tabs.onUpdated` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabUpdate {
    pub tab_id: i32,
    #[serde(default)]
    pub status: Option<String>,
    pub tab: TabInfo,
}

impl TabUpdate {
    /// The page finished loading in the active tab; returns its url
    pub fn completed_active_url(&self) -> Option<&str> {
        if self.status.as_deref() == Some("complete") && self.tab.active {
            self.tab.url.as_deref()
        } else {
            None
        }
    }
}

/// Payload of a `chrome.contextMenus.onClicked` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuClick {
    pub menu_item_id: String,
    #[serde(default)]
    pub link_url: Option<String>,
}

/// Privileged browser APIs the coordinator depends on.
///
/// Every call may suspend; the coordinator bounds each one with [`HostApi::sleep`].
/// Futures are not `Send`: everything runs on the worker's single event loop.
#[async_trait(?Send)]
pub trait HostApi {
    async fn search_bookmarks(&self, url: &str) -> Result<Vec<BookmarkNode>, HostError>;

    async fn get_tab(&self, tab_id: i32) -> Result<TabInfo, HostError>;

    /// Returns the image as a data URI
    async fn capture_visible_tab(
        &self,
        window_id: i32,
        options: CaptureOptions,
    ) -> Result<String, HostError>;

    async fn create_context_menu(&self, item: &MenuItemSpec) -> Result<(), HostError>;

    async fn update_context_menu(&self, id: &str, state: &ContextMenuState) -> Result<(), HostError>;

    /// Resolve after `ms` milliseconds
    async fn sleep(&self, ms: u32);
}
