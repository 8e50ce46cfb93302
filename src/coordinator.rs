/// Background coordinator: the single owner of host-API access and menu state
use std::cell::RefCell;
use std::future::Future;

use serde_json::Value;

use crate::config::CoordinatorConfig;
use crate::error::{CoordinatorError, HostError, Result};
use crate::host::{CaptureOptions, HostApi, MenuClick, TabUpdate};
use crate::menu::{
    CheckOutcome, CheckPhase, CheckToken, ContextMenuState, MENU_ITEM_ID, MenuTracker,
    default_menu_item,
};
use crate::messages::{Request, Response, parse_request};
use crate::timeout::bounded;

pub struct Coordinator<H: HostApi> {
    host: H,
    config: CoordinatorConfig,
    menu: RefCell<MenuTracker>,
}

impl<H: HostApi> Coordinator<H> {
    pub fn new(host: H, config: CoordinatorConfig) -> Self {
        Coordinator {
            host,
            config,
            menu: RefCell::new(MenuTracker::new()),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn menu_state(&self) -> ContextMenuState {
        self.menu.borrow().state().clone()
    }

    pub fn check_phase(&self) -> CheckPhase {
        self.menu.borrow().phase()
    }

    /// Entry point for every runtime message. Always yields exactly one response.
    pub async fn dispatch(&self, raw: &Value) -> Response {
        match parse_request(raw) {
            Ok(request) => self.handle(request).await,
            Err(err) => {
                log::warn!("Rejected message {}: {}", raw, err);
                Response::failure(&err)
            }
        }
    }

    pub async fn handle(&self, request: Request) -> Response {
        let action = request.action();
        log::debug!("Handling {}", action);

        let result = match request {
            Request::CaptureTab { tab_id } => self
                .capture_tab(tab_id)
                .await
                .map(|screenshot_url| Response::Screenshot { screenshot_url }),
            Request::CheckBookmark { url } => {
                self.check_bookmark(&url).await.map(|_| Response::empty())
            }
            Request::IsBookmarked { url } => self
                .is_bookmarked(&url)
                .await
                .map(|bookmarked| Response::Bookmarked { bookmarked }),
            Request::UpdateContextMenu { title, enabled } => self
                .update_context_menu(ContextMenuState::new(title, enabled))
                .await
                .map(|_| Response::empty()),
        };

        result.unwrap_or_else(|err| {
            log::error!("Error handling {}: {}", action, err);
            Response::failure(&err)
        })
    }

    /// Screenshot of the window owning `tab_id`, as a JPEG data URI
    pub async fn capture_tab(&self, tab_id: i32) -> Result<String> {
        let tab = self.call("tabs.get", self.host.get_tab(tab_id)).await?;
        let screenshot = self
            .call(
                "tabs.captureVisibleTab",
                self.host.capture_visible_tab(tab.window_id, CaptureOptions::SCREENSHOT),
            )
            .await?;

        log::debug!("Captured tab {} ({} bytes)", tab_id, screenshot.len());
        Ok(screenshot)
    }

    /// True iff the store holds at least one entry whose url equals `url`,
    /// both compared in canonical form
    pub async fn is_bookmarked(&self, url: &str) -> Result<bool> {
        let matches = self.call("bookmarks.search", self.host.search_bookmarks(url)).await?;
        Ok(matches.iter().any(|node| node.matches_url(url)))
    }

    /// Disable the menu item, look up `url`, then settle the item's title.
    ///
    /// Lookup failures end in the error title and are not returned; only failed
    /// menu writes are. A check overtaken by a newer one skips the settle write.
    pub async fn check_bookmark(&self, url: &str) -> Result<CheckOutcome> {
        let token = self.menu.borrow_mut().issue();
        self.write_tracked(token, ContextMenuState::checking(), CheckPhase::Checking(token))
            .await?;

        let lookup = match self.is_bookmarked(url).await {
            Ok(bookmarked) => Some(bookmarked),
            Err(err) => {
                log::error!("Error checking bookmark status for {}: {}", url, err);
                None
            }
        };

        let settled = self
            .menu
            .borrow()
            .settlement(token, lookup, self.config.menu_policy);
        let Some((state, phase)) = settled else {
            log::debug!("Bookmark check for {} superseded", url);
            return Ok(CheckOutcome::Superseded);
        };
        self.write_tracked(token, state, phase).await?;

        Ok(match lookup {
            Some(true) => CheckOutcome::Bookmarked,
            Some(false) => CheckOutcome::NotBookmarked,
            None => CheckOutcome::LookupFailed,
        })
    }

    pub async fn update_context_menu(&self, state: ContextMenuState) -> Result<()> {
        let token = self.menu.borrow_mut().issue();
        self.write_tracked(token, state, CheckPhase::Idle).await
    }

    pub async fn on_installed(&self) -> Result<()> {
        let item = default_menu_item();
        self.call("contextMenus.create", self.host.create_context_menu(&item))
            .await?;
        self.menu.borrow_mut().reset();

        log::info!("Context menu item {:?} created", item.id);
        Ok(())
    }

    /// Re-check the menu when the active tab finishes loading
    pub async fn on_tab_updated(&self, update: &TabUpdate) -> Result<Option<CheckOutcome>> {
        match update.completed_active_url() {
            Some(url) => self.check_bookmark(url).await.map(Some),
            None => Ok(None),
        }
    }

    pub fn on_menu_clicked(&self, click: &MenuClick) {
        if click.menu_item_id == MENU_ITEM_ID {
            log::info!("Context menu item clicked. URL: {:?}", click.link_url);
        }
    }

    /// Write to the host; the tracker only records what the host acknowledged
    async fn write_tracked(
        &self,
        token: CheckToken,
        state: ContextMenuState,
        phase: CheckPhase,
    ) -> Result<()> {
        let written = self
            .call(
                "contextMenus.update",
                self.host.update_context_menu(MENU_ITEM_ID, &state),
            )
            .await;

        match written {
            Ok(()) => {
                self.menu.borrow_mut().commit(token, state, phase);
                Ok(())
            }
            Err(err) => {
                self.menu.borrow_mut().abandon(token);
                Err(err)
            }
        }
    }

    /// Run one host call under the configured timeout
    async fn call<T>(
        &self,
        operation: &'static str,
        pending: impl Future<Output = std::result::Result<T, HostError>>,
    ) -> Result<T> {
        let timeout_ms = self.config.host_timeout_ms;

        match bounded(pending, self.host.sleep(timeout_ms)).await {
            Some(result) => Ok(result?),
            None => {
                log::warn!("{} did not answer within {}ms", operation, timeout_ms);
                Err(CoordinatorError::Timeout {
                    operation,
                    timeout_ms,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::host::{BookmarkNode, MenuItemSpec, TabInfo};
    use crate::menu::MenuPolicy;
    use async_trait::async_trait;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use futures::future::pending;
    use serde_json::json;
    use std::collections::HashMap;

    const JPEG: &str = "data:image/jpeg;base64,/9j/4AAQSkZJRg==";

    /// Records every host call; behaviour is switched per test
    #[derive(Default)]
    struct FakeHost {
        bookmarks: Vec<BookmarkNode>,
        tabs: Vec<TabInfo>,
        search_failure: Option<String>,
        capture_failure: Option<String>,
        menu_failure: Option<String>,
        /// Menu writes accepted before every later one is rejected
        menu_write_limit: Option<usize>,
        hang_capture: bool,
        timers_fire: bool,
        search_gates: RefCell<HashMap<String, oneshot::Receiver<()>>>,
        calls: RefCell<Vec<String>>,
        menu_writes: RefCell<Vec<ContextMenuState>>,
        created: RefCell<Vec<MenuItemSpec>>,
    }

    impl FakeHost {
        fn with_bookmarks(urls: &[&str]) -> FakeHost {
            FakeHost {
                bookmarks: urls
                    .iter()
                    .enumerate()
                    .map(|(i, url)| BookmarkNode {
                        id: i.to_string(),
                        title: format!("Bookmark {}", i),
                        url: Some(url.to_string()),
                    })
                    .collect(),
                ..FakeHost::default()
            }
        }

        fn with_tab(mut self, tab: TabInfo) -> FakeHost {
            self.tabs.push(tab);
            self
        }

        fn gate_search(&self, url: &str) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.search_gates.borrow_mut().insert(url.to_string(), rx);
            tx
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn menu_writes(&self) -> Vec<ContextMenuState> {
            self.menu_writes.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl HostApi for FakeHost {
        async fn search_bookmarks(&self, url: &str) -> std::result::Result<Vec<BookmarkNode>, HostError> {
            self.calls.borrow_mut().push(format!("search {}", url));
            let gate = self.search_gates.borrow_mut().remove(url);
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            if let Some(message) = &self.search_failure {
                return Err(HostError::new(message.clone()));
            }
            // Lenient like a substring query; exactness is the coordinator's job
            Ok(self
                .bookmarks
                .iter()
                .filter(|node| node.url.as_deref().is_some_and(|u| u.starts_with(url)))
                .cloned()
                .collect())
        }

        async fn get_tab(&self, tab_id: i32) -> std::result::Result<TabInfo, HostError> {
            self.calls.borrow_mut().push(format!("get {}", tab_id));
            self.tabs
                .iter()
                .find(|tab| tab.id == tab_id)
                .cloned()
                .ok_or_else(|| HostError::new(format!("No tab with id: {}.", tab_id)))
        }

        async fn capture_visible_tab(
            &self,
            window_id: i32,
            options: CaptureOptions,
        ) -> std::result::Result<String, HostError> {
            self.calls
                .borrow_mut()
                .push(format!("capture {} {:?} {}", window_id, options.format, options.quality));
            if self.hang_capture {
                pending::<()>().await;
            }
            match &self.capture_failure {
                Some(message) => Err(HostError::new(message.clone())),
                None => Ok(JPEG.to_string()),
            }
        }

        async fn create_context_menu(&self, item: &MenuItemSpec) -> std::result::Result<(), HostError> {
            self.calls.borrow_mut().push(format!("create {}", item.id));
            self.created.borrow_mut().push(item.clone());
            Ok(())
        }

        async fn update_context_menu(
            &self,
            id: &str,
            state: &ContextMenuState,
        ) -> std::result::Result<(), HostError> {
            self.calls
                .borrow_mut()
                .push(format!("update {} {:?} {}", id, state.title, state.enabled));
            if let Some(message) = &self.menu_failure {
                return Err(HostError::new(message.clone()));
            }
            if self
                .menu_write_limit
                .is_some_and(|limit| self.menu_writes.borrow().len() >= limit)
            {
                return Err(HostError::new("Menu item update rejected"));
            }
            self.menu_writes.borrow_mut().push(state.clone());
            Ok(())
        }

        async fn sleep(&self, _ms: u32) {
            if !self.timers_fire {
                pending::<()>().await;
            }
        }
    }

    fn coordinator(host: FakeHost) -> Coordinator<FakeHost> {
        Coordinator::new(host, CoordinatorConfig::new())
    }

    fn tab(id: i32, window_id: i32) -> TabInfo {
        TabInfo::new(
            id,
            window_id,
            Some("https://example.com/".to_string()),
            "Example".to_string(),
            true,
        )
    }

    #[test]
    fn test_capture_tab() {
        let coordinator = coordinator(FakeHost::default().with_tab(tab(42, 3)));

        let response = block_on(coordinator.dispatch(&json!({"action": "captureTab", "tabId": 42})));

        assert_eq!(
            response,
            Response::Screenshot {
                screenshot_url: JPEG.to_string()
            }
        );
        assert_eq!(coordinator.host().calls(), vec!["get 42", "capture 3 Jpeg 90"]);
    }

    #[test]
    fn test_capture_missing_tab() {
        let coordinator = coordinator(FakeHost::default().with_tab(tab(42, 3)));

        let response = block_on(coordinator.dispatch(&json!({"action": "captureTab", "tabId": 999})));

        assert_eq!(
            response,
            Response::Failure {
                error: "No tab with id: 999.".to_string(),
                kind: ErrorKind::Host,
            }
        );
        assert_eq!(coordinator.host().calls(), vec!["get 999"]);
    }

    #[test]
    fn test_capture_permission_denied() {
        let host = FakeHost {
            capture_failure: Some("Either the '<all_urls>' or 'activeTab' permission is required.".to_string()),
            ..FakeHost::default()
        }
        .with_tab(tab(42, 3));
        let coordinator = coordinator(host);

        let response = block_on(coordinator.handle(Request::CaptureTab { tab_id: 42 }));

        match response {
            Response::Failure { error, kind } => {
                assert!(error.contains("activeTab"));
                assert_eq!(kind, ErrorKind::Host);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_hung_capture_times_out() {
        let host = FakeHost {
            hang_capture: true,
            timers_fire: true,
            ..FakeHost::default()
        }
        .with_tab(tab(42, 3));
        let coordinator = Coordinator::new(
            host,
            CoordinatorConfig {
                host_timeout_ms: 50,
                ..CoordinatorConfig::new()
            },
        );

        let response = block_on(coordinator.handle(Request::CaptureTab { tab_id: 42 }));

        assert_eq!(
            response,
            Response::Failure {
                error: "tabs.captureVisibleTab timed out after 50ms".to_string(),
                kind: ErrorKind::Timeout,
            }
        );
    }

    #[test]
    fn test_malformed_requests_get_one_failure_and_no_host_calls() {
        let coordinator = coordinator(FakeHost::default().with_tab(tab(42, 3)));
        let cases = [
            json!({"action": "captureTab", "tabId": "42"}),
            json!({"action": "captureTab"}),
            json!({"action": "isBookmarked"}),
            json!({"action": "checkBookmark", "url": false}),
            json!({"action": "updateContextMenu", "enabled": true}),
            json!({}),
            json!(null),
        ];

        for raw in cases {
            let response = block_on(coordinator.dispatch(&raw));
            match response {
                Response::Failure { kind, .. } => assert_eq!(kind, ErrorKind::MalformedRequest, "{}", raw),
                other => panic!("expected failure for {}, got {:?}", raw, other),
            }
        }
        assert!(coordinator.host().calls().is_empty());
    }

    #[test]
    fn test_unknown_action() {
        let coordinator = coordinator(FakeHost::default());

        let response = block_on(coordinator.dispatch(&json!({"action": "shareTab", "tabId": 1})));

        assert_eq!(
            response,
            Response::Failure {
                error: "unsupported action: shareTab".to_string(),
                kind: ErrorKind::UnsupportedAction,
            }
        );
    }

    #[test]
    fn test_is_bookmarked_exact_match_only() {
        let coordinator = coordinator(FakeHost::with_bookmarks(&["https://example.com/page"]));

        let exact = block_on(coordinator.is_bookmarked("https://example.com/page")).unwrap();
        let prefix = block_on(coordinator.is_bookmarked("https://example.com/")).unwrap();
        let absent = block_on(coordinator.is_bookmarked("https://rust-lang.org/")).unwrap();

        assert!(exact);
        assert!(!prefix);
        assert!(!absent);
    }

    #[test]
    fn test_is_bookmarked_matches_canonical_form() {
        let coordinator = coordinator(FakeHost::with_bookmarks(&["https://example.com/"]));

        let response = block_on(coordinator.dispatch(&json!({
            "action": "isBookmarked",
            "url": "https://example.com",
        })));

        assert_eq!(response, Response::Bookmarked { bookmarked: true });
    }

    #[test]
    fn test_is_bookmarked_is_idempotent_and_uncached() {
        let coordinator = coordinator(FakeHost::with_bookmarks(&["https://example.com/"]));
        let request = json!({"action": "isBookmarked", "url": "https://example.com/"});

        let first = block_on(coordinator.dispatch(&request));
        let second = block_on(coordinator.dispatch(&request));

        assert_eq!(first, Response::Bookmarked { bookmarked: true });
        assert_eq!(first, second);
        assert_eq!(coordinator.host().calls().len(), 2);
    }

    #[test]
    fn test_is_bookmarked_host_failure() {
        let host = FakeHost {
            search_failure: Some("Bookmarks API unavailable".to_string()),
            ..FakeHost::default()
        };
        let coordinator = coordinator(host);

        let response = block_on(coordinator.handle(Request::IsBookmarked {
            url: "https://example.com/".to_string(),
        }));

        assert_eq!(
            response,
            Response::Failure {
                error: "Bookmarks API unavailable".to_string(),
                kind: ErrorKind::Host,
            }
        );
    }

    #[test]
    fn test_check_bookmark_phases_in_order() {
        // Stored canonically, queried without the trailing slash
        let coordinator = coordinator(FakeHost::with_bookmarks(&["https://example.com/"]));

        let response = block_on(coordinator.dispatch(&json!({
            "action": "checkBookmark",
            "url": "https://example.com",
        })));

        assert_eq!(response, Response::empty());
        assert_eq!(
            coordinator.host().calls(),
            vec![
                "update bookmark-link \"Checking bookmark status...\" false",
                "search https://example.com",
                "update bookmark-link \"URL is already bookmarked\" false",
            ]
        );
        assert_eq!(
            coordinator.menu_state(),
            ContextMenuState::new("URL is already bookmarked", false)
        );
        assert_eq!(coordinator.check_phase(), CheckPhase::Settled { bookmarked: true });
    }

    #[test]
    fn test_check_bookmark_always_enable_policy() {
        let coordinator = Coordinator::new(
            FakeHost::with_bookmarks(&["https://example.com/"]),
            CoordinatorConfig {
                menu_policy: MenuPolicy::AlwaysEnable,
                ..CoordinatorConfig::new()
            },
        );

        let outcome = block_on(coordinator.check_bookmark("https://example.com")).unwrap();

        assert_eq!(outcome, CheckOutcome::Bookmarked);
        assert_eq!(
            coordinator.menu_state(),
            ContextMenuState::new("URL is already bookmarked", true)
        );
    }

    #[test]
    fn test_check_bookmark_not_bookmarked() {
        let coordinator = coordinator(FakeHost::default());

        let outcome = block_on(coordinator.check_bookmark("https://example.com/")).unwrap();

        assert_eq!(outcome, CheckOutcome::NotBookmarked);
        assert_eq!(coordinator.menu_state(), ContextMenuState::new("Bookmark this URL", true));
    }

    #[test]
    fn test_check_bookmark_absorbs_lookup_failure() {
        let host = FakeHost {
            search_failure: Some("boom".to_string()),
            ..FakeHost::default()
        };
        let coordinator = coordinator(host);

        let response = block_on(coordinator.handle(Request::CheckBookmark {
            url: "https://example.com/".to_string(),
        }));

        assert_eq!(response, Response::empty());
        assert_eq!(
            coordinator.host().menu_writes(),
            vec![
                ContextMenuState::checking(),
                ContextMenuState::new("Bookmark this URL (error)", true),
            ]
        );
        assert_eq!(coordinator.check_phase(), CheckPhase::Error);
    }

    #[test]
    fn test_check_bookmark_surfaces_menu_write_failure() {
        let host = FakeHost {
            menu_failure: Some("Cannot find menu item with id bookmark-link".to_string()),
            ..FakeHost::default()
        };
        let coordinator = coordinator(host);

        let response = block_on(coordinator.handle(Request::CheckBookmark {
            url: "https://example.com/".to_string(),
        }));

        assert_eq!(
            response,
            Response::Failure {
                error: "Cannot find menu item with id bookmark-link".to_string(),
                kind: ErrorKind::Host,
            }
        );
        // The lookup never starts when the disable phase fails
        assert!(!coordinator.host().calls().iter().any(|c| c.starts_with("search")));
        // The host never showed the checking title, so neither does the tracker
        assert_eq!(coordinator.menu_state(), ContextMenuState::default());
        assert_eq!(coordinator.check_phase(), CheckPhase::Idle);
    }

    #[test]
    fn test_failed_settle_write_keeps_acknowledged_state() {
        let host = FakeHost {
            menu_write_limit: Some(1),
            ..FakeHost::with_bookmarks(&["https://example.com/"])
        };
        let coordinator = coordinator(host);

        let result = block_on(coordinator.check_bookmark("https://example.com/"));

        assert_eq!(
            result,
            Err(CoordinatorError::Host(HostError::new("Menu item update rejected")))
        );
        assert_eq!(coordinator.host().menu_writes(), vec![ContextMenuState::checking()]);
        assert_eq!(coordinator.menu_state(), ContextMenuState::checking());
        assert_eq!(coordinator.check_phase(), CheckPhase::Idle);
    }

    #[test]
    fn test_failed_update_leaves_state_untouched() {
        let host = FakeHost {
            menu_failure: Some("boom".to_string()),
            ..FakeHost::default()
        };
        let coordinator = coordinator(host);

        let response = block_on(coordinator.dispatch(&json!({
            "action": "updateContextMenu",
            "title": "X",
            "enabled": false,
        })));

        assert_eq!(
            response,
            Response::Failure {
                error: "boom".to_string(),
                kind: ErrorKind::Host,
            }
        );
        assert!(coordinator.host().menu_writes().is_empty());
        assert_eq!(coordinator.menu_state(), ContextMenuState::default());

        // A check that cannot disable the item does not leave it "checking" either
        assert!(block_on(coordinator.check_bookmark("https://example.com/")).is_err());
        assert_eq!(coordinator.menu_state(), ContextMenuState::default());
        assert_eq!(coordinator.check_phase(), CheckPhase::Idle);
    }

    #[test]
    fn test_later_check_wins_even_if_earlier_finishes_last() {
        let host = FakeHost::with_bookmarks(&["https://a.example/"]);
        let release_a = host.gate_search("https://a.example/");
        let release_b = host.gate_search("https://b.example/");
        let coordinator = coordinator(host);

        let (first, second, ()) = block_on(async {
            futures::join!(
                coordinator.check_bookmark("https://a.example/"),
                coordinator.check_bookmark("https://b.example/"),
                async {
                    let _ = release_b.send(());
                    let _ = release_a.send(());
                }
            )
        });

        assert_eq!(first.unwrap(), CheckOutcome::Superseded);
        assert_eq!(second.unwrap(), CheckOutcome::NotBookmarked);
        assert_eq!(coordinator.menu_state(), ContextMenuState::new("Bookmark this URL", true));
        assert!(
            !coordinator
                .host()
                .menu_writes()
                .contains(&ContextMenuState::new("URL is already bookmarked", false))
        );
    }

    #[test]
    fn test_update_context_menu_overwrites_state() {
        let coordinator = coordinator(FakeHost::default());

        let response = block_on(coordinator.dispatch(&json!({
            "action": "updateContextMenu",
            "title": "X",
            "enabled": false,
        })));

        assert_eq!(response, Response::empty());
        assert_eq!(coordinator.menu_state(), ContextMenuState::new("X", false));
        assert_eq!(coordinator.host().menu_writes(), vec![ContextMenuState::new("X", false)]);
    }

    #[test]
    fn test_explicit_update_beats_in_flight_check() {
        let host = FakeHost::with_bookmarks(&["https://a.example/"]);
        let release = host.gate_search("https://a.example/");
        let coordinator = coordinator(host);

        let (outcome, updated) = block_on(async {
            futures::join!(coordinator.check_bookmark("https://a.example/"), async {
                let updated = coordinator
                    .update_context_menu(ContextMenuState::new("X", false))
                    .await;
                let _ = release.send(());
                updated
            })
        });

        assert_eq!(outcome.unwrap(), CheckOutcome::Superseded);
        assert!(updated.is_ok());
        assert_eq!(coordinator.menu_state(), ContextMenuState::new("X", false));
    }

    #[test]
    fn test_on_installed_creates_menu_item() {
        let coordinator = coordinator(FakeHost::default());
        block_on(coordinator.update_context_menu(ContextMenuState::new("X", false))).unwrap();

        block_on(coordinator.on_installed()).unwrap();

        let created = coordinator.host().created.borrow().clone();
        assert_eq!(created, vec![default_menu_item()]);
        assert_eq!(coordinator.menu_state(), ContextMenuState::default());
    }

    #[test]
    fn test_tab_update_triggers_check_only_when_complete_and_active() {
        let coordinator = coordinator(FakeHost::with_bookmarks(&["https://example.com/"]));
        let mut update = TabUpdate {
            tab_id: 42,
            status: Some("loading".to_string()),
            tab: tab(42, 3),
        };

        assert_eq!(block_on(coordinator.on_tab_updated(&update)).unwrap(), None);
        assert!(coordinator.host().calls().is_empty());

        update.status = Some("complete".to_string());
        let outcome = block_on(coordinator.on_tab_updated(&update)).unwrap();

        assert_eq!(outcome, Some(CheckOutcome::Bookmarked));
        assert_eq!(
            coordinator.menu_state(),
            ContextMenuState::new("URL is already bookmarked", false)
        );
    }

    #[test]
    fn test_menu_click_does_not_touch_state() {
        let coordinator = coordinator(FakeHost::default());

        coordinator.on_menu_clicked(&MenuClick {
            menu_item_id: MENU_ITEM_ID.to_string(),
            link_url: Some("https://example.com/".to_string()),
        });

        assert!(coordinator.host().calls().is_empty());
        assert_eq!(coordinator.menu_state(), ContextMenuState::default());
    }
}
