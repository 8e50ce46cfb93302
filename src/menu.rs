/// Context-menu state owned by the background coordinator
use serde::{Deserialize, Serialize};

use crate::host::MenuItemSpec;

pub const MENU_ITEM_ID: &str = "bookmark-link";

pub const DEFAULT_TITLE: &str = "Bookmark this URL";
pub const CHECKING_TITLE: &str = "Checking bookmark status...";
pub const BOOKMARKED_TITLE: &str = "URL is already bookmarked";
pub const ERROR_TITLE: &str = "Bookmark this URL (error)";

/// What the browser currently renders for the `bookmark-link` item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMenuState {
    pub title: String,
    pub enabled: bool,
}

impl ContextMenuState {
    pub fn new(title: impl Into<String>, enabled: bool) -> ContextMenuState {
        ContextMenuState {
            title: title.into(),
            enabled,
        }
    }

    pub fn checking() -> ContextMenuState {
        ContextMenuState::new(CHECKING_TITLE, false)
    }

    pub fn error() -> ContextMenuState {
        ContextMenuState::new(ERROR_TITLE, true)
    }

    pub fn settled(bookmarked: bool, policy: MenuPolicy) -> ContextMenuState {
        let title = if bookmarked { BOOKMARKED_TITLE } else { DEFAULT_TITLE };
        ContextMenuState::new(title, policy.enabled_for(bookmarked))
    }
}

impl Default for ContextMenuState {
    fn default() -> Self {
        ContextMenuState::new(DEFAULT_TITLE, true)
    }
}

/// Item created on install: link contexts only
pub fn default_menu_item() -> MenuItemSpec {
    MenuItemSpec {
        id: MENU_ITEM_ID.to_string(),
        title: DEFAULT_TITLE.to_string(),
        contexts: vec!["link".to_string()],
    }
}

/// Whether the item is clickable once a check settles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MenuPolicy {
    AlwaysEnable,
    #[default]
    EnableWhenNotBookmarked,
}

impl MenuPolicy {
    pub fn enabled_for(self, bookmarked: bool) -> bool {
        match self {
            MenuPolicy::AlwaysEnable => true,
            MenuPolicy::EnableWhenNotBookmarked => !bookmarked,
        }
    }
}

/// Monotonic id of a menu write sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CheckToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckPhase {
    Idle,
    Checking(CheckToken),
    Settled { bookmarked: bool },
    Error,
}

/// Outcome of one bookmark check, as seen by whoever triggered it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Bookmarked,
    NotBookmarked,
    /// Lookup failed; the error title was written
    LookupFailed,
    /// A newer check or explicit update was issued first; nothing was settled
    Superseded,
}

/// Mirrors what the host has acknowledged for the menu item, and which write
/// sequence is allowed to change it next.
///
/// Every check and every explicit overwrite issues a fresh token before its first
/// write. A write is committed only after the host acknowledges it and only while
/// its token is still the latest, so the last *issued* sequence wins regardless of
/// the order in which host calls complete.
#[derive(Debug)]
pub struct MenuTracker {
    state: ContextMenuState,
    phase: CheckPhase,
    latest: CheckToken,
}

impl MenuTracker {
    pub fn new() -> MenuTracker {
        MenuTracker {
            state: ContextMenuState::default(),
            phase: CheckPhase::Idle,
            latest: CheckToken(0),
        }
    }

    pub fn state(&self) -> &ContextMenuState {
        &self.state
    }

    pub fn phase(&self) -> CheckPhase {
        self.phase
    }

    /// Start a write sequence; supersedes every sequence issued before it
    pub fn issue(&mut self) -> CheckToken {
        self.latest = CheckToken(self.latest.0 + 1);
        self.latest
    }

    pub fn is_current(&self, token: CheckToken) -> bool {
        token == self.latest
    }

    /// The Settled or Error write for a finished lookup. `None` when the token is stale.
    pub fn settlement(
        &self,
        token: CheckToken,
        lookup: Option<bool>,
        policy: MenuPolicy,
    ) -> Option<(ContextMenuState, CheckPhase)> {
        if !self.is_current(token) {
            return None;
        }

        Some(match lookup {
            Some(bookmarked) => (
                ContextMenuState::settled(bookmarked, policy),
                CheckPhase::Settled { bookmarked },
            ),
            None => (ContextMenuState::error(), CheckPhase::Error),
        })
    }

    /// Record a write the host acknowledged. Returns false for a stale token.
    pub fn commit(&mut self, token: CheckToken, state: ContextMenuState, phase: CheckPhase) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.state = state;
        self.phase = phase;
        true
    }

    /// The host rejected a write: keep the last acknowledged state, nothing is in flight
    pub fn abandon(&mut self, token: CheckToken) {
        if self.is_current(token) {
            self.phase = CheckPhase::Idle;
        }
    }

    /// A freshly created item shows the default title
    pub fn reset(&mut self) {
        let token = self.issue();
        self.commit(token, ContextMenuState::default(), CheckPhase::Idle);
    }
}

impl Default for MenuTracker {
    fn default() -> Self {
        Self::new()
    }
}
