//! Action Table
//!
//! The global mapping from emoji symbol to a named action. A fixed default
//! set is merged with deployment-supplied overrides at load time; overrides
//! win on key collision.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Closed set of actions an emoji acknowledgment can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    CreateTicket,
    ApproveRequest,
    DenyRequest,
    CloseTicket,
    PinMessage,
    DeleteMessage,
    TimeoutUser,
    WarnUser,
    KickUser,
}

impl ActionKind {
    pub const ALL: [ActionKind; 9] = [
        Self::CreateTicket,
        Self::ApproveRequest,
        Self::DenyRequest,
        Self::CloseTicket,
        Self::PinMessage,
        Self::DeleteMessage,
        Self::TimeoutUser,
        Self::WarnUser,
        Self::KickUser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateTicket => "create_ticket",
            Self::ApproveRequest => "approve_request",
            Self::DenyRequest => "deny_request",
            Self::CloseTicket => "close_ticket",
            Self::PinMessage => "pin_message",
            Self::DeleteMessage => "delete_message",
            Self::TimeoutUser => "timeout_user",
            Self::WarnUser => "warn_user",
            Self::KickUser => "kick_user",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == name)
    }

    /// Whether this action is restricted to moderators.
    ///
    /// Restricted actions require the acting member to pass the permission
    /// guard; on denial the actor's reaction is removed and no handler runs.
    pub fn moderator_only(&self) -> bool {
        matches!(
            self,
            Self::DeleteMessage
                | Self::PinMessage
                | Self::TimeoutUser
                | Self::WarnUser
                | Self::KickUser
        )
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Default emoji assignments.
pub const DEFAULT_ACTIONS: [(&str, ActionKind); 9] = [
    ("🎫", ActionKind::CreateTicket),
    ("✅", ActionKind::ApproveRequest),
    ("❌", ActionKind::DenyRequest),
    ("🔒", ActionKind::CloseTicket),
    ("📌", ActionKind::PinMessage),
    ("🗑️", ActionKind::DeleteMessage),
    ("⏰", ActionKind::TimeoutUser),
    ("⚠️", ActionKind::WarnUser),
    ("🔨", ActionKind::KickUser),
];

/// Emoji-to-action mapping shared by every tracked message.
#[derive(Debug, Clone)]
pub struct ActionTable {
    map: HashMap<String, ActionKind>,
}

impl ActionTable {
    /// The stock table with no deployment overrides.
    pub fn defaults() -> Self {
        let map = DEFAULT_ACTIONS
            .iter()
            .map(|(emoji, kind)| (emoji.to_string(), *kind))
            .collect();
        Self { map }
    }

    /// Build the table by merging overrides onto the defaults.
    ///
    /// Overrides win on collision. An override naming an unknown action is
    /// logged as a configuration warning and skipped.
    pub fn with_overrides<'a, I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = Self::defaults();
        for (emoji, action_name) in overrides {
            match ActionKind::parse(action_name) {
                Some(kind) => {
                    table.map.insert(emoji.to_string(), kind);
                }
                None => {
                    warn!(emoji, action = action_name, "Unknown action in override, skipping");
                }
            }
        }
        table
    }

    pub fn lookup(&self, emoji: &str) -> Option<ActionKind> {
        self.map.get(emoji).copied()
    }

    pub fn contains(&self, emoji: &str) -> bool {
        self.map.contains_key(emoji)
    }

    /// All emoji symbols the table knows.
    pub fn emojis(&self) -> Vec<String> {
        self.map.keys().cloned().collect()
    }

    /// First emoji mapped to the given action, if any.
    ///
    /// Used by setup to seed reactions for an action category; with the
    /// default table every action has exactly one emoji.
    pub fn emoji_for(&self, kind: ActionKind) -> Option<String> {
        self.map
            .iter()
            .find(|(_, k)| **k == kind)
            .map(|(emoji, _)| emoji.clone())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ActionKind)> {
        self.map.iter()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for ActionTable {
    fn default() -> Self {
        Self::defaults()
    }
}
