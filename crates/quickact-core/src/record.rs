//! Tracked message records.
//!
//! A [`TrackedMessage`] is a posted message the engine has armed with a set
//! of permitted emoji acknowledgments. The record carries enough context to
//! re-resolve the message from the gateway plus an open `data` bag with
//! action-specific values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Coarse category a message was armed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    Ticket,
    Approval,
    Moderation,
    All,
}

impl ActionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ticket => "ticket",
            Self::Approval => "approval",
            Self::Moderation => "moderation",
            Self::All => "all",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "ticket" => Some(Self::Ticket),
            "approval" => Some(Self::Approval),
            "moderation" => Some(Self::Moderation),
            "all" => Some(Self::All),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A message armed for reaction handling.
///
/// The message id doubles as the storage key, so it is not part of the
/// serialized body; stores re-attach it on load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackedMessage {
    #[serde(skip)]
    pub message_id: u64,
    pub channel_id: u64,
    pub author_id: u64,
    pub guild_id: u64,
    pub action_type: ActionCategory,
    pub allowed_reactions: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl TrackedMessage {
    pub fn new(
        message_id: u64,
        channel_id: u64,
        author_id: u64,
        guild_id: u64,
        action_type: ActionCategory,
    ) -> Self {
        Self {
            message_id,
            channel_id,
            author_id,
            guild_id,
            action_type,
            allowed_reactions: Vec::new(),
            created_at: Utc::now(),
            data: Map::new(),
        }
    }

    pub fn with_allowed_reactions<I, S>(mut self, reactions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_reactions = reactions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }

    pub fn with_data_entry(mut self, key: impl Into<String>, value: Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    pub fn allows(&self, emoji: &str) -> bool {
        self.allowed_reactions.iter().any(|r| r == emoji)
    }

    // ── Typed views over the data bag ────────────────────────────────
    //
    // The legacy deployments wrote ids sometimes as JSON numbers and
    // sometimes as strings; the accessors accept both.

    pub fn data_u64(&self, key: &str) -> Option<u64> {
        match self.data.get(key)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data.get(key)?.as_str()
    }

    pub fn data_bool(&self, key: &str) -> Option<bool> {
        self.data.get(key)?.as_bool()
    }

    /// Moderator role ids granted access to created ticket channels.
    pub fn mod_roles(&self) -> Vec<u64> {
        match self.data.get("mod_roles") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| match v {
                    Value::Number(n) => n.as_u64(),
                    Value::String(s) => s.parse().ok(),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn target_user_id(&self) -> Option<u64> {
        self.data_u64("target_user_id")
    }

    pub fn role_id(&self) -> Option<u64> {
        self.data_u64("role_id")
    }

    pub fn log_channel_id(&self) -> Option<u64> {
        self.data_u64("log_channel_id")
    }

    pub fn creator_id(&self) -> Option<u64> {
        self.data_u64("creator_id")
    }

    pub fn approval_action(&self) -> Option<&str> {
        self.data_str("approval_action")
    }

    pub fn denial_action(&self) -> Option<&str> {
        self.data_str("denial_action")
    }

    pub fn timeout_duration_mins(&self) -> Option<u64> {
        self.data_u64("timeout_duration_mins")
    }

    pub fn warn_reason(&self) -> Option<&str> {
        self.data_str("warn_reason")
    }

    pub fn kick_reason(&self) -> Option<&str> {
        self.data_str("kick_reason")
    }

    pub fn delete_on_close(&self) -> bool {
        self.data_bool("delete_on_close").unwrap_or(false)
    }
}
