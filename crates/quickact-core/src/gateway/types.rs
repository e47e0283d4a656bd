//! Platform Gateway Types
//!
//! Platform-neutral views of messages, members, and channels as the engine
//! needs them. The concrete chat-platform binding converts its own payloads
//! into these.

use serde::{Deserialize, Serialize};

/// Embed colors used by the stock handlers.
pub mod color {
    pub const BLUE: u32 = 0x3498db;
    pub const GREEN: u32 = 0x2ecc71;
    pub const RED: u32 = 0xe74c3c;
    pub const ORANGE: u32 = 0xe67e22;
    pub const GOLD: u32 = 0xf1c40f;
}

/// Channel kind, as far as the engine cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Text,
    Category,
    Thread,
}

/// Capabilities the platform reports for a community member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub administrator: bool,
    pub manage_messages: bool,
    pub manage_guild: bool,
}

impl Capabilities {
    /// Full capability set, for bots and admins in tests.
    pub fn all() -> Self {
        Self {
            administrator: true,
            manage_messages: true,
            manage_guild: true,
        }
    }
}

/// A resolved community member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub user_id: u64,
    pub display_name: String,
    pub is_bot: bool,
    pub capabilities: Capabilities,
}

impl Member {
    pub fn new(user_id: u64, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            is_bot: false,
            capabilities: Capabilities::default(),
        }
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Mention string understood by the platform.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.user_id)
    }
}

/// A message fetched from the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub channel_id: u64,
    pub guild_id: u64,
    pub author_id: u64,
    pub author_name: String,
    pub content: String,
    #[serde(default)]
    pub embeds: Vec<Embed>,
}

impl Message {
    pub fn new(id: u64, channel_id: u64, guild_id: u64, author_id: u64) -> Self {
        Self {
            id,
            channel_id,
            guild_id,
            author_id,
            author_name: String::new(),
            content: String::new(),
            embeds: Vec::new(),
        }
    }

    pub fn with_author_name(mut self, name: impl Into<String>) -> Self {
        self.author_name = name.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn author_mention(&self) -> String {
        format!("<@{}>", self.author_id)
    }
}

/// A rich embed attached to an outbound or fetched message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Embed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<u32>,
    #[serde(default)]
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }
}

/// Outbound message payload for `send_message` and `dm_user`.
#[derive(Debug, Clone, Default)]
pub struct OutboundMessage {
    pub content: Option<String>,
    pub embed: Option<Embed>,
    /// Ask the platform to delete the message after this many seconds.
    pub delete_after_secs: Option<u64>,
}

impl OutboundMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn embed(embed: Embed) -> Self {
        Self {
            embed: Some(embed),
            ..Self::default()
        }
    }

    pub fn with_delete_after(mut self, secs: u64) -> Self {
        self.delete_after_secs = Some(secs);
        self
    }
}

/// Channel metadata as reported by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub id: u64,
    pub guild_id: u64,
    pub name: String,
    pub kind: ChannelKind,
    pub parent_id: Option<u64>,
}

/// Who a permission overwrite applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteTarget {
    Everyone,
    Member(u64),
    Role(u64),
}

/// Per-channel permission overwrite used when creating ticket channels.
#[derive(Debug, Clone)]
pub struct PermissionOverwrite {
    pub target: OverwriteTarget,
    pub read_messages: bool,
    pub send_messages: bool,
}

impl PermissionOverwrite {
    pub fn allow(target: OverwriteTarget) -> Self {
        Self {
            target,
            read_messages: true,
            send_messages: true,
        }
    }

    pub fn deny(target: OverwriteTarget) -> Self {
        Self {
            target,
            read_messages: false,
            send_messages: false,
        }
    }
}

/// Request to create a channel.
#[derive(Debug, Clone)]
pub struct NewChannel {
    pub name: String,
    pub kind: ChannelKind,
    pub parent_id: Option<u64>,
    pub topic: Option<String>,
    pub overwrites: Vec<PermissionOverwrite>,
}

impl NewChannel {
    pub fn new(name: impl Into<String>, kind: ChannelKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent_id: None,
            topic: None,
            overwrites: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent_id: u64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_overwrite(mut self, overwrite: PermissionOverwrite) -> Self {
        self.overwrites.push(overwrite);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_mention() {
        let member = Member::new(42, "alice");
        assert_eq!(member.mention(), "<@42>");
    }

    #[test]
    fn test_embed_builder() {
        let embed = Embed::new()
            .with_title("Ticket #3")
            .with_description("Support ticket")
            .with_color(color::BLUE)
            .with_field("Status", "open");

        assert_eq!(embed.title.as_deref(), Some("Ticket #3"));
        assert_eq!(embed.color, Some(color::BLUE));
        assert_eq!(embed.fields.len(), 1);
        assert_eq!(embed.fields[0].name, "Status");
    }

    #[test]
    fn test_outbound_message_builders() {
        let msg = OutboundMessage::text("hello").with_delete_after(10);
        assert_eq!(msg.content.as_deref(), Some("hello"));
        assert_eq!(msg.delete_after_secs, Some(10));
        assert!(msg.embed.is_none());

        let msg = OutboundMessage::embed(Embed::new().with_title("t"));
        assert!(msg.content.is_none());
        assert!(msg.embed.is_some());
    }

    #[test]
    fn test_new_channel_builder() {
        let request = NewChannel::new("ticket-4", ChannelKind::Text)
            .with_parent(100)
            .with_overwrite(PermissionOverwrite::deny(OverwriteTarget::Everyone))
            .with_overwrite(PermissionOverwrite::allow(OverwriteTarget::Member(42)));

        assert_eq!(request.parent_id, Some(100));
        assert_eq!(request.overwrites.len(), 2);
        assert!(!request.overwrites[0].read_messages);
        assert!(request.overwrites[1].send_messages);
    }
}
