//! Platform Gateway Trait
//!
//! The single seam between the engine and the chat platform. Everything the
//! handlers do to the outside world goes through this trait; the concrete
//! binding (the platform client library) lives outside this crate.

use anyhow::Result;
use async_trait::async_trait;

use super::types::{ChannelInfo, Member, Message, NewChannel, OutboundMessage};

/// Chat-platform operations consumed by the engine.
///
/// All methods are fallible: the platform can reject any call with a
/// permission error, a not-found, or a rate limit. Handlers catch and log
/// these; nothing here should panic.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Fetch a message by channel and id.
    async fn fetch_message(&self, channel_id: u64, message_id: u64) -> Result<Message>;

    /// Send a message to a channel, returning the new message id.
    async fn send_message(&self, channel_id: u64, message: OutboundMessage) -> Result<u64>;

    /// Replace the display (embed) of an existing message.
    async fn edit_message(&self, channel_id: u64, message_id: u64, message: OutboundMessage)
        -> Result<()>;

    /// Send a direct message to a user.
    async fn dm_user(&self, user_id: u64, message: OutboundMessage) -> Result<()>;

    /// Add the agent's own reaction to a message.
    async fn add_reaction(&self, channel_id: u64, message_id: u64, emoji: &str) -> Result<()>;

    /// Remove a specific user's reaction from a message.
    async fn remove_reaction(
        &self,
        channel_id: u64,
        message_id: u64,
        emoji: &str,
        user_id: u64,
    ) -> Result<()>;

    /// List all channels of a community.
    async fn list_channels(&self, guild_id: u64) -> Result<Vec<ChannelInfo>>;

    /// Create a channel (or category) in a community.
    async fn create_channel(&self, guild_id: u64, request: NewChannel) -> Result<ChannelInfo>;

    /// Rename a channel.
    async fn rename_channel(&self, channel_id: u64, name: &str) -> Result<()>;

    /// Archive a thread-type channel.
    async fn archive_channel(&self, channel_id: u64) -> Result<()>;

    /// Delete a channel.
    async fn delete_channel(&self, channel_id: u64) -> Result<()>;

    /// Grant a role to a community member.
    async fn grant_role(&self, guild_id: u64, user_id: u64, role_id: u64) -> Result<()>;

    /// Time a member out for a duration, with an audit reason.
    async fn timeout_member(
        &self,
        guild_id: u64,
        user_id: u64,
        duration_secs: u64,
        reason: &str,
    ) -> Result<()>;

    /// Kick a member from the community.
    async fn kick_member(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<()>;

    /// Ban a member from the community.
    async fn ban_member(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<()>;

    /// Delete a message.
    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<()>;

    /// Pin a message in its channel.
    async fn pin_message(&self, channel_id: u64, message_id: u64) -> Result<()>;

    /// Resolve a user to a community member with capabilities.
    async fn resolve_member(&self, guild_id: u64, user_id: u64) -> Result<Member>;
}


#[cfg(test)]
mod tests {
    use super::mock::{GatewayCall, RecordingGateway};
    use super::*;
    use crate::gateway::types::{ChannelKind, Member, Message};

    #[tokio::test]
    async fn test_recording_gateway_records_calls() {
        let gateway = RecordingGateway::new();
        gateway.seed_message(Message::new(1, 10, 100, 7));

        gateway.fetch_message(10, 1).await.unwrap();
        gateway.pin_message(10, 1).await.unwrap();

        assert_eq!(gateway.calls().len(), 2);
        assert_eq!(gateway.count_named("pin_message"), 1);
        assert_eq!(gateway.mutating_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_recording_gateway_fail_on() {
        let gateway = RecordingGateway::new();
        gateway.fail_on("pin_message");

        assert!(gateway.pin_message(10, 1).await.is_err());
        // The call is still recorded
        assert_eq!(gateway.count_named("pin_message"), 1);
    }

    #[tokio::test]
    async fn test_recording_gateway_create_channel_allocates_ids() {
        let gateway = RecordingGateway::new();

        let a = gateway
            .create_channel(100, NewChannel::new("ticket-1", ChannelKind::Text))
            .await
            .unwrap();
        let b = gateway
            .create_channel(100, NewChannel::new("ticket-2", ChannelKind::Text))
            .await
            .unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(gateway.list_channels(100).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_recording_gateway_resolve_member() {
        let gateway = RecordingGateway::new();
        gateway.seed_member(Member::new(7, "alice"));

        let member = gateway.resolve_member(100, 7).await.unwrap();
        assert_eq!(member.display_name, "alice");
        assert!(gateway.resolve_member(100, 8).await.is_err());

        let calls = gateway.calls();
        assert!(matches!(calls[0], GatewayCall::ResolveMember { .. }));
    }
}
