//! Moderation handlers: pin, delete, timeout, warn, kick.
//!
//! All of these are moderator-restricted; the router enforces that before a
//! handler runs. Pin keeps the record armed, everything else retires it.

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::ActionHandler;
use crate::context::Context;
use crate::gateway::{Embed, Member, Message, OutboundMessage, color};
use crate::record::TrackedMessage;

const NOTICE_TTL_SECS: u64 = 10;
const AUDIT_CONTENT_LIMIT: usize = 1024;
const DEFAULT_TIMEOUT_MINS: u64 = 60;

/// Pin the message. Repeatable, so the record stays armed.
pub struct PinMessage;

#[async_trait]
impl ActionHandler for PinMessage {
    async fn execute(
        &self,
        ctx: &Context,
        message: &Message,
        actor: &Member,
        _record: &TrackedMessage,
    ) -> Result<()> {
        ctx.gateway
            .pin_message(message.channel_id, message.id)
            .await?;
        info!(
            message_id = message.id,
            actor = %actor.display_name,
            "Pinned message"
        );
        Ok(())
    }
}

/// Delete the message and post an audit entry to the configured log channel.
pub struct DeleteMessage;

#[async_trait]
impl ActionHandler for DeleteMessage {
    async fn execute(
        &self,
        ctx: &Context,
        message: &Message,
        actor: &Member,
        record: &TrackedMessage,
    ) -> Result<()> {
        let gateway = ctx.gateway.as_ref();

        gateway
            .delete_message(message.channel_id, message.id)
            .await?;
        info!(
            message_id = message.id,
            actor = %actor.display_name,
            "Deleted message"
        );
        ctx.registry.unregister(message.id).await;

        if let Some(log_channel_id) = record.log_channel_id() {
            let mut content = message.content.clone();
            if content.len() > AUDIT_CONTENT_LIMIT {
                let mut end = AUDIT_CONTENT_LIMIT;
                while !content.is_char_boundary(end) {
                    end -= 1;
                }
                content.truncate(end);
            }
            let audit = Embed::new()
                .with_title("Message Deleted")
                .with_description(format!(
                    "Message by {} deleted by {}",
                    message.author_mention(),
                    actor.mention()
                ))
                .with_color(color::RED)
                .with_field("Content", content);
            if let Err(e) = gateway
                .send_message(log_channel_id, OutboundMessage::embed(audit))
                .await
            {
                warn!(log_channel_id, "Failed to write deletion audit entry: {e:#}");
            }
        }

        Ok(())
    }
}

/// Time the message author out.
pub struct TimeoutUser;

#[async_trait]
impl ActionHandler for TimeoutUser {
    async fn execute(
        &self,
        ctx: &Context,
        message: &Message,
        actor: &Member,
        record: &TrackedMessage,
    ) -> Result<()> {
        let gateway = ctx.gateway.as_ref();
        let duration_mins = record
            .timeout_duration_mins()
            .unwrap_or(DEFAULT_TIMEOUT_MINS);
        let reason = format!("Timed out by {}", actor.display_name);

        gateway
            .timeout_member(
                message.guild_id,
                message.author_id,
                duration_mins * 60,
                &reason,
            )
            .await
            .context("timing out member")?;

        let notice = Embed::new()
            .with_title("User Timed Out")
            .with_description(format!(
                "{} has been timed out for {} minutes by {}",
                message.author_mention(),
                duration_mins,
                actor.mention()
            ))
            .with_color(color::ORANGE);
        if let Err(e) = gateway
            .send_message(
                message.channel_id,
                OutboundMessage::embed(notice).with_delete_after(NOTICE_TTL_SECS),
            )
            .await
        {
            warn!("Failed to post timeout notice: {e:#}");
        }

        info!(
            user_id = message.author_id,
            duration_mins,
            actor = %actor.display_name,
            "Timed out member"
        );
        ctx.registry.unregister(message.id).await;
        Ok(())
    }
}

/// Warn the message author, in channel and by DM.
pub struct WarnUser;

#[async_trait]
impl ActionHandler for WarnUser {
    async fn execute(
        &self,
        ctx: &Context,
        message: &Message,
        actor: &Member,
        record: &TrackedMessage,
    ) -> Result<()> {
        let gateway = ctx.gateway.as_ref();
        let reason = record.warn_reason().unwrap_or("Inappropriate content");

        let notice = Embed::new()
            .with_title("User Warned")
            .with_description(format!(
                "{} has been warned by {}",
                message.author_mention(),
                actor.mention()
            ))
            .with_color(color::GOLD)
            .with_field("Reason", reason);
        gateway
            .send_message(
                message.channel_id,
                OutboundMessage::embed(notice).with_delete_after(NOTICE_TTL_SECS),
            )
            .await?;

        let dm = Embed::new()
            .with_title("Warning")
            .with_description("You have received a warning from the moderation team.")
            .with_color(color::GOLD)
            .with_field("Reason", reason);
        if let Err(e) = gateway
            .dm_user(message.author_id, OutboundMessage::embed(dm))
            .await
        {
            // Member may have DMs disabled
            debug!(user_id = message.author_id, "Could not DM warning: {e:#}");
        }

        info!(
            user_id = message.author_id,
            actor = %actor.display_name,
            reason,
            "Warned member"
        );
        ctx.registry.unregister(message.id).await;
        Ok(())
    }
}

/// Kick the message author from the community.
pub struct KickUser;

#[async_trait]
impl ActionHandler for KickUser {
    async fn execute(
        &self,
        ctx: &Context,
        message: &Message,
        actor: &Member,
        record: &TrackedMessage,
    ) -> Result<()> {
        let gateway = ctx.gateway.as_ref();
        let default_reason = format!("Kicked by {}", actor.display_name);
        let reason = record.kick_reason().unwrap_or(&default_reason);

        gateway
            .kick_member(message.guild_id, message.author_id, reason)
            .await
            .context("kicking member")?;

        let notice = Embed::new()
            .with_title("User Kicked")
            .with_description(format!(
                "{} has been kicked by {}",
                message.author_mention(),
                actor.mention()
            ))
            .with_color(color::RED)
            .with_field("Reason", reason);
        if let Err(e) = gateway
            .send_message(message.channel_id, OutboundMessage::embed(notice))
            .await
        {
            warn!("Failed to post kick notice: {e:#}");
        }

        info!(
            user_id = message.author_id,
            actor = %actor.display_name,
            reason,
            "Kicked member"
        );
        ctx.registry.unregister(message.id).await;
        Ok(())
    }
}
