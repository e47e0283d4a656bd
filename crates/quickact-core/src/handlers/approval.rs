//! Approval workflow handlers.
//!
//! Approve and deny both stamp the armed message with an outcome and then
//! retire it; a request is decided exactly once per arming.

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::ActionHandler;
use crate::context::Context;
use crate::gateway::{Embed, Member, Message, OutboundMessage, color};
use crate::record::TrackedMessage;

/// Stamp the request message with the outcome, preserving the original embed
/// when there is one.
fn stamped_embed(message: &Message, color: u32, status: String) -> Embed {
    let base = message.embeds.first().cloned().unwrap_or_default();
    base.with_color(color).with_field("Status", status)
}

/// Approve the request the armed message represents.
pub struct ApproveRequest;

#[async_trait]
impl ActionHandler for ApproveRequest {
    async fn execute(
        &self,
        ctx: &Context,
        message: &Message,
        actor: &Member,
        record: &TrackedMessage,
    ) -> Result<()> {
        let gateway = ctx.gateway.as_ref();

        if message.embeds.is_empty() {
            gateway
                .send_message(
                    message.channel_id,
                    OutboundMessage::text(format!("Request approved by {}", actor.mention())),
                )
                .await?;
        } else {
            let embed = stamped_embed(
                message,
                color::GREEN,
                format!("✅ Approved by {}", actor.mention()),
            );
            if let Err(e) = gateway
                .edit_message(message.channel_id, message.id, OutboundMessage::embed(embed))
                .await
            {
                warn!("Failed to stamp approval onto request message: {e:#}");
                gateway
                    .send_message(
                        message.channel_id,
                        OutboundMessage::text(format!(
                            "Request approved by {}",
                            actor.mention()
                        )),
                    )
                    .await?;
            }
        }

        // Optional follow-up configured at arm time
        if record.approval_action() == Some("assign_role") {
            match (record.target_user_id(), record.role_id()) {
                (Some(user_id), Some(role_id)) => {
                    if let Err(e) = gateway.grant_role(message.guild_id, user_id, role_id).await {
                        warn!(user_id, role_id, "Failed to grant approved role: {e:#}");
                    } else {
                        info!(user_id, role_id, "Granted role on approval");
                    }
                }
                _ => warn!(
                    message_id = message.id,
                    "assign_role approval missing target_user_id or role_id"
                ),
            }
        }

        info!(
            message_id = message.id,
            actor = %actor.display_name,
            "Request approved"
        );
        ctx.registry.unregister(message.id).await;
        Ok(())
    }
}

/// Deny the request the armed message represents.
pub struct DenyRequest;

#[async_trait]
impl ActionHandler for DenyRequest {
    async fn execute(
        &self,
        ctx: &Context,
        message: &Message,
        actor: &Member,
        record: &TrackedMessage,
    ) -> Result<()> {
        let gateway = ctx.gateway.as_ref();

        if message.embeds.is_empty() {
            gateway
                .send_message(
                    message.channel_id,
                    OutboundMessage::text(format!("Request denied by {}", actor.mention())),
                )
                .await?;
        } else {
            let embed = stamped_embed(
                message,
                color::RED,
                format!("❌ Denied by {}", actor.mention()),
            );
            if let Err(e) = gateway
                .edit_message(message.channel_id, message.id, OutboundMessage::embed(embed))
                .await
            {
                warn!("Failed to stamp denial onto request message: {e:#}");
                gateway
                    .send_message(
                        message.channel_id,
                        OutboundMessage::text(format!("Request denied by {}", actor.mention())),
                    )
                    .await?;
            }
        }

        if record.denial_action() == Some("notify") {
            if let Some(user_id) = record.target_user_id() {
                if let Err(e) = gateway
                    .dm_user(
                        user_id,
                        OutboundMessage::text("Your request has been denied."),
                    )
                    .await
                {
                    debug!(user_id, "Could not notify denied requester: {e:#}");
                }
            }
        }

        info!(
            message_id = message.id,
            actor = %actor.display_name,
            "Request denied"
        );
        ctx.registry.unregister(message.id).await;
        Ok(())
    }
}
