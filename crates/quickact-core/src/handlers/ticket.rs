//! Ticket lifecycle handlers: create from a panel reaction, close from the
//! in-ticket reaction.

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::ActionHandler;
use crate::context::Context;
use crate::gateway::{
    ChannelInfo, ChannelKind, Embed, Member, Message, NewChannel, OutboundMessage,
    OverwriteTarget, PermissionOverwrite, color,
};
use crate::guard::is_moderator;
use crate::record::TrackedMessage;

const TICKET_CATEGORY: &str = "tickets";
const TICKET_PREFIX: &str = "ticket-";
const CLOSED_PREFIX: &str = "closed-";
const CLOSE_EMOJI: &str = "🔒";
const CLOSE_GRACE_SECS: u64 = 5;

/// Create a support ticket channel for the reacting member.
pub struct CreateTicket;

#[async_trait]
impl ActionHandler for CreateTicket {
    async fn execute(
        &self,
        ctx: &Context,
        message: &Message,
        actor: &Member,
        record: &TrackedMessage,
    ) -> Result<()> {
        let gateway = ctx.gateway.as_ref();
        let channels = gateway.list_channels(message.guild_id).await?;

        let category = match channels
            .iter()
            .find(|c| c.kind == ChannelKind::Category && c.name.eq_ignore_ascii_case(TICKET_CATEGORY))
        {
            Some(category) => category.clone(),
            None => {
                match gateway
                    .create_channel(
                        message.guild_id,
                        NewChannel::new("Tickets", ChannelKind::Category),
                    )
                    .await
                {
                    Ok(category) => {
                        info!(guild_id = message.guild_id, "Created Tickets category");
                        category
                    }
                    Err(e) => {
                        let _ = gateway
                            .dm_user(
                                actor.user_id,
                                OutboundMessage::text(
                                    "Could not create a ticket. The community has no Tickets category.",
                                ),
                            )
                            .await;
                        return Err(e.context("creating Tickets category"));
                    }
                }
            }
        };

        let ticket_number = next_ticket_number(&channels, category.id);

        let mut request = NewChannel::new(
            format!("{TICKET_PREFIX}{ticket_number}"),
            ChannelKind::Text,
        )
        .with_parent(category.id)
        .with_topic(format!(
            "Support ticket #{} created by {}",
            ticket_number, actor.display_name
        ))
        .with_overwrite(PermissionOverwrite::deny(OverwriteTarget::Everyone))
        .with_overwrite(PermissionOverwrite::allow(OverwriteTarget::Member(
            ctx.bot_user_id,
        )))
        .with_overwrite(PermissionOverwrite::allow(OverwriteTarget::Member(
            actor.user_id,
        )));
        for role_id in record.mod_roles() {
            request = request.with_overwrite(PermissionOverwrite::allow(OverwriteTarget::Role(
                role_id,
            )));
        }

        let channel = match gateway.create_channel(message.guild_id, request).await {
            Ok(channel) => channel,
            Err(e) => {
                let _ = gateway
                    .dm_user(
                        actor.user_id,
                        OutboundMessage::text(format!(
                            "There was an error creating your ticket: {e}"
                        )),
                    )
                    .await;
                return Err(e.context("creating ticket channel"));
            }
        };

        let intro = Embed::new()
            .with_title(format!("Ticket #{}", ticket_number))
            .with_description(format!("Support ticket created by {}", actor.mention()))
            .with_color(color::BLUE)
            .with_field(
                "Instructions",
                "Please describe your issue or question, and a staff member will assist you shortly.",
            )
            .with_footer(format!("React with {CLOSE_EMOJI} to close this ticket"));
        let intro_id = gateway
            .send_message(channel.id, OutboundMessage::embed(intro))
            .await?;

        // Arm the intro message so the requester or a moderator can close
        let close_record = TrackedMessage::new(
            intro_id,
            channel.id,
            ctx.bot_user_id,
            message.guild_id,
            crate::record::ActionCategory::Ticket,
        )
        .with_allowed_reactions([CLOSE_EMOJI])
        .with_data_entry("creator_id", serde_json::json!(actor.user_id));
        ctx.registry.register(close_record).await;

        if let Err(e) = gateway.add_reaction(channel.id, intro_id, CLOSE_EMOJI).await {
            debug!("Failed to seed close reaction: {e:#}");
        }

        if let Err(e) = gateway
            .dm_user(
                actor.user_id,
                OutboundMessage::text(format!(
                    "Ticket created! Check #{} to continue.",
                    channel.name
                )),
            )
            .await
        {
            // Member may have DMs disabled
            debug!("Could not send ticket confirmation DM: {e:#}");
        }

        info!(
            channel = %channel.name,
            actor = %actor.display_name,
            "Created ticket channel"
        );

        ctx.registry.unregister(message.id).await;
        Ok(())
    }
}

/// Next sequential ticket number from existing channels under the category.
///
/// Not a persisted counter: two concurrent creations can race to the same
/// number.
fn next_ticket_number(channels: &[ChannelInfo], category_id: u64) -> u64 {
    let mut number = 1;
    for channel in channels.iter().filter(|c| c.parent_id == Some(category_id)) {
        if let Some(suffix) = channel.name.strip_prefix(TICKET_PREFIX) {
            if let Ok(n) = suffix.parse::<u64>() {
                number = number.max(n + 1);
            }
        }
    }
    number
}

/// Close a ticket channel: archive threads, rename (and optionally delete)
/// plain channels.
pub struct CloseTicket;

#[async_trait]
impl ActionHandler for CloseTicket {
    async fn execute(
        &self,
        ctx: &Context,
        message: &Message,
        actor: &Member,
        record: &TrackedMessage,
    ) -> Result<()> {
        let gateway = ctx.gateway.as_ref();
        let channels = gateway.list_channels(message.guild_id).await?;
        let Some(channel) = channels.iter().find(|c| c.id == message.channel_id) else {
            warn!(channel_id = message.channel_id, "Ticket channel not found");
            return Ok(());
        };

        if !channel.name.starts_with(TICKET_PREFIX) {
            return Ok(());
        }

        // Only the requester or a moderator may close
        if let Some(creator_id) = record.creator_id() {
            if creator_id != actor.user_id && !is_moderator(actor) {
                for emoji in &record.allowed_reactions {
                    if let Err(e) = gateway
                        .remove_reaction(message.channel_id, message.id, emoji, actor.user_id)
                        .await
                    {
                        debug!("Failed to remove unauthorized close reaction: {e:#}");
                    }
                }
                return Ok(());
            }
        }

        let notice = Embed::new()
            .with_title("Ticket Closed")
            .with_description(format!(
                "This ticket has been closed by {}",
                actor.mention()
            ))
            .with_color(color::ORANGE);
        gateway
            .send_message(channel.id, OutboundMessage::embed(notice))
            .await?;

        if channel.kind == ChannelKind::Thread {
            gateway.archive_channel(channel.id).await?;
            info!(channel = %channel.name, "Archived ticket thread");
        } else {
            let closed_name = format!(
                "{CLOSED_PREFIX}{}",
                channel.name.trim_start_matches(TICKET_PREFIX)
            );
            gateway
                .rename_channel(channel.id, &closed_name)
                .await
                .context("renaming closed ticket channel")?;
            info!(channel = %closed_name, "Renamed closed ticket channel");

            if record.delete_on_close() {
                tokio::time::sleep(std::time::Duration::from_secs(CLOSE_GRACE_SECS)).await;
                gateway.delete_channel(channel.id).await?;
                info!(channel_id = channel.id, "Deleted closed ticket channel");
            }
        }

        ctx.registry.unregister(message.id).await;
        Ok(())
    }
}
