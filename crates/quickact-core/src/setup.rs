//! Arming messages for reaction handling.
//!
//! Everything here runs before the router ever sees an event: validating the
//! requested reaction set against the action table, building the record, and
//! seeding the agent's own reactions so members can click instead of type.

use serde_json::{Map, Value, json};
use thiserror::Error;
use tracing::{debug, info};

use crate::action::ActionTable;
use crate::context::Context;
use crate::gateway::{Embed, OutboundMessage, color};
use crate::record::{ActionCategory, TrackedMessage};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("reaction {emoji} is not mapped to any action")]
    UnknownReaction { emoji: String },

    #[error("no reactions requested")]
    EmptyReactions,

    #[error("no emoji is mapped to action {action}")]
    MissingAction { action: &'static str },

    #[error(transparent)]
    Gateway(#[from] anyhow::Error),
}

/// Validate a reaction set and register a message for handling.
///
/// The record's reactions must all resolve through the action table; an
/// armed emoji the router cannot map would sit dead on the message.
pub async fn register_message(
    ctx: &Context,
    actions: &ActionTable,
    message_id: u64,
    channel_id: u64,
    author_id: u64,
    guild_id: u64,
    category: ActionCategory,
    reactions: Vec<String>,
    data: Map<String, Value>,
) -> Result<TrackedMessage, SetupError> {
    if reactions.is_empty() {
        return Err(SetupError::EmptyReactions);
    }
    for emoji in &reactions {
        if !actions.contains(emoji) {
            return Err(SetupError::UnknownReaction {
                emoji: emoji.clone(),
            });
        }
    }

    let record = TrackedMessage::new(message_id, channel_id, author_id, guild_id, category)
        .with_allowed_reactions(reactions)
        .with_data(data);
    ctx.registry.register(record.clone()).await;
    Ok(record)
}

/// Reaction set armed for each category.
fn reactions_for(actions: &ActionTable, category: ActionCategory) -> Vec<String> {
    use crate::action::ActionKind;

    let kinds: &[ActionKind] = match category {
        ActionCategory::Ticket => &[ActionKind::CreateTicket],
        ActionCategory::Approval => &[ActionKind::ApproveRequest, ActionKind::DenyRequest],
        ActionCategory::Moderation => &[
            ActionKind::PinMessage,
            ActionKind::DeleteMessage,
            ActionKind::TimeoutUser,
            ActionKind::WarnUser,
            ActionKind::KickUser,
        ],
        ActionCategory::All => return actions.emojis(),
    };
    kinds
        .iter()
        .filter_map(|&kind| actions.emoji_for(kind))
        .collect()
}

/// Arm an existing message with the category's full reaction set.
///
/// Fetches the message to pick up its author, registers it, and seeds the
/// agent's own reactions so the choices are visible. A failed seed is logged
/// and skipped; the registration stands.
pub async fn arm_message(
    ctx: &Context,
    actions: &ActionTable,
    channel_id: u64,
    message_id: u64,
    guild_id: u64,
    category: ActionCategory,
    data: Map<String, Value>,
) -> Result<TrackedMessage, SetupError> {
    let message = ctx.gateway.fetch_message(channel_id, message_id).await?;

    let reactions = reactions_for(actions, category);
    let record = register_message(
        ctx,
        actions,
        message_id,
        channel_id,
        message.author_id,
        guild_id,
        category,
        reactions,
        data,
    )
    .await?;

    for emoji in &record.allowed_reactions {
        if let Err(e) = ctx.gateway.add_reaction(channel_id, message_id, emoji).await {
            debug!(emoji = %emoji, "Failed to seed reaction: {e:#}");
        }
    }

    info!(
        message_id,
        category = %category,
        reactions = record.allowed_reactions.len(),
        "Armed message for reaction handling"
    );
    Ok(record)
}

/// Post a ticket panel and arm it.
///
/// Returns the panel's message id. Members react 🎫 to open a ticket;
/// `mod_roles` are granted access to every channel the panel creates.
pub async fn create_ticket_panel(
    ctx: &Context,
    actions: &ActionTable,
    channel_id: u64,
    guild_id: u64,
    mod_roles: Vec<u64>,
) -> Result<u64, SetupError> {
    let ticket_emoji = actions
        .emoji_for(crate::action::ActionKind::CreateTicket)
        .ok_or(SetupError::MissingAction {
            action: "create_ticket",
        })?;

    let panel = Embed::new()
        .with_title("Support Tickets")
        .with_description(format!(
            "React with {ticket_emoji} to open a private support ticket."
        ))
        .with_color(color::BLUE)
        .with_footer("A staff member will respond as soon as possible");
    let message_id = ctx
        .gateway
        .send_message(channel_id, OutboundMessage::embed(panel))
        .await?;

    let mut data = Map::new();
    data.insert("mod_roles".to_string(), json!(mod_roles));

    register_message(
        ctx,
        actions,
        message_id,
        channel_id,
        ctx.bot_user_id,
        guild_id,
        ActionCategory::Ticket,
        vec![ticket_emoji.clone()],
        data,
    )
    .await?;

    if let Err(e) = ctx
        .gateway
        .add_reaction(channel_id, message_id, &ticket_emoji)
        .await
    {
        debug!("Failed to seed panel reaction: {e:#}");
    }

    info!(channel_id, message_id, "Created ticket panel");
    Ok(message_id)
}
