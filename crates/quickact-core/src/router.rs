//! Reaction event router.
//!
//! Entry point for platform reaction events: filters out noise, authorizes
//! the actor, and dispatches the matching handler. The router never panics
//! on platform failures; every outcome is reported as a [`DispatchOutcome`].

use tracing::{debug, error, info, warn};

use crate::action::{ActionKind, ActionTable};
use crate::context::Context;
use crate::gateway::OutboundMessage;
use crate::guard::is_moderator;
use crate::handlers::handler_for;

/// A reaction-added event as delivered by the platform binding.
#[derive(Debug, Clone)]
pub struct ReactionEvent {
    pub message_id: u64,
    pub channel_id: u64,
    pub guild_id: u64,
    pub user_id: u64,
    pub emoji: String,
}

/// What the router did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not an armed message, not an allowed emoji, or a bot actor.
    Ignored,
    /// The actor lacked the capabilities the action requires.
    Denied,
    /// The handler ran to completion.
    Completed(ActionKind),
    /// The handler (or a lookup before it) failed.
    Failed(ActionKind),
}

pub struct Router {
    ctx: Context,
    actions: ActionTable,
}

impl Router {
    pub fn new(ctx: Context, actions: ActionTable) -> Self {
        Self { ctx, actions }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }

    /// Handle one reaction-added event end to end.
    pub async fn on_reaction_added(&self, event: ReactionEvent) -> DispatchOutcome {
        if event.user_id == self.ctx.bot_user_id {
            return DispatchOutcome::Ignored;
        }

        let Some(record) = self.ctx.registry.lookup(event.message_id).await else {
            debug!(message_id = event.message_id, "Reaction on untracked message");
            return DispatchOutcome::Ignored;
        };

        if !record.allows(&event.emoji) {
            debug!(
                message_id = event.message_id,
                emoji = %event.emoji,
                "Reaction emoji not armed for this message"
            );
            return DispatchOutcome::Ignored;
        }

        let Some(action) = self.actions.lookup(&event.emoji) else {
            warn!(
                emoji = %event.emoji,
                message_id = event.message_id,
                "Armed emoji has no action mapping"
            );
            return DispatchOutcome::Ignored;
        };

        let gateway = self.ctx.gateway.as_ref();

        let message = match gateway
            .fetch_message(event.channel_id, event.message_id)
            .await
        {
            Ok(message) => message,
            Err(e) => {
                error!(
                    message_id = event.message_id,
                    "Failed to fetch reacted message: {e:#}"
                );
                return DispatchOutcome::Failed(action);
            }
        };

        let actor = match gateway.resolve_member(event.guild_id, event.user_id).await {
            Ok(actor) => actor,
            Err(e) => {
                error!(user_id = event.user_id, "Failed to resolve reacting member: {e:#}");
                return DispatchOutcome::Failed(action);
            }
        };

        if actor.is_bot {
            return DispatchOutcome::Ignored;
        }

        if action.moderator_only() && !is_moderator(&actor) {
            info!(
                user_id = actor.user_id,
                action = %action,
                "Denied moderator-only action"
            );
            if let Err(e) = gateway
                .remove_reaction(event.channel_id, event.message_id, &event.emoji, actor.user_id)
                .await
            {
                debug!("Failed to remove unauthorized reaction: {e:#}");
            }
            return DispatchOutcome::Denied;
        }

        match handler_for(action)
            .execute(&self.ctx, &message, &actor, &record)
            .await
        {
            Ok(()) => {
                info!(
                    action = %action,
                    message_id = event.message_id,
                    user_id = actor.user_id,
                    "Action completed"
                );
                DispatchOutcome::Completed(action)
            }
            Err(e) => {
                error!(
                    action = %action,
                    message_id = event.message_id,
                    "Action failed: {e:#}"
                );
                let _ = gateway
                    .dm_user(
                        actor.user_id,
                        OutboundMessage::text(format!(
                            "Something went wrong handling your {} reaction. Please try again or contact a moderator.",
                            event.emoji
                        )),
                    )
                    .await;
                DispatchOutcome::Failed(action)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::mock::{GatewayCall, RecordingGateway};
    use crate::gateway::{Capabilities, Member, Message};
    use crate::record::{ActionCategory, TrackedMessage};
    use crate::registry::Registry;
    use crate::store::MemoryStore;
    use serde_json::json;
    use std::sync::Arc;

    const GUILD: u64 = 100;
    const CHANNEL: u64 = 10;
    const MESSAGE: u64 = 1;
    const AUTHOR: u64 = 42;
    const MOD: u64 = 7;
    const BOT: u64 = 999;

    fn router(gateway: Arc<RecordingGateway>) -> Router {
        let registry = Arc::new(Registry::new(Arc::new(MemoryStore::new())));
        let ctx = Context::new(gateway, registry, BOT);
        Router::new(ctx, ActionTable::defaults())
    }

    fn event(emoji: &str, user_id: u64) -> ReactionEvent {
        ReactionEvent {
            message_id: MESSAGE,
            channel_id: CHANNEL,
            guild_id: GUILD,
            user_id,
            emoji: emoji.to_string(),
        }
    }

    async fn arm(router: &Router, category: ActionCategory, reactions: &[&str]) {
        let record = TrackedMessage::new(MESSAGE, CHANNEL, AUTHOR, GUILD, category)
            .with_allowed_reactions(reactions.iter().copied());
        router.context().registry.register(record).await;
    }

    #[tokio::test]
    async fn test_untracked_message_is_ignored() {
        let gateway = Arc::new(RecordingGateway::new());
        let router = router(gateway.clone());

        let outcome = router.on_reaction_added(event("📌", MOD)).await;

        assert_eq!(outcome, DispatchOutcome::Ignored);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_own_reaction_is_ignored() {
        let gateway = Arc::new(RecordingGateway::new());
        let router = router(gateway.clone());
        arm(&router, ActionCategory::Moderation, &["📌"]).await;

        let outcome = router.on_reaction_added(event("📌", BOT)).await;

        assert_eq!(outcome, DispatchOutcome::Ignored);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unarmed_emoji_is_ignored() {
        let gateway = Arc::new(RecordingGateway::new());
        let router = router(gateway.clone());
        arm(&router, ActionCategory::Moderation, &["📌"]).await;

        let outcome = router.on_reaction_added(event("🔨", MOD)).await;

        assert_eq!(outcome, DispatchOutcome::Ignored);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_bot_actor_is_ignored() {
        let gateway = Arc::new(RecordingGateway::new());
        gateway.seed_message(Message::new(MESSAGE, CHANNEL, GUILD, AUTHOR));
        let mut bot = Member::new(55, "other-bot");
        bot.is_bot = true;
        gateway.seed_member(bot);

        let router = router(gateway.clone());
        arm(&router, ActionCategory::Moderation, &["📌"]).await;

        let outcome = router.on_reaction_added(event("📌", 55)).await;

        assert_eq!(outcome, DispatchOutcome::Ignored);
        assert!(gateway.mutating_calls().is_empty());
    }

    #[tokio::test]
    async fn test_moderator_only_action_denied_for_plain_member() {
        let gateway = Arc::new(RecordingGateway::new());
        gateway.seed_message(Message::new(MESSAGE, CHANNEL, GUILD, AUTHOR));
        gateway.seed_member(Member::new(AUTHOR, "bob"));

        let router = router(gateway.clone());
        arm(&router, ActionCategory::Moderation, &["🗑️"]).await;

        let outcome = router.on_reaction_added(event("🗑️", AUTHOR)).await;

        assert_eq!(outcome, DispatchOutcome::Denied);
        assert_eq!(gateway.count_named("remove_reaction"), 1);
        assert!(gateway.calls().iter().any(|c| matches!(
            c,
            GatewayCall::RemoveReaction { user_id: AUTHOR, .. }
        )));
        assert_eq!(gateway.count_named("delete_message"), 0);
        // Denial leaves the message armed
        assert!(router.context().registry.lookup(MESSAGE).await.is_some());
    }

    #[tokio::test]
    async fn test_moderator_runs_restricted_action() {
        let gateway = Arc::new(RecordingGateway::new());
        gateway.seed_message(Message::new(MESSAGE, CHANNEL, GUILD, AUTHOR));
        gateway.seed_member(Member::new(MOD, "mod").with_capabilities(Capabilities::all()));

        let router = router(gateway.clone());
        arm(&router, ActionCategory::Moderation, &["🗑️"]).await;

        let outcome = router.on_reaction_added(event("🗑️", MOD)).await;

        assert_eq!(outcome, DispatchOutcome::Completed(ActionKind::DeleteMessage));
        assert_eq!(gateway.count_named("delete_message"), 1);
        assert!(router.context().registry.lookup(MESSAGE).await.is_none());
    }

    #[tokio::test]
    async fn test_plain_member_runs_unrestricted_action() {
        let gateway = Arc::new(RecordingGateway::new());
        gateway.seed_message(Message::new(MESSAGE, CHANNEL, GUILD, BOT));
        gateway.seed_member(Member::new(AUTHOR, "bob"));

        let router = router(gateway.clone());
        let record = TrackedMessage::new(MESSAGE, CHANNEL, BOT, GUILD, ActionCategory::Approval)
            .with_allowed_reactions(["✅"]);
        router.context().registry.register(record).await;

        let outcome = router.on_reaction_added(event("✅", AUTHOR)).await;

        assert_eq!(
            outcome,
            DispatchOutcome::Completed(ActionKind::ApproveRequest)
        );
    }

    #[tokio::test]
    async fn test_ticket_reaction_creates_channel_and_retires_panel() {
        let gateway = Arc::new(RecordingGateway::new());
        gateway.seed_message(Message::new(MESSAGE, CHANNEL, GUILD, BOT));
        gateway.seed_member(Member::new(AUTHOR, "bob"));
        gateway.seed_channel(crate::gateway::ChannelInfo {
            id: 50,
            guild_id: GUILD,
            name: "Tickets".to_string(),
            kind: crate::gateway::ChannelKind::Category,
            parent_id: None,
        });

        let router = router(gateway.clone());
        arm(&router, ActionCategory::Ticket, &["🎫"]).await;

        let outcome = router.on_reaction_added(event("🎫", AUTHOR)).await;

        assert_eq!(outcome, DispatchOutcome::Completed(ActionKind::CreateTicket));
        assert_eq!(gateway.count_named("create_channel"), 1);
        assert!(router.context().registry.lookup(MESSAGE).await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_failure_reports_failed() {
        let gateway = Arc::new(RecordingGateway::new());
        gateway.fail_on("fetch_message");

        let router = router(gateway.clone());
        arm(&router, ActionCategory::Moderation, &["📌"]).await;

        let outcome = router.on_reaction_added(event("📌", MOD)).await;

        assert_eq!(outcome, DispatchOutcome::Failed(ActionKind::PinMessage));
    }

    #[tokio::test]
    async fn test_handler_failure_notifies_actor() {
        let gateway = Arc::new(RecordingGateway::new());
        gateway.seed_message(Message::new(MESSAGE, CHANNEL, GUILD, AUTHOR));
        gateway.seed_member(Member::new(MOD, "mod").with_capabilities(Capabilities::all()));
        gateway.fail_on("pin_message");

        let router = router(gateway.clone());
        arm(&router, ActionCategory::Moderation, &["📌"]).await;

        let outcome = router.on_reaction_added(event("📌", MOD)).await;

        assert_eq!(outcome, DispatchOutcome::Failed(ActionKind::PinMessage));
        assert!(gateway
            .calls()
            .iter()
            .any(|c| matches!(c, GatewayCall::DmUser { user_id: MOD })));
    }

    #[tokio::test]
    async fn test_pin_stays_armed_for_repeat_dispatch() {
        let gateway = Arc::new(RecordingGateway::new());
        gateway.seed_message(Message::new(MESSAGE, CHANNEL, GUILD, AUTHOR));
        gateway.seed_member(Member::new(MOD, "mod").with_capabilities(Capabilities::all()));

        let router = router(gateway.clone());
        arm(&router, ActionCategory::Moderation, &["📌"]).await;

        let first = router.on_reaction_added(event("📌", MOD)).await;
        let second = router.on_reaction_added(event("📌", MOD)).await;

        assert_eq!(first, DispatchOutcome::Completed(ActionKind::PinMessage));
        assert_eq!(second, DispatchOutcome::Completed(ActionKind::PinMessage));
        assert_eq!(gateway.count_named("pin_message"), 2);
    }

    #[tokio::test]
    async fn test_second_dispatch_after_retirement_is_ignored() {
        let gateway = Arc::new(RecordingGateway::new());
        gateway.seed_message(Message::new(MESSAGE, CHANNEL, GUILD, BOT));
        gateway.seed_member(Member::new(AUTHOR, "bob"));

        let router = router(gateway.clone());
        let record = TrackedMessage::new(MESSAGE, CHANNEL, BOT, GUILD, ActionCategory::Approval)
            .with_allowed_reactions(["✅"]);
        router.context().registry.register(record).await;

        let first = router.on_reaction_added(event("✅", AUTHOR)).await;
        let second = router.on_reaction_added(event("✅", AUTHOR)).await;

        assert_eq!(
            first,
            DispatchOutcome::Completed(ActionKind::ApproveRequest)
        );
        assert_eq!(second, DispatchOutcome::Ignored);
    }

    #[tokio::test]
    async fn test_concurrent_dispatch_is_at_least_once() {
        let gateway = Arc::new(RecordingGateway::new());
        gateway.seed_message(Message::new(MESSAGE, CHANNEL, GUILD, BOT));
        gateway.seed_member(Member::new(AUTHOR, "bob"));
        gateway.seed_member(Member::new(MOD, "mod"));

        let router = Arc::new(router(gateway.clone()));
        let record = TrackedMessage::new(MESSAGE, CHANNEL, BOT, GUILD, ActionCategory::Approval)
            .with_allowed_reactions(["✅"])
            .with_data_entry("approval_action", json!("assign_role"))
            .with_data_entry("target_user_id", json!(AUTHOR))
            .with_data_entry("role_id", json!(777));
        router.context().registry.register(record).await;

        let (a, b) = tokio::join!(
            router.on_reaction_added(event("✅", AUTHOR)),
            router.on_reaction_added(event("✅", MOD)),
        );

        // No per-record dispatch lock: both racers may run the handler, but
        // at least one must, and the record ends up retired either way.
        let completions = [a, b]
            .iter()
            .filter(|o| matches!(o, DispatchOutcome::Completed(_)))
            .count();
        assert!(completions >= 1);
        let grants = gateway.count_named("grant_role");
        assert!((1..=2).contains(&grants));
        assert!(router.context().registry.lookup(MESSAGE).await.is_none());
    }
}
