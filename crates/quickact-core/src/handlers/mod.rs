//! Action handlers.
//!
//! One handler per [`ActionKind`], addressed by a compile-time match rather
//! than any lookup-by-name. Handlers perform their side effects through the
//! gateway in [`Context`] and decide themselves whether the tracked record
//! is finished: every handler that invalidates the message unregisters it;
//! pin is the only repeatable action.

mod approval;
mod moderation;
mod ticket;

pub use approval::{ApproveRequest, DenyRequest};
pub use moderation::{DeleteMessage, KickUser, PinMessage, TimeoutUser, WarnUser};
pub use ticket::{CloseTicket, CreateTicket};

use anyhow::Result;
use async_trait::async_trait;

use crate::action::ActionKind;
use crate::context::Context;
use crate::gateway::{Member, Message};
use crate::record::TrackedMessage;

/// The side-effecting routine executed when a valid, authorized
/// acknowledgment occurs.
#[async_trait]
pub trait ActionHandler: Send + Sync {
    async fn execute(
        &self,
        ctx: &Context,
        message: &Message,
        actor: &Member,
        record: &TrackedMessage,
    ) -> Result<()>;
}

/// Resolve the handler for an action kind.
pub fn handler_for(kind: ActionKind) -> &'static dyn ActionHandler {
    match kind {
        ActionKind::CreateTicket => &CreateTicket,
        ActionKind::ApproveRequest => &ApproveRequest,
        ActionKind::DenyRequest => &DenyRequest,
        ActionKind::CloseTicket => &CloseTicket,
        ActionKind::PinMessage => &PinMessage,
        ActionKind::DeleteMessage => &DeleteMessage,
        ActionKind::TimeoutUser => &TimeoutUser,
        ActionKind::WarnUser => &WarnUser,
        ActionKind::KickUser => &KickUser,
    }
}
