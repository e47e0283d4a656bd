//! Platform gateway abstraction.
//!
//! The engine never talks to the chat platform directly; everything goes
//! through the [`Gateway`] trait so bindings (and tests) are swappable.

pub mod traits;
pub mod types;

pub use traits::Gateway;
pub use types::{
    Capabilities, ChannelInfo, ChannelKind, Embed, EmbedField, Member, Message, NewChannel,
    OutboundMessage, OverwriteTarget, PermissionOverwrite, color,
};

#[cfg(test)]
pub use traits::mock;
