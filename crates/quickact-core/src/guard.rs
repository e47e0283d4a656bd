//! Permission guard for moderator-restricted actions.

use crate::gateway::Member;

/// Whether the member may invoke moderator-restricted actions.
///
/// Pure function of the platform-reported capabilities: administrator,
/// manage-messages, or manage-community, any one suffices.
pub fn is_moderator(member: &Member) -> bool {
    let caps = &member.capabilities;
    caps.administrator || caps.manage_messages || caps.manage_guild
}
