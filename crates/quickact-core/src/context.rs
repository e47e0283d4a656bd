//! Engine context threaded into every handler call.

use std::sync::Arc;

use crate::gateway::Gateway;
use crate::registry::Registry;

/// Shared collaborators for the router and handlers.
///
/// Handlers get everything they touch through this value; there is no
/// ambient global session state.
#[derive(Clone)]
pub struct Context {
    pub gateway: Arc<dyn Gateway>,
    pub registry: Arc<Registry>,
    /// The automation agent's own user id, used to ignore its own
    /// acknowledgments and grant it access to ticket channels.
    pub bot_user_id: u64,
}

impl Context {
    pub fn new(gateway: Arc<dyn Gateway>, registry: Arc<Registry>, bot_user_id: u64) -> Self {
        Self {
            gateway,
            registry,
            bot_user_id,
        }
    }
}
