pub mod action;
pub mod context;
pub mod gateway;
pub mod guard;
pub mod handlers;
pub mod record;
pub mod registry;
pub mod router;
pub mod setup;
pub mod store;

pub use action::{ActionKind, ActionTable, DEFAULT_ACTIONS};
pub use record::{ActionCategory, TrackedMessage};
pub use router::{DispatchOutcome, ReactionEvent, Router};

use std::path::Path;
use std::sync::Arc;
use tracing::info;

use context::Context;
use gateway::Gateway;
use registry::Registry;
use store::{RecordStore, RedbRecordStore};

/// Engine state shared between the platform binding and the CLI.
///
/// Wires the persistent store, the registry, and the router around a
/// gateway. The platform binding forwards reaction events to
/// [`Engine::router`]; everything else hangs off the parts.
pub struct Engine {
    pub registry: Arc<Registry>,
    router: Router,
}

impl Engine {
    /// Open the redb-backed store at `db_path` and hydrate the registry.
    pub async fn new(
        db_path: impl AsRef<Path>,
        gateway: Arc<dyn Gateway>,
        bot_user_id: u64,
        actions: ActionTable,
    ) -> anyhow::Result<Self> {
        let storage = quickact_storage::Storage::new(db_path)?;
        let store = Arc::new(RedbRecordStore::new(storage.tracked));
        Self::with_store(store, gateway, bot_user_id, actions).await
    }

    /// Build on any store implementation. Used directly in tests and by
    /// deployments that keep the legacy JSON file.
    pub async fn with_store(
        store: Arc<dyn RecordStore>,
        gateway: Arc<dyn Gateway>,
        bot_user_id: u64,
        actions: ActionTable,
    ) -> anyhow::Result<Self> {
        let registry = Arc::new(Registry::new(store));
        let loaded = registry.load().await?;

        let ctx = Context::new(gateway, registry.clone(), bot_user_id);
        let router = Router::new(ctx, actions);

        info!(
            tracked = loaded,
            actions = router.actions().len(),
            "Reaction engine initialized"
        );
        Ok(Self { registry, router })
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn context(&self) -> &Context {
        self.router.context()
    }

    pub fn actions(&self) -> &ActionTable {
        self.router.actions()
    }
}
