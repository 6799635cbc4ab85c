use crate::config::KeyMapConfig;
use crate::keymap::KeyMapManager;
use crate::source::ProfileSource;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

/// Process-wide handle to the active keymap.
///
/// Readers take a cheap snapshot and resolve keys without holding the lock;
/// a reload builds the new manager first and then swaps it in, so a lookup
/// never sees a half-loaded table.
#[derive(Debug)]
pub struct SharedKeyMap {
    current: RwLock<Arc<KeyMapManager>>,
}

impl Default for SharedKeyMap {
    fn default() -> Self {
        Self::new(KeyMapManager::default())
    }
}

impl SharedKeyMap {
    pub fn new(manager: KeyMapManager) -> Self {
        Self {
            current: RwLock::new(Arc::new(manager)),
        }
    }

    pub fn snapshot(&self) -> Arc<KeyMapManager> {
        Arc::clone(&self.current.read())
    }

    pub fn publish(&self, manager: KeyMapManager) {
        *self.current.write() = Arc::new(manager);
    }

    /// Rebuilds from `config` unless the active keymap already behaves the
    /// same. Returns whether a new keymap was published.
    pub fn reload(&self, config: &KeyMapConfig, source: &dyn ProfileSource) -> bool {
        if self.snapshot().config().is_same_applicable(config) {
            debug!("KeyMap: config unchanged, keeping current tables");
            return false;
        }
        let manager = KeyMapManager::with_source(config, source);
        info!("KeyMap: publishing {:?}", config.profile);
        self.publish(manager);
        true
    }
}
