//! Numeric tab ids for CDP target ids.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use pagescript_protocols::TabId;

/// Two-way table between CDP target ids and the numeric ids handed out to
/// callers. An id stays bound to its target for the life of the process.
#[derive(Default)]
pub struct TabTable {
    next_id: AtomicU64,
    by_target: DashMap<String, TabId>,
    by_id: DashMap<TabId, String>,
}

impl TabTable {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            ..Default::default()
        }
    }

    /// Id for the target, allocating one on first sight.
    pub fn id_for(&self, target_id: &str) -> TabId {
        if let Some(id) = self.by_target.get(target_id) {
            return *id;
        }
        let id = *self
            .by_target
            .entry(target_id.to_string())
            .or_insert_with(|| self.next_id.fetch_add(1, Ordering::SeqCst));
        self.by_id.insert(id, target_id.to_string());
        id
    }

    pub fn target_for(&self, tab_id: TabId) -> Option<String> {
        self.by_id.get(&tab_id).map(|t| t.clone())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
