//! In-memory transport mock shared by use-case tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use capstan_domain::{Resource, ResourceKind, VariableSet};

use crate::ports::{Clock, ResourceClient, TransportError};

/// Clock pinned to a fixed instant.
pub(crate) struct FrozenClock;

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default()
    }
}

/// Transport mock backed by seeded in-memory collections.
///
/// Records commits and deletions so tests can assert call counts and
/// ordering after moving the client into a use case (share it through
/// an `Arc`).
#[derive(Default)]
pub(crate) struct MockClient {
    collections: Mutex<HashMap<ResourceKind, Vec<Resource>>>,
    variable_sets: Mutex<HashMap<String, VariableSet>>,
    updates: Mutex<Vec<VariableSet>>,
    deleted: Mutex<Vec<String>>,
    find_all_calls: AtomicUsize,
}

impl MockClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn seed(&self, kind: ResourceKind, resources: Vec<Resource>) {
        self.locked(&self.collections).insert(kind, resources);
    }

    pub(crate) fn seed_variable_set(&self, link: &str, set: VariableSet) {
        self.locked(&self.variable_sets)
            .insert(link.to_string(), set);
    }

    pub(crate) fn committed_sets(&self) -> Vec<VariableSet> {
        self.locked(&self.updates).clone()
    }

    pub(crate) fn update_count(&self) -> usize {
        self.locked(&self.updates).len()
    }

    pub(crate) fn deleted_ids(&self) -> Vec<String> {
        self.locked(&self.deleted).clone()
    }

    pub(crate) fn find_all_count(&self) -> usize {
        self.find_all_calls.load(Ordering::SeqCst)
    }

    fn locked<'a, T>(&self, mutex: &'a Mutex<T>) -> std::sync::MutexGuard<'a, T> {
        mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl ResourceClient for MockClient {
    async fn find_all(&self, kind: ResourceKind) -> Result<Vec<Resource>, TransportError> {
        self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .locked(&self.collections)
            .get(&kind)
            .cloned()
            .unwrap_or_default())
    }

    async fn get(&self, kind: ResourceKind, id: &str) -> Result<Resource, TransportError> {
        self.locked(&self.collections)
            .get(&kind)
            .and_then(|resources| resources.iter().find(|r| r.id == id).cloned())
            .ok_or_else(|| TransportError::NotFound {
                kind,
                id: id.to_string(),
            })
    }

    async fn get_variable_set(&self, link: &str) -> Result<VariableSet, TransportError> {
        self.locked(&self.variable_sets)
            .get(link)
            .cloned()
            .ok_or_else(|| TransportError::Network(format!("no variable set behind '{link}'")))
    }

    async fn update_variable_set(&self, set: &VariableSet) -> Result<(), TransportError> {
        self.locked(&self.updates).push(set.clone());
        // Committed state becomes visible to subsequent fetches.
        let mut sets = self.locked(&self.variable_sets);
        for stored in sets.values_mut() {
            if stored.id == set.id {
                *stored = set.clone();
            }
        }
        Ok(())
    }

    async fn delete(&self, kind: ResourceKind, resource: &Resource) -> Result<(), TransportError> {
        self.locked(&self.deleted).push(resource.id.clone());
        let mut collections = self.locked(&self.collections);
        if let Some(resources) = collections.get_mut(&kind) {
            resources.retain(|r| r.id != resource.id);
        }
        Ok(())
    }
}
