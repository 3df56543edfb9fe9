//! In-memory [`ClientStore`] implementation backed by [`DashMap`].
//!
//! Provides concurrent read/write access without external locking.
//! Suitable for development, testing, and deployments where losing all
//! clients on restart is acceptable.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use clientrisk_core::{Client, ClientId, NewClient, RiskProfile};
use dashmap::DashMap;

use crate::traits::ClientStore;

/// In-memory client storage keyed by id.
///
/// Ids come from a monotonically increasing sequence starting at 1 and are
/// never reused, even after the record holding them is deleted.
pub struct HashMapClientStore {
    entries: DashMap<ClientId, RiskProfile>,
    next_id: AtomicI64,
}

impl HashMapClientStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Creates a store pre-populated with `clients`.
    ///
    /// The id sequence continues after the largest seeded id.
    #[must_use]
    pub fn with_clients(clients: impl IntoIterator<Item = Client>) -> Self {
        let store = Self::new();
        for client in clients {
            store.seed(client);
        }
        store
    }

    fn seed(&self, client: Client) {
        self.entries.insert(client.id, client.risk_profile);
        self.next_id.fetch_max(client.id + 1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all entries, sorted by id.
    ///
    /// `DashMap` iteration order is unspecified, so sorting is what gives
    /// `find_all` a stable order.
    fn snapshot(&self) -> Vec<Client> {
        let mut clients: Vec<Client> = self
            .entries
            .iter()
            .map(|entry| Client {
                id: *entry.key(),
                risk_profile: *entry.value(),
            })
            .collect();
        clients.sort_by_key(|c| c.id);
        clients
    }
}

impl Default for HashMapClientStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClientStore for HashMapClientStore {
    async fn find_all(&self) -> anyhow::Result<Vec<Client>> {
        Ok(self.snapshot())
    }

    async fn find_by_id(&self, id: ClientId) -> anyhow::Result<Option<Client>> {
        Ok(self.entries.get(&id).map(|entry| Client {
            id,
            risk_profile: *entry.value(),
        }))
    }

    async fn exists_by_risk_profile(&self, profile: RiskProfile) -> anyhow::Result<bool> {
        Ok(self.entries.iter().any(|entry| *entry.value() == profile))
    }

    async fn insert(&self, client: NewClient) -> anyhow::Result<Client> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(id, client.risk_profile);
        Ok(Client {
            id,
            risk_profile: client.risk_profile,
        })
    }

    async fn update(&self, client: Client) -> anyhow::Result<Option<Client>> {
        // get_mut holds the shard lock, so a racing remove either lands
        // before (nothing written) or waits for this write.
        Ok(self.entries.get_mut(&client.id).map(|mut entry| {
            *entry.value_mut() = client.risk_profile;
            client
        }))
    }

    async fn delete_by_id(&self, id: ClientId) -> anyhow::Result<()> {
        self.entries.remove(&id);
        Ok(())
    }

    async fn count(&self) -> anyhow::Result<usize> {
        Ok(self.entries.len())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
