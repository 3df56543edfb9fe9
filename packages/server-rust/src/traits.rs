use async_trait::async_trait;
use clientrisk_core::{Client, ClientId, NewClient, RiskProfile};

/// Pluggable persistence backend for client records.
/// Implementations: in-memory (default, tests), `PostgreSQL` (`postgres` feature).
///
/// The store performs no validation: every value it receives has already been
/// parsed into a [`RiskProfile`] by the service.
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Load every client, ordered by ascending id.
    async fn find_all(&self) -> anyhow::Result<Vec<Client>>;

    /// Load a single client by id.
    async fn find_by_id(&self, id: ClientId) -> anyhow::Result<Option<Client>>;

    /// Whether at least one client currently holds `profile`.
    async fn exists_by_risk_profile(&self, profile: RiskProfile) -> anyhow::Result<bool>;

    /// Insert a new record under the next id from the store's sequence.
    async fn insert(&self, client: NewClient) -> anyhow::Result<Client>;

    /// Overwrite the risk profile of an existing record in one atomic step.
    ///
    /// Returns `None` and writes nothing when no record holds `client.id`,
    /// so a concurrently deleted client is never re-created.
    async fn update(&self, client: Client) -> anyhow::Result<Option<Client>>;

    /// Delete a client by id. Deleting an absent id is not an error.
    async fn delete_by_id(&self, id: ClientId) -> anyhow::Result<()>;

    /// Number of stored clients.
    async fn count(&self) -> anyhow::Result<usize>;

    /// Short backend identifier reported by the health endpoint.
    fn backend_name(&self) -> &'static str;
}
