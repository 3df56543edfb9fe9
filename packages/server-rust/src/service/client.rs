//! Client business logic: validation, lookup, mutation, and merge.

use std::sync::Arc;

use clientrisk_core::{Client, ClientDto, ClientId, NewClient, RiskProfile};

use super::error::ServiceError;
use super::metrics::instrumented;
use crate::traits::ClientStore;

/// The sole business-logic component for client records.
///
/// Depends only on the [`ClientStore`] capability, never on a concrete
/// backend. Cloning is cheap; all clones share the same store.
#[derive(Clone)]
pub struct ClientService {
    store: Arc<dyn ClientStore>,
}

impl ClientService {
    #[must_use]
    pub fn new(store: Arc<dyn ClientStore>) -> Self {
        Self { store }
    }

    /// The underlying store, for health reporting.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn ClientStore> {
        &self.store
    }

    /// Returns every client in store order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if the store fails.
    pub async fn find_all(&self) -> Result<Vec<Client>, ServiceError> {
        instrumented("find_all", async { Ok(self.store.find_all().await?) }).await
    }

    /// Returns the client with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if no such client exists.
    pub async fn get_client(&self, id: ClientId) -> Result<Client, ServiceError> {
        instrumented("get_client", self.lookup(id)).await
    }

    /// Validates `dto` and persists a new client with a store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidResource`] if the risk profile is absent
    /// or unrecognized; nothing is written in that case.
    pub async fn create_client(&self, dto: &ClientDto) -> Result<Client, ServiceError> {
        instrumented("create_client", async {
            let risk_profile = dto.validate()?;
            let client = self.store.insert(NewClient { risk_profile }).await?;
            tracing::info!(id = client.id, %risk_profile, "client created");
            Ok(client)
        })
        .await
    }

    /// Overwrites the risk profile of an existing client.
    ///
    /// The client is resolved before the payload is validated, so an unknown
    /// id reports `NotFound` even when the payload is also invalid. The write
    /// only touches an existing record; if the client disappears between the
    /// lookup and the write, nothing is stored and `NotFound` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] for an unknown id and
    /// [`ServiceError::InvalidResource`] for an invalid payload.
    pub async fn update_client(&self, id: ClientId, dto: &ClientDto) -> Result<(), ServiceError> {
        instrumented("update_client", async {
            let mut client = self.lookup(id).await?;
            client.risk_profile = dto.validate()?;
            self.store
                .update(client)
                .await?
                .ok_or(ServiceError::NotFound { id })?;
            tracing::info!(id, risk_profile = %client.risk_profile, "client updated");
            Ok(())
        })
        .await
    }

    /// Deletes the client with the given id. Absent ids are not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if the store fails.
    pub async fn delete_client_by_id(&self, id: ClientId) -> Result<(), ServiceError> {
        instrumented("delete_client", async {
            self.store.delete_by_id(id).await?;
            tracing::info!(id, "client deleted");
            Ok(())
        })
        .await
    }

    /// Returns every client with its risk profile replaced by the dominant one.
    ///
    /// The dominant profile is asked of the store after the list is read:
    /// `HIGH` if any client holds it, else `NORMAL` if any client holds it,
    /// else `LOW`. The result is a view: nothing is written back.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if the store fails.
    pub async fn merge(&self) -> Result<Vec<Client>, ServiceError> {
        instrumented("merge", async {
            let mut clients = self.store.find_all().await?;
            let dominant = self.dominant_stored_profile().await?;
            for client in &mut clients {
                client.risk_profile = dominant;
            }
            tracing::debug!(%dominant, count = clients.len(), "clients merged");
            Ok(clients)
        })
        .await
    }

    /// Probes the store in precedence order and stops at the first hit.
    /// `LOW` is the fallback and is never probed.
    async fn dominant_stored_profile(&self) -> anyhow::Result<RiskProfile> {
        for candidate in RiskProfile::ALL {
            if candidate == RiskProfile::Low
                || self.store.exists_by_risk_profile(candidate).await?
            {
                return Ok(candidate);
            }
        }
        Ok(RiskProfile::Low)
    }

    async fn lookup(&self, id: ClientId) -> Result<Client, ServiceError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound { id })
    }
}
