//! `PostgreSQL` [`ClientStore`] implementation using `sqlx`.
//!
//! Clients live in a single `clients` table. Risk profiles are stored as
//! their canonical names; a row holding any other value is reported as a
//! storage error rather than surfaced to callers.

use anyhow::Context;
use async_trait::async_trait;
use clientrisk_core::{Client, ClientId, NewClient, RiskProfile};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::traits::ClientStore;

const CREATE_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS clients (
    id BIGSERIAL PRIMARY KEY,
    risk_profile TEXT NOT NULL
)";

/// Raw row shape of the `clients` table.
#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: i64,
    risk_profile: String,
}

impl TryFrom<ClientRow> for Client {
    type Error = anyhow::Error;

    fn try_from(row: ClientRow) -> anyhow::Result<Self> {
        let risk_profile = row
            .risk_profile
            .parse::<RiskProfile>()
            .with_context(|| format!("client {} has a corrupt risk profile", row.id))?;
        Ok(Client {
            id: row.id,
            risk_profile,
        })
    }
}

/// Client store backed by a `PostgreSQL` connection pool.
pub struct PostgresClientStore {
    pool: PgPool,
}

impl PostgresClientStore {
    /// Connects a pool to `database_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("failed to connect to PostgreSQL")?;
        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `clients` table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the DDL statement fails.
    pub async fn initialize(&self) -> anyhow::Result<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        info!("clients table ready");
        Ok(())
    }
}

#[async_trait]
impl ClientStore for PostgresClientStore {
    async fn find_all(&self) -> anyhow::Result<Vec<Client>> {
        let rows: Vec<ClientRow> =
            sqlx::query_as("SELECT id, risk_profile FROM clients ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter().map(Client::try_from).collect()
    }

    async fn find_by_id(&self, id: ClientId) -> anyhow::Result<Option<Client>> {
        let row: Option<ClientRow> =
            sqlx::query_as("SELECT id, risk_profile FROM clients WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(Client::try_from).transpose()
    }

    async fn exists_by_risk_profile(&self, profile: RiskProfile) -> anyhow::Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clients WHERE risk_profile = $1)")
                .bind(profile.as_str())
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn insert(&self, client: NewClient) -> anyhow::Result<Client> {
        let row: ClientRow = sqlx::query_as(
            "INSERT INTO clients (risk_profile) VALUES ($1) RETURNING id, risk_profile",
        )
        .bind(client.risk_profile.as_str())
        .fetch_one(&self.pool)
        .await?;
        Client::try_from(row)
    }

    async fn update(&self, client: Client) -> anyhow::Result<Option<Client>> {
        let row: Option<ClientRow> = sqlx::query_as(
            "UPDATE clients SET risk_profile = $2 WHERE id = $1 RETURNING id, risk_profile",
        )
        .bind(client.id)
        .bind(client.risk_profile.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Client::try_from).transpose()
    }

    async fn delete_by_id(&self, id: ClientId) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count(&self) -> anyhow::Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients")
            .fetch_one(&self.pool)
            .await?;
        Ok(usize::try_from(count)?)
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
