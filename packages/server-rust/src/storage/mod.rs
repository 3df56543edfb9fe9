//! Client persistence backends.
//!
//! - [`engines`]: in-process stores ([`HashMapClientStore`])
//! - [`datastores`]: external database stores (`PostgresClientStore`,
//!   behind the `postgres` feature)
//! - [`factory`]: [`StorageConfig`] and [`open_store`] for backend selection

pub mod datastores;
pub mod engines;
pub mod factory;

pub use engines::HashMapClientStore;
pub use factory::{open_store, StorageConfig};
