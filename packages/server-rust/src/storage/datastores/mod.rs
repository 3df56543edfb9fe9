//! External database [`ClientStore`](crate::traits::ClientStore) backends.
//!
//! Each backend sits behind its own cargo feature so the default build
//! carries no database driver.

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::PostgresClientStore;
