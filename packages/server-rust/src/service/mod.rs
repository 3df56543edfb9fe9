//! Client business logic.
//!
//! - [`client`]: [`ClientService`], the single component that validates,
//!   reads, writes, and merges client records
//! - [`error`]: [`ServiceError`] returned by every operation
//! - [`metrics`]: per-operation tracing spans and metric recording

pub mod client;
pub mod error;
pub mod metrics;

pub use client::ClientService;
pub use error::ServiceError;
