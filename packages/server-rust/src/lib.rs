//! `ClientRisk` Server: REST API for client risk profiles with pluggable storage.

pub mod network;
pub mod service;
pub mod storage;
pub mod traits;

pub use service::{ClientService, ServiceError};
pub use traits::ClientStore;
