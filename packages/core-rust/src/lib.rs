//! `ClientRisk` Core: risk profile enumeration and client record types.

pub mod risk_profile;
pub mod types;

pub use risk_profile::{InvalidRiskProfile, RiskProfile};
pub use types::{Client, ClientDto, ClientId, NewClient};
