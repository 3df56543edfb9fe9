use serde::{Deserialize, Serialize};

use crate::risk_profile::{InvalidRiskProfile, RiskProfile};

/// Store-assigned client identifier.
pub type ClientId = i64;

/// A persisted client record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Identity assigned by the store on insert. Never changes afterwards.
    #[cfg_attr(feature = "openapi", schema(value_type = i64))]
    pub id: ClientId,
    /// Current risk profile.
    pub risk_profile: RiskProfile,
}

/// A client that has been validated but not yet assigned an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewClient {
    pub risk_profile: RiskProfile,
}

/// Transfer shape for create and update requests.
///
/// The risk profile is kept as a raw optional string so that an absent or
/// unrecognized value reaches validation instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    /// One of `HIGH`, `NORMAL`, `LOW`.
    #[serde(default)]
    pub risk_profile: Option<String>,
}

impl ClientDto {
    /// Creates a DTO carrying the given raw risk profile.
    pub fn new(risk_profile: impl Into<String>) -> Self {
        Self {
            risk_profile: Some(risk_profile.into()),
        }
    }

    /// Validates the submitted risk profile against the enumeration.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRiskProfile::Missing`] when no value was submitted and
    /// [`InvalidRiskProfile::Unknown`] when it is not an exact canonical name.
    pub fn validate(&self) -> Result<RiskProfile, InvalidRiskProfile> {
        self.risk_profile
            .as_deref()
            .ok_or(InvalidRiskProfile::Missing)?
            .parse()
    }
}
