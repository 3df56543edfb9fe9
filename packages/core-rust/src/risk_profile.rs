//! Risk profile enumeration with fixed precedence.
//!
//! A client's risk profile is one of three canonical names. Precedence is
//! `HIGH > NORMAL > LOW` and is expressed through the derived [`Ord`] impl,
//! so the variant declaration order below is significant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Categorical risk attribute carried by every client.
///
/// Serializes as the upper-case canonical name (`"HIGH"`, `"NORMAL"`, `"LOW"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskProfile {
    /// Lowest precedence; the fallback when nothing else is present.
    Low,
    /// Middle precedence.
    Normal,
    /// Highest precedence.
    High,
}

/// Error returned when a submitted risk profile cannot be accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRiskProfile {
    /// No risk profile was supplied.
    #[error("risk profile is missing")]
    Missing,
    /// The value is not one of the canonical names.
    #[error("unknown risk profile: {0:?}")]
    Unknown(String),
}

impl RiskProfile {
    /// All risk profiles in precedence order, highest first.
    pub const ALL: [RiskProfile; 3] = [RiskProfile::High, RiskProfile::Normal, RiskProfile::Low];

    /// Returns the canonical upper-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RiskProfile::High => "HIGH",
            RiskProfile::Normal => "NORMAL",
            RiskProfile::Low => "LOW",
        }
    }

    /// Membership test against the canonical names (case-sensitive).
    #[must_use]
    pub fn is_valid(value: &str) -> bool {
        Self::ALL.iter().any(|p| p.as_str() == value)
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskProfile {
    type Err = InvalidRiskProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| InvalidRiskProfile::Unknown(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn precedence_order() {
        assert!(RiskProfile::High > RiskProfile::Normal);
        assert!(RiskProfile::Normal > RiskProfile::Low);
        assert_eq!(
            RiskProfile::ALL,
            [RiskProfile::High, RiskProfile::Normal, RiskProfile::Low]
        );
    }

    #[test]
    fn parse_canonical_names() {
        assert_eq!("HIGH".parse::<RiskProfile>(), Ok(RiskProfile::High));
        assert_eq!("NORMAL".parse::<RiskProfile>(), Ok(RiskProfile::Normal));
        assert_eq!("LOW".parse::<RiskProfile>(), Ok(RiskProfile::Low));
    }

    #[test]
    fn parse_is_case_sensitive() {
        let err = "high".parse::<RiskProfile>().unwrap_err();
        assert_eq!(err, InvalidRiskProfile::Unknown("high".to_string()));
        assert!(!RiskProfile::is_valid("Normal"));
        assert!(!RiskProfile::is_valid(" LOW"));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("DROP TABLE ...".parse::<RiskProfile>().is_err());
        assert!("".parse::<RiskProfile>().is_err());
    }

    #[test]
    fn serde_uses_canonical_names() {
        let json = serde_json::to_string(&RiskProfile::Normal).unwrap();
        assert_eq!(json, "\"NORMAL\"");
        let parsed: RiskProfile = serde_json::from_str("\"HIGH\"").unwrap();
        assert_eq!(parsed, RiskProfile::High);
        assert!(serde_json::from_str::<RiskProfile>("\"high\"").is_err());
    }

    fn any_profile() -> impl Strategy<Value = RiskProfile> {
        prop_oneof![
            Just(RiskProfile::High),
            Just(RiskProfile::Normal),
            Just(RiskProfile::Low),
        ]
    }

    proptest! {
        #[test]
        fn display_parses_back(p in any_profile()) {
            prop_assert_eq!(p.to_string().parse::<RiskProfile>(), Ok(p));
        }

        #[test]
        fn unknown_strings_are_invalid(s in "[a-z ]{0,12}") {
            prop_assert!(!RiskProfile::is_valid(&s));
        }
    }
}
