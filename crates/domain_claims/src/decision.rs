//! Claim decision rules
//!
//! Only rain damage backed by a matching weather record is approved.
//! Fire damage, other damage and unrecognised photos are denied whatever
//! the weather says.

use serde::{Deserialize, Serialize};

use crate::assessment::DamageCategory;

/// Reason attached to every denial
pub const NO_MATCHING_WEATHER: &str = "No matching weather event found";

/// Outcome of the decision rules
///
/// Invariant: `reason` is empty iff `approved`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub approved: bool,
    pub reason: String,
}

impl Decision {
    /// Creates an approval
    pub fn approve() -> Self {
        Self {
            approved: true,
            reason: String::new(),
        }
    }

    /// Creates a denial
    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            approved: false,
            reason: reason.into(),
        }
    }

    /// Returns the pair form `(approved, reason)`
    pub fn as_pair(&self) -> (bool, &str) {
        (self.approved, &self.reason)
    }
}

/// Evaluates a claim from its damage category and weather corroboration
///
/// Total and pure: every input yields a decision and nothing else happens.
pub fn evaluate(category: DamageCategory, weather_ok: bool) -> Decision {
    match (category, weather_ok) {
        (DamageCategory::RainDamage, true) => Decision::approve(),
        _ => Decision::deny(NO_MATCHING_WEATHER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rain_with_weather_is_approved() {
        assert_eq!(evaluate(DamageCategory::RainDamage, true).as_pair(), (true, ""));
    }

    #[test]
    fn test_rain_without_weather_is_denied() {
        assert_eq!(
            evaluate(DamageCategory::RainDamage, false).as_pair(),
            (false, NO_MATCHING_WEATHER)
        );
    }

    #[test]
    fn test_fire_is_denied_even_when_corroborated() {
        assert_eq!(
            evaluate(DamageCategory::FireDamage, true).as_pair(),
            (false, NO_MATCHING_WEATHER)
        );
    }

    #[test]
    fn test_unknown_is_denied() {
        assert_eq!(
            evaluate(DamageCategory::Unknown, false).as_pair(),
            (false, NO_MATCHING_WEATHER)
        );
    }
}
