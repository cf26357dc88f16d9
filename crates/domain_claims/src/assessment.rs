//! Damage assessment produced by the damage classifier
//!
//! The classifier reports object detections; mapping the first detection to
//! a category and an area-based estimate is domain logic and lives here so
//! every classifier adapter agrees on it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{Currency, Money};
use crate::error::ClaimError;

/// Lower bound of an estimate when a detection exists
pub const MIN_ESTIMATE: u32 = 500;
/// Upper bound of an estimate when a detection exists
pub const MAX_ESTIMATE: u32 = 5000;
/// Pixel area represented by one currency unit of estimate
pub const AREA_PER_UNIT: f64 = 1000.0;

/// Closed classification of claimed damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageCategory {
    RainDamage,
    FireDamage,
    Other,
    Unknown,
}

impl DamageCategory {
    /// Maps a detector class id to a category
    ///
    /// Ids outside the trained label set count as `Other`.
    pub fn from_class_id(class_id: u32) -> Self {
        match class_id {
            0 => DamageCategory::RainDamage,
            1 => DamageCategory::FireDamage,
            _ => DamageCategory::Other,
        }
    }

    /// Returns the wire/storage label
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageCategory::RainDamage => "rain_damage",
            DamageCategory::FireDamage => "fire_damage",
            DamageCategory::Other => "other",
            DamageCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DamageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DamageCategory {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rain_damage" => Ok(DamageCategory::RainDamage),
            "fire_damage" => Ok(DamageCategory::FireDamage),
            "other" => Ok(DamageCategory::Other),
            "unknown" => Ok(DamageCategory::Unknown),
            other => Err(ClaimError::UnknownCategory(other.to_string())),
        }
    }
}

/// A single bounding-box detection from the classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class_id: u32,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(default)]
    pub confidence: f64,
}

impl Detection {
    /// Box area in square pixels
    pub fn area(&self) -> f64 {
        (self.x2 - self.x1) * (self.y2 - self.y1)
    }
}

/// Category and monetary estimate for one submission
///
/// Invariant: `MIN_ESTIMATE <= estimate <= MAX_ESTIMATE` when something was
/// detected, otherwise `category == Unknown` and `estimate == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageAssessment {
    pub category: DamageCategory,
    /// Whole currency units
    pub estimate: u32,
}

impl DamageAssessment {
    /// Assessment used when the classifier finds nothing
    pub fn no_detection() -> Self {
        Self {
            category: DamageCategory::Unknown,
            estimate: 0,
        }
    }

    /// Builds an assessment from detections, using only the first one
    pub fn from_detections(detections: &[Detection]) -> Self {
        match detections.first() {
            None => Self::no_detection(),
            Some(detection) => Self {
                category: DamageCategory::from_class_id(detection.class_id),
                estimate: clamp_estimate(detection.area()),
            },
        }
    }

    /// Returns true if the classifier found damage
    pub fn has_detection(&self) -> bool {
        self.category != DamageCategory::Unknown
    }

    /// The estimate as money in the configured payout currency
    pub fn estimate_money(&self, currency: Currency) -> Money {
        Money::from_major(self.estimate, currency)
    }
}

/// Converts a detected area to an estimate clamped into the settlement band
pub fn clamp_estimate(area: f64) -> u32 {
    let raw = (area / AREA_PER_UNIT).trunc();
    if raw.is_nan() || raw <= MIN_ESTIMATE as f64 {
        MIN_ESTIMATE
    } else if raw >= MAX_ESTIMATE as f64 {
        MAX_ESTIMATE
    } else {
        raw as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection(class_id: u32, width: f64, height: f64) -> Detection {
        Detection {
            class_id,
            x1: 10.0,
            y1: 20.0,
            x2: 10.0 + width,
            y2: 20.0 + height,
            confidence: 0.9,
        }
    }

    #[test]
    fn test_class_id_mapping() {
        assert_eq!(DamageCategory::from_class_id(0), DamageCategory::RainDamage);
        assert_eq!(DamageCategory::from_class_id(1), DamageCategory::FireDamage);
        assert_eq!(DamageCategory::from_class_id(2), DamageCategory::Other);
        assert_eq!(DamageCategory::from_class_id(57), DamageCategory::Other);
    }

    #[test]
    fn test_category_labels_parse_back() {
        for category in [
            DamageCategory::RainDamage,
            DamageCategory::FireDamage,
            DamageCategory::Other,
            DamageCategory::Unknown,
        ] {
            assert_eq!(category.as_str().parse::<DamageCategory>().unwrap(), category);
        }
        assert!("hail_damage".parse::<DamageCategory>().is_err());
    }

    #[test]
    fn test_serde_uses_snake_case_labels() {
        let json = serde_json::to_string(&DamageCategory::RainDamage).unwrap();
        assert_eq!(json, "\"rain_damage\"");
    }

    #[test]
    fn test_no_detections_yields_unknown_and_zero() {
        let assessment = DamageAssessment::from_detections(&[]);
        assert_eq!(assessment, DamageAssessment::no_detection());
        assert_eq!(assessment.category, DamageCategory::Unknown);
        assert_eq!(assessment.estimate, 0);
        assert!(!assessment.has_detection());
    }

    #[test]
    fn test_estimate_inside_band_is_area_over_thousand() {
        // 1500 x 1000 = 1_500_000 px -> 1500
        let assessment = DamageAssessment::from_detections(&[detection(0, 1500.0, 1000.0)]);
        assert_eq!(assessment.category, DamageCategory::RainDamage);
        assert_eq!(assessment.estimate, 1500);
    }

    #[test]
    fn test_small_area_clamps_to_minimum() {
        let assessment = DamageAssessment::from_detections(&[detection(1, 10.0, 10.0)]);
        assert_eq!(assessment.category, DamageCategory::FireDamage);
        assert_eq!(assessment.estimate, MIN_ESTIMATE);
    }

    #[test]
    fn test_large_area_clamps_to_maximum() {
        let assessment = DamageAssessment::from_detections(&[detection(2, 4000.0, 4000.0)]);
        assert_eq!(assessment.estimate, MAX_ESTIMATE);
    }

    #[test]
    fn test_only_first_detection_counts() {
        let assessment = DamageAssessment::from_detections(&[
            detection(1, 800.0, 1000.0),
            detection(0, 2000.0, 2000.0),
        ]);
        assert_eq!(assessment.category, DamageCategory::FireDamage);
        assert_eq!(assessment.estimate, 800);
    }

    #[test]
    fn test_estimate_money_uses_whole_units() {
        let assessment = DamageAssessment {
            category: DamageCategory::RainDamage,
            estimate: 1234,
        };
        let money = assessment.estimate_money(Currency::EUR);
        assert_eq!(money.to_minor_units().unwrap(), 123_400);
    }
}
