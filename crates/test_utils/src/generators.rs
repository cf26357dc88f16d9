//! Property-Based Test Generators

use proptest::prelude::*;

use core_kernel::Currency;
use domain_claims::{DamageCategory, Detection};

pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::EUR),
        Just(Currency::CHF),
        Just(Currency::USD),
        Just(Currency::GBP),
        Just(Currency::JPY),
    ]
}

pub fn category_strategy() -> impl Strategy<Value = DamageCategory> {
    prop_oneof![
        Just(DamageCategory::RainDamage),
        Just(DamageCategory::FireDamage),
        Just(DamageCategory::Other),
        Just(DamageCategory::Unknown),
    ]
}

/// Well-formed detection boxes inside a 4000 x 4000 image
pub fn detection_strategy() -> impl Strategy<Value = Detection> {
    (0u32..4, 0.0f64..4000.0, 0.0f64..4000.0, 0.0f64..4000.0, 0.0f64..4000.0, 0.0f64..1.0)
        .prop_map(|(class_id, a, b, c, d, confidence)| Detection {
            class_id,
            x1: a.min(c),
            y1: b.min(d),
            x2: a.max(c),
            y2: b.max(d),
            confidence,
        })
}
