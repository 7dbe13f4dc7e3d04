//! # Promotions
//!
//! Stateless pricing strategies that can be attached to products.
//!
//! ## Rule Set
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rule               Example (unit $100)        Formula                  │
//! │  ─────────────────  ─────────────────────────  ───────────────────────  │
//! │  PercentDiscount    20% off, qty 2 → $160      p × q × (1 − pct/100)    │
//! │  SecondHalfPrice    qty 3 → $250               pairs × 1.5p + rest × p  │
//! │  ThirdOneFree       qty 6 → $400               groups × 2p + rest × p   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A promotion never mutates anything. Products hold it through an
//! [`Arc`](std::sync::Arc), so one promotion can be attached to any number
//! of products at once.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::validation::validate_percent;

// =============================================================================
// Promotion Rule
// =============================================================================

/// The pricing rule behind a [`Promotion`].
///
/// Serialized with an internal `type` tag so catalog files can declare
/// rules inline:
/// ```json
/// { "type": "percent_discount", "percent": 30 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromotionRule {
    /// Flat percentage off the whole line.
    PercentDiscount { percent: f64 },
    /// Every second item of a pair costs half.
    SecondHalfPrice,
    /// Every third item is free.
    ThirdOneFree,
}

impl PromotionRule {
    /// Prices `quantity` units at `unit_price` under this rule.
    ///
    /// Callers guarantee `quantity >= 1`; `Product::buy` validates before
    /// it gets here.
    pub fn apply(&self, unit_price: f64, quantity: i64) -> f64 {
        match *self {
            PromotionRule::PercentDiscount { percent } => {
                unit_price * quantity as f64 * (1.0 - percent / 100.0)
            }
            PromotionRule::SecondHalfPrice => {
                if quantity < 2 {
                    return unit_price * quantity as f64;
                }
                let pairs = quantity / 2;
                let remainder = quantity % 2;
                pairs as f64 * (unit_price * 1.5) + remainder as f64 * unit_price
            }
            PromotionRule::ThirdOneFree => {
                if quantity < 3 {
                    return unit_price * quantity as f64;
                }
                let groups = quantity / 3;
                let remainder = quantity % 3;
                groups as f64 * (unit_price * 2.0) + remainder as f64 * unit_price
            }
        }
    }
}

// =============================================================================
// Promotion
// =============================================================================

/// A named pricing rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Promotion {
    name: String,
    rule: PromotionRule,
}

impl Promotion {
    /// Creates a promotion from an arbitrary rule, validating its parameters.
    ///
    /// ## Errors
    /// `InvalidArgument` when a `PercentDiscount` percent is outside
    /// `[0, 100]`.
    pub fn new(name: impl Into<String>, rule: PromotionRule) -> CoreResult<Self> {
        if let PromotionRule::PercentDiscount { percent } = rule {
            validate_percent(percent)?;
        }

        Ok(Promotion {
            name: name.into(),
            rule,
        })
    }

    /// Creates a percentage discount, e.g. `percent_discount("30% off!", 30.0)`.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::Promotion;
    ///
    /// let promo = Promotion::percent_discount("20% off", 20.0).unwrap();
    /// assert_eq!(promo.apply(100.0, 2), 160.0);
    ///
    /// assert!(Promotion::percent_discount("Invalid", 150.0).is_err());
    /// ```
    pub fn percent_discount(name: impl Into<String>, percent: f64) -> CoreResult<Self> {
        Self::new(name, PromotionRule::PercentDiscount { percent })
    }

    /// Creates a "second item at half price" promotion.
    pub fn second_half_price(name: impl Into<String>) -> Self {
        Promotion {
            name: name.into(),
            rule: PromotionRule::SecondHalfPrice,
        }
    }

    /// Creates a "buy two, get the third free" promotion.
    pub fn third_one_free(name: impl Into<String>) -> Self {
        Promotion {
            name: name.into(),
            rule: PromotionRule::ThirdOneFree,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self) -> PromotionRule {
        self.rule
    }

    /// Returns the total price for `quantity` units at `unit_price`.
    #[inline]
    pub fn apply(&self, unit_price: f64, quantity: i64) -> f64 {
        self.rule.apply(unit_price, quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_percent_discount() {
        let promo = Promotion::percent_discount("20% off", 20.0).unwrap();
        assert_close(promo.apply(100.0, 2), 160.0);
        assert_close(promo.apply(100.0, 1), 80.0);

        let free = Promotion::percent_discount("Free", 100.0).unwrap();
        assert_close(free.apply(250.0, 4), 0.0);

        let none = Promotion::percent_discount("Nothing", 0.0).unwrap();
        assert_close(none.apply(250.0, 4), 1000.0);
    }

    #[test]
    fn test_percent_discount_out_of_range() {
        let err = Promotion::percent_discount("Invalid", 150.0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
        assert!(Promotion::percent_discount("Invalid", -5.0).is_err());
        assert!(Promotion::new("Invalid", PromotionRule::PercentDiscount { percent: f64::NAN }).is_err());
    }

    #[test]
    fn test_second_half_price() {
        let promo = Promotion::second_half_price("Second Half price!");
        assert_close(promo.apply(100.0, 1), 100.0);
        assert_close(promo.apply(100.0, 2), 150.0);
        assert_close(promo.apply(100.0, 3), 250.0);
        assert_close(promo.apply(250.0, 3), 625.0);
        assert_close(promo.apply(100.0, 4), 300.0);
    }

    #[test]
    fn test_third_one_free() {
        let promo = Promotion::third_one_free("Third One Free!");
        assert_close(promo.apply(100.0, 1), 100.0);
        assert_close(promo.apply(100.0, 2), 200.0);
        assert_close(promo.apply(100.0, 3), 200.0);
        assert_close(promo.apply(100.0, 6), 400.0);
        assert_close(promo.apply(100.0, 7), 500.0);
    }

    #[test]
    fn test_rule_accessors() {
        let promo = Promotion::third_one_free("Third One Free!");
        assert_eq!(promo.name(), "Third One Free!");
        assert_eq!(promo.rule(), PromotionRule::ThirdOneFree);
    }

    #[test]
    fn test_rule_serde_tag() {
        let rule: PromotionRule =
            serde_json::from_str(r#"{ "type": "percent_discount", "percent": 30 }"#).unwrap();
        assert_eq!(rule, PromotionRule::PercentDiscount { percent: 30.0 });

        let json = serde_json::to_string(&PromotionRule::SecondHalfPrice).unwrap();
        assert_eq!(json, r#"{"type":"second_half_price"}"#);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: every third unit is free.
            #[test]
            fn third_one_free_charges_for_q_minus_q_div_3(
                price in 0.0f64..10_000.0,
                qty in 1i64..1_000,
            ) {
                let promo = Promotion::third_one_free("t");
                let expected = price * (qty - qty / 3) as f64;
                prop_assert!((promo.apply(price, qty) - expected).abs() <= 1e-6 * expected.max(1.0));
            }

            /// Property: each complete pair saves half a unit.
            #[test]
            fn second_half_price_saves_half_per_pair(
                price in 0.0f64..10_000.0,
                qty in 1i64..1_000,
            ) {
                let promo = Promotion::second_half_price("s");
                let expected = price * qty as f64 - 0.5 * price * (qty / 2) as f64;
                prop_assert!((promo.apply(price, qty) - expected).abs() <= 1e-6 * expected.max(1.0));
            }

            /// Property: percent discount scales the undiscounted total.
            #[test]
            fn percent_discount_scales_total(
                price in 0.0f64..10_000.0,
                qty in 1i64..1_000,
                pct in 0.0f64..=100.0,
            ) {
                let promo = Promotion::percent_discount("p", pct).unwrap();
                let expected = price * qty as f64 * (1.0 - pct / 100.0);
                prop_assert!((promo.apply(price, qty) - expected).abs() <= 1e-6 * expected.max(1.0));
            }
        }
    }
}
