//! Road-risk classification
//!
//! The rules form a strict priority chain over one day's weather signals:
//! snow at any accumulation outranks frost, a thaw-then-freeze day outranks
//! plain frost, and rain onto a frozen surface is flagged as black ice.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Coarse road-risk tier for one waypoint on one day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Safe,
    Caution,
    Danger,
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::Safe => write!(f, "safe"),
            RiskTier::Caution => write!(f, "caution"),
            RiskTier::Danger => write!(f, "danger"),
        }
    }
}

/// Risk tier plus the rationale string shown on the map
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskAssessment {
    pub tier: RiskTier,
    pub label: String,
}

impl RiskAssessment {
    fn new(tier: RiskTier, label: impl Into<String>) -> Self {
        Self {
            tier,
            label: label.into(),
        }
    }
}

/// Render a quantity the way the map shows it: minimal digits, no trailing
/// zeros
fn show(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Classify one day's weather at one waypoint.
///
/// `high`/`low` in °C, `snow` in cm, `precip` in mm; all values must be
/// known (the caller skips classification when a temperature is unknown).
/// The first matching rule wins and the ordering is part of the contract:
/// several conditions overlap, so reordering changes outcomes.
pub fn classify(high: Decimal, low: Decimal, snow: Decimal, precip: Decimal) -> RiskAssessment {
    // No freeze, no snow
    if low > Decimal::from(2) && snow == Decimal::ZERO {
        if high > Decimal::from(8) {
            return RiskAssessment::new(RiskTier::Safe, "Perfect");
        }
        return RiskAssessment::new(RiskTier::Safe, "No frost");
    }

    if low > Decimal::from(-1) && snow == Decimal::ZERO {
        return RiskAssessment::new(RiskTier::Caution, "Light frost");
    }

    // Snow at any accumulation
    if snow > Decimal::from(5) {
        return RiskAssessment::new(RiskTier::Danger, format!("SNOW {}cm!", show(snow)));
    }
    if snow > Decimal::from(2) {
        return RiskAssessment::new(RiskTier::Danger, format!("SNOW {}cm", show(snow)));
    }
    if snow > Decimal::ZERO {
        // Same text as the previous rule; the map relies on both thresholds
        // rendering identically.
        return RiskAssessment::new(RiskTier::Danger, format!("SNOW {}cm", show(snow)));
    }

    // Thaw during the day, freeze overnight: ice re-forms on wet surfaces
    if high > Decimal::from(8) && low < Decimal::from(-2) {
        return RiskAssessment::new(RiskTier::Danger, format!("REFREEZE {}°C!", show(low)));
    }

    // Rain onto a freezing surface
    if precip > Decimal::ZERO && low < Decimal::ZERO {
        if low < Decimal::from(-3) {
            return RiskAssessment::new(RiskTier::Danger, "BLACK ICE!");
        }
        return RiskAssessment::new(RiskTier::Danger, "Rain + frost");
    }

    if low < Decimal::from(-4) {
        return RiskAssessment::new(RiskTier::Danger, format!("SEVERE frost {}°C", show(low)));
    }
    if low < Decimal::from(-1) {
        return RiskAssessment::new(RiskTier::Danger, format!("Frost {}°C", show(low)));
    }

    RiskAssessment::new(RiskTier::Caution, "Caution")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn classify4(high: &str, low: &str, snow: &str, precip: &str) -> RiskAssessment {
        classify(dec(high), dec(low), dec(snow), dec(precip))
    }

    #[test]
    fn test_safe_perfect_day() {
        let risk = classify4("10", "3", "0", "0");
        assert_eq!(risk.tier, RiskTier::Safe);
        assert_eq!(risk.label, "Perfect");
    }

    #[test]
    fn test_safe_cool_day_without_frost() {
        let risk = classify4("5", "3", "0", "0");
        assert_eq!(risk.tier, RiskTier::Safe);
        assert_eq!(risk.label, "No frost");
    }

    #[test]
    fn test_low_of_exactly_two_is_not_safe() {
        // The safe rule requires low strictly above 2
        let risk = classify4("10", "2", "0", "0");
        assert_eq!(risk.tier, RiskTier::Caution);
        assert_eq!(risk.label, "Light frost");
    }

    #[test]
    fn test_light_frost() {
        let risk = classify4("4", "-0.5", "0", "0");
        assert_eq!(risk.tier, RiskTier::Caution);
        assert_eq!(risk.label, "Light frost");
    }

    #[test]
    fn test_low_of_zero_hits_light_frost_not_catch_all() {
        // low > -1 and snow == 0, so the light-frost rule fires before
        // anything further down the chain
        let risk = classify4("1", "0", "0", "0");
        assert_eq!(risk.tier, RiskTier::Caution);
        assert_eq!(risk.label, "Light frost");
    }

    #[test]
    fn test_heavy_snow_gets_exclamation() {
        let risk = classify4("1", "-2", "6", "0");
        assert_eq!(risk.tier, RiskTier::Danger);
        assert_eq!(risk.label, "SNOW 6cm!");
    }

    #[test]
    fn test_heavy_snow_overrides_everything() {
        // Snow rules ignore temperatures entirely
        let risk = classify4("15", "10", "6", "3");
        assert_eq!(risk.tier, RiskTier::Danger);
        assert_eq!(risk.label, "SNOW 6cm!");
    }

    #[test]
    fn test_moderate_and_light_snow_share_label_text() {
        let moderate = classify4("1", "-2", "3", "0");
        let light = classify4("1", "-2", "0.5", "0");
        assert_eq!(moderate.label, "SNOW 3cm");
        assert_eq!(light.label, "SNOW 0.5cm");
        // Two distinct thresholds, identical display format
        assert!(moderate.label.starts_with("SNOW ") && moderate.label.ends_with("cm"));
        assert!(light.label.starts_with("SNOW ") && light.label.ends_with("cm"));
    }

    #[test]
    fn test_snow_of_exactly_five_stays_unexclaimed() {
        let risk = classify4("1", "-2", "5", "0");
        assert_eq!(risk.label, "SNOW 5cm");
    }

    #[test]
    fn test_snow_label_drops_trailing_zeros() {
        let risk = classify(dec("1"), dec("-2"), dec("6.0"), Decimal::ZERO);
        assert_eq!(risk.label, "SNOW 6cm!");
    }

    #[test]
    fn test_refreeze_cycle() {
        let risk = classify4("9", "-3", "0", "0");
        assert_eq!(risk.tier, RiskTier::Danger);
        assert_eq!(risk.label, "REFREEZE -3°C!");
    }

    #[test]
    fn test_refreeze_fires_before_rain_and_frost() {
        // Both conditions hold; the refreeze rule is earlier in the chain
        let risk = classify4("9", "-3", "0", "5");
        assert_eq!(risk.label, "REFREEZE -3°C!");
    }

    #[test]
    fn test_rain_onto_mild_frost() {
        let risk = classify4("1", "-1.5", "0", "2");
        assert_eq!(risk.tier, RiskTier::Danger);
        assert_eq!(risk.label, "Rain + frost");
    }

    #[test]
    fn test_rain_onto_deep_frost_is_black_ice() {
        let risk = classify4("1", "-4", "0", "2");
        assert_eq!(risk.tier, RiskTier::Danger);
        assert_eq!(risk.label, "BLACK ICE!");
    }

    #[test]
    fn test_severe_frost() {
        let risk = classify4("1", "-4.5", "0", "0");
        assert_eq!(risk.tier, RiskTier::Danger);
        assert_eq!(risk.label, "SEVERE frost -4.5°C");
    }

    #[test]
    fn test_plain_frost() {
        let risk = classify4("1", "-3", "0", "0");
        assert_eq!(risk.tier, RiskTier::Danger);
        assert_eq!(risk.label, "Frost -3°C");
    }

    #[test]
    fn test_low_of_exactly_minus_one_reaches_catch_all() {
        // low > -1 fails, low < -1 fails: nothing in between matches
        let risk = classify4("1", "-1", "0", "0");
        assert_eq!(risk.tier, RiskTier::Caution);
        assert_eq!(risk.label, "Caution");
    }

    #[test]
    fn test_tier_display_is_lowercase() {
        assert_eq!(RiskTier::Safe.to_string(), "safe");
        assert_eq!(RiskTier::Caution.to_string(), "caution");
        assert_eq!(RiskTier::Danger.to_string(), "danger");
    }

    proptest! {
        /// Warm snowless days are always safe
        #[test]
        fn prop_warm_and_snowless_is_safe(
            high in -300i64..=300i64,
            low in 21i64..=300i64,
            precip in 0i64..=500i64
        ) {
            let risk = classify(
                Decimal::new(high, 1),
                Decimal::new(low, 1),
                Decimal::ZERO,
                Decimal::new(precip, 1),
            );
            prop_assert_eq!(risk.tier, RiskTier::Safe);
        }

        /// Any snow accumulation is danger, whatever the temperatures
        #[test]
        fn prop_any_snow_is_danger(
            high in -300i64..=300i64,
            low in -300i64..=300i64,
            snow in 1i64..=300i64,
            precip in 0i64..=500i64
        ) {
            let risk = classify(
                Decimal::new(high, 1),
                Decimal::new(low, 1),
                Decimal::new(snow, 1),
                Decimal::new(precip, 1),
            );
            prop_assert_eq!(risk.tier, RiskTier::Danger);
            prop_assert!(risk.label.starts_with("SNOW "));
        }
    }
}
