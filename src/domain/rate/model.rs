//! Rate schedule domain entity

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::fees::resolve_unit_price;
use crate::domain::repositories::Record;
use crate::shared::errors::DomainError;
use crate::shared::validations::require;

/// One step of a tiered rate: up to `threshold_days` days of storage cost
/// `unit_price` per weight unit per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub threshold_days: u32,
    pub unit_price: Decimal,
}

impl Tier {
    pub fn new(threshold_days: u32, unit_price: Decimal) -> Self {
        Self {
            threshold_days,
            unit_price,
        }
    }
}

/// Storage rate schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSchedule {
    #[serde(default)]
    pub key: String,
    pub rate_no: String,
    pub rate_name: String,
    #[serde(default)]
    pub tiers: Vec<Tier>,
}

impl RateSchedule {
    pub fn new(rate_no: impl Into<String>, rate_name: impl Into<String>, tiers: Vec<Tier>) -> Self {
        Self {
            key: String::new(),
            rate_no: rate_no.into(),
            rate_name: rate_name.into(),
            tiers,
        }
    }

    /// Check the schedule as entered.
    ///
    /// Thresholds must be positive and strictly increasing in entry order,
    /// prices non-negative, and at least one tier present.
    pub fn validate(&self) -> Result<(), DomainError> {
        require("rate_no", &self.rate_no)?;
        require("rate_name", &self.rate_name)?;

        if self.tiers.is_empty() {
            return Err(DomainError::Validation(
                "rate schedule needs at least one tier".to_string(),
            ));
        }

        for (idx, tier) in self.tiers.iter().enumerate() {
            if tier.threshold_days == 0 {
                return Err(DomainError::Validation(format!(
                    "tier {}: threshold days must be positive",
                    idx + 1
                )));
            }
            if tier.unit_price < Decimal::ZERO {
                return Err(DomainError::Validation(format!(
                    "tier {}: unit price must not be negative",
                    idx + 1
                )));
            }
        }

        if let Some(idx) = self
            .tiers
            .windows(2)
            .position(|pair| pair[1].threshold_days <= pair[0].threshold_days)
        {
            return Err(DomainError::Validation(format!(
                "tier {}: threshold days must be strictly increasing",
                idx + 2
            )));
        }

        Ok(())
    }

    /// Tiers ascending by threshold, the order [`resolve_unit_price`] expects.
    pub fn sorted_tiers(&self) -> Vec<Tier> {
        let mut tiers = self.tiers.clone();
        tiers.sort_by_key(|t| t.threshold_days);
        tiers
    }

    /// Unit price applicable to a storage period of `total_days`.
    pub fn unit_price_for(&self, total_days: i64) -> Decimal {
        resolve_unit_price(total_days, &self.sorted_tiers())
    }
}

impl Record for RateSchedule {
    const COLLECTION: &'static str = "cost_rates";
    const ENTITY: &'static str = "RateSchedule";

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_rate() -> RateSchedule {
        RateSchedule::new(
            "R001",
            "Rate 30/60/90",
            vec![
                Tier::new(30, dec!(10)),
                Tier::new(60, dec!(8)),
                Tier::new(90, dec!(6)),
            ],
        )
    }

    #[test]
    fn valid_schedule_passes() {
        assert!(sample_rate().validate().is_ok());
    }

    #[test]
    fn requires_rate_no_and_name() {
        let mut r = sample_rate();
        r.rate_no = " ".into();
        assert!(r.validate().is_err());

        let mut r = sample_rate();
        r.rate_name.clear();
        assert!(r.validate().is_err());
    }

    #[test]
    fn requires_a_tier() {
        let mut r = sample_rate();
        r.tiers.clear();
        assert!(r.validate().is_err());
    }

    #[test]
    fn rejects_non_increasing_thresholds() {
        let mut r = sample_rate();
        r.tiers[2].threshold_days = 60;
        let err = r.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation: tier 3: threshold days must be strictly increasing"
        );
    }

    #[test]
    fn rejects_zero_threshold_and_negative_price() {
        let mut r = sample_rate();
        r.tiers[0].threshold_days = 0;
        assert!(r.validate().is_err());

        let mut r = sample_rate();
        r.tiers[1].unit_price = dec!(-1);
        assert!(r.validate().is_err());
    }

    #[test]
    fn zero_price_is_allowed() {
        let mut r = sample_rate();
        r.tiers[0].unit_price = Decimal::ZERO;
        assert!(r.validate().is_ok());
    }

    #[test]
    fn unit_price_for_sorts_first() {
        let r = RateSchedule::new(
            "R002",
            "Unsorted",
            vec![Tier::new(90, dec!(6)), Tier::new(30, dec!(10)), Tier::new(60, dec!(8))],
        );
        assert_eq!(r.unit_price_for(10), dec!(10));
        assert_eq!(r.unit_price_for(45), dec!(8));
        assert_eq!(r.unit_price_for(365), dec!(6));
    }

    #[test]
    fn persisted_shape_is_camel_case() {
        let json = serde_json::to_value(sample_rate()).unwrap();
        assert_eq!(json["rateNo"], "R001");
        assert_eq!(json["tiers"][0]["thresholdDays"], 30);
    }
}
