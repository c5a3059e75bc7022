//! Storage-fee settlement record

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::payment::Payment;
use crate::domain::fees::{compute_day_counts, compute_fee, DayCounts, YearMonth};
use crate::domain::repositories::Record;
use crate::shared::errors::DomainError;
use crate::shared::filter::{any_text_matches, text_matches};
use crate::shared::validations::require;

/// Storage fee for one roll/lot over a date range.
///
/// `monthly_days`, `total_days` and `storage_fee` are derived; call
/// [`StorageSettlement::recompute`] after changing any input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageSettlement {
    #[serde(default)]
    pub key: String,
    pub cargo_owner: String,
    #[serde(default)]
    pub pickup_party: String,
    pub contract_name: String,
    #[serde(default)]
    pub contract_id: String,
    #[serde(default)]
    pub rate_no: String,
    #[serde(default)]
    pub rate_name: String,
    pub roll_no: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub settlement_month: Option<YearMonth>,
    /// Stored weight in tonnes.
    pub weight: Decimal,
    /// Price per tonne per day; resolved from the contract's rate when unset.
    #[serde(default)]
    pub unit_price: Option<Decimal>,

    #[serde(default)]
    pub monthly_days: i64,
    #[serde(default)]
    pub total_days: i64,
    #[serde(default)]
    pub storage_fee: Decimal,

    #[serde(flatten)]
    pub payment: Payment,
    #[serde(default)]
    pub remark: String,
}

impl StorageSettlement {
    pub fn day_counts(&self) -> DayCounts {
        compute_day_counts(self.start_date, self.end_date, self.settlement_month)
    }

    /// Day counts apportioned to another month, for month-filtered views.
    pub fn day_counts_for(&self, month: YearMonth) -> DayCounts {
        compute_day_counts(self.start_date, self.end_date, Some(month))
    }

    pub fn fee_for(&self, counts: DayCounts) -> Decimal {
        compute_fee(Some(self.weight), Some(counts.total_days), self.unit_price)
    }

    /// Recompute the derived fields from the dates, month, weight and price.
    pub fn recompute(&mut self) {
        let counts = self.day_counts();
        self.monthly_days = counts.monthly_days;
        self.total_days = counts.total_days;
        self.storage_fee = self.fee_for(counts);
    }

    /// Whether the stored derived fields agree with the inputs.
    pub fn is_consistent(&self) -> bool {
        let mut fresh = self.clone();
        fresh.recompute();
        fresh.monthly_days == self.monthly_days
            && fresh.total_days == self.total_days
            && fresh.storage_fee == self.storage_fee
    }

    /// Whether the storage range touches `month`.
    pub fn overlaps(&self, month: YearMonth) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => end >= month.first_day() && start <= month.last_day(),
            _ => false,
        }
    }

    pub fn check(&self) -> Result<(), DomainError> {
        require("cargo_owner", &self.cargo_owner)?;
        require("contract_name", &self.contract_name)?;
        require("roll_no", &self.roll_no)?;

        let (start, end) = match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(DomainError::Validation(
                    "start_date and end_date are required".to_string(),
                ))
            }
        };
        if start > end {
            return Err(DomainError::Validation(
                "start_date is after end_date".to_string(),
            ));
        }
        if self.weight < Decimal::ZERO {
            return Err(DomainError::Validation(
                "weight must not be negative".to_string(),
            ));
        }
        if matches!(self.unit_price, Some(p) if p < Decimal::ZERO) {
            return Err(DomainError::Validation(
                "unit_price must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl Record for StorageSettlement {
    const COLLECTION: &'static str = "cost_storage";
    const ENTITY: &'static str = "StorageSettlement";

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}

/// Search criteria of the storage-fee ledger. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct StorageSettlementFilter {
    pub contract_name: Option<String>,
    pub roll_no: Option<String>,
    /// Matches the cargo owner or the pickup party.
    pub customer: Option<String>,
    /// Keeps records whose range overlaps the month.
    pub month: Option<YearMonth>,
}

impl StorageSettlementFilter {
    pub fn matches(&self, record: &StorageSettlement) -> bool {
        text_matches(&record.contract_name, self.contract_name.as_deref())
            && text_matches(&record.roll_no, self.roll_no.as_deref())
            && any_text_matches(
                &[&record.cargo_owner, &record.pickup_party],
                self.customer.as_deref(),
            )
            && self.month.map_or(true, |month| record.overlaps(month))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fees::parse_date;
    use rust_decimal_macros::dec;

    fn sample_record() -> StorageSettlement {
        StorageSettlement {
            cargo_owner: "Jianfa Paper Group".into(),
            pickup_party: "Fengtu Ltd".into(),
            contract_name: "2025 cooperation".into(),
            roll_no: "J001".into(),
            start_date: parse_date("2025-06-01"),
            end_date: parse_date("2025-06-15"),
            weight: dec!(100),
            unit_price: Some(dec!(10)),
            ..Default::default()
        }
    }

    #[test]
    fn recompute_fills_derived_fields() {
        let mut r = sample_record();
        r.recompute();
        assert_eq!(r.total_days, 15);
        assert_eq!(r.monthly_days, 15);
        assert_eq!(r.storage_fee, dec!(15000));
    }

    #[test]
    fn recompute_is_stable_across_unrelated_edits() {
        let mut r = sample_record();
        r.recompute();
        let before = (r.monthly_days, r.total_days, r.storage_fee);

        r.remark = "cold store".into();
        r.payment.fees_paid = true;
        assert!(r.is_consistent());
        r.recompute();
        assert_eq!((r.monthly_days, r.total_days, r.storage_fee), before);
    }

    #[test]
    fn edited_input_makes_record_stale() {
        let mut r = sample_record();
        r.recompute();
        r.weight = dec!(50);
        assert!(!r.is_consistent());
        r.recompute();
        assert_eq!(r.storage_fee, dec!(7500));
    }

    #[test]
    fn settlement_month_apportions() {
        let mut r = sample_record();
        r.start_date = parse_date("2025-06-20");
        r.end_date = parse_date("2025-07-05");
        r.settlement_month = Some("2025-06".parse().unwrap());
        r.recompute();
        assert_eq!(r.monthly_days, 11);
        assert_eq!(r.total_days, 16);
        assert_eq!(r.storage_fee, dec!(16000));
    }

    #[test]
    fn missing_price_yields_zero_fee() {
        let mut r = sample_record();
        r.unit_price = None;
        r.recompute();
        assert_eq!(r.storage_fee, Decimal::ZERO);
        assert_eq!(r.total_days, 15);
    }

    #[test]
    fn check_rejects_inverted_range_and_missing_fields() {
        let mut r = sample_record();
        r.end_date = parse_date("2025-05-01");
        assert!(r.check().is_err());

        let mut r = sample_record();
        r.start_date = None;
        assert!(r.check().is_err());

        let mut r = sample_record();
        r.roll_no.clear();
        assert!(r.check().is_err());

        let mut r = sample_record();
        r.weight = dec!(-1);
        assert!(r.check().is_err());

        assert!(sample_record().check().is_ok());
    }

    #[test]
    fn overlap_with_month() {
        let r = sample_record();
        assert!(r.overlaps("2025-06".parse().unwrap()));
        assert!(!r.overlaps("2025-07".parse().unwrap()));
        assert!(!r.overlaps("2025-05".parse().unwrap()));
    }

    #[test]
    fn filter_matches_customer_on_either_party() {
        let r = sample_record();
        let by_pickup = StorageSettlementFilter {
            customer: Some("fengtu".into()),
            ..Default::default()
        };
        assert!(by_pickup.matches(&r));

        let by_other = StorageSettlementFilter {
            customer: Some("oji".into()),
            ..Default::default()
        };
        assert!(!by_other.matches(&r));
    }

    #[test]
    fn filter_combines_criteria() {
        let r = sample_record();
        let filter = StorageSettlementFilter {
            contract_name: Some("2025".into()),
            roll_no: Some("j00".into()),
            customer: None,
            month: Some("2025-07".parse().unwrap()),
        };
        assert!(!filter.matches(&r));

        let filter = StorageSettlementFilter {
            month: Some("2025-06".parse().unwrap()),
            ..filter
        };
        assert!(filter.matches(&r));
    }

    #[test]
    fn payment_is_flattened_when_persisted() {
        let mut r = sample_record();
        r.payment.fees_paid = true;
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["feesPaid"], true);
        assert_eq!(json["rollNo"], "J001");
    }
}
