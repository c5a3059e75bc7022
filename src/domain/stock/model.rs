//! Stock item and the cargo attributes shared with goods movements

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::repositories::Record;
use crate::domain::warehouse::Location;
use crate::shared::errors::DomainError;
use crate::shared::filter::text_matches;
use crate::shared::validations::require;

/// Physical description of a paper roll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CargoSpec {
    /// Grams per square metre.
    pub gram_weight: Option<Decimal>,
    pub width: Option<Decimal>,
    pub diameter: Option<Decimal>,
    pub length: Option<Decimal>,
    pub color: String,
    pub gross_weight: Option<Decimal>,
    pub net_weight: Option<Decimal>,
    pub origin: String,
    pub brand: String,
    pub product_name: String,
    pub level: String,
    pub unit: String,
    pub amount: Option<Decimal>,
    /// Tonnes; debited from redemption limits on the way out.
    pub weight: Option<Decimal>,
}

impl CargoSpec {
    pub fn check(&self) -> Result<(), DomainError> {
        let numbers = [
            ("gram_weight", self.gram_weight),
            ("width", self.width),
            ("diameter", self.diameter),
            ("length", self.length),
            ("gross_weight", self.gross_weight),
            ("net_weight", self.net_weight),
            ("amount", self.amount),
            ("weight", self.weight),
        ];
        if let Some((field, _)) = numbers
            .iter()
            .find(|(_, v)| matches!(v, Some(v) if *v < Decimal::ZERO))
        {
            return Err(DomainError::Validation(format!(
                "{}: must not be negative",
                field
            )));
        }
        Ok(())
    }
}

/// A roll currently held in the warehouse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    #[serde(default)]
    pub key: String,
    pub roll_no: String,
    pub bill_no: String,
    pub in_date: Option<NaiveDate>,
    #[serde(default)]
    pub has_carrier: bool,
    /// Cargo owner.
    pub owner: String,
    /// Pickup party.
    pub picker: String,
    #[serde(flatten)]
    pub location: Location,
    #[serde(flatten)]
    pub spec: CargoSpec,
}

impl StockItem {
    pub fn check(&self) -> Result<(), DomainError> {
        require("roll_no", &self.roll_no)?;
        require("bill_no", &self.bill_no)?;
        if self.in_date.is_none() {
            return Err(DomainError::Validation("in_date is required".to_string()));
        }
        require("owner", &self.owner)?;
        require("picker", &self.picker)?;
        require("warehouse", &self.location.warehouse)?;
        require("zone", &self.location.zone)?;
        require("slot", &self.location.slot)?;
        self.spec.check()
    }

    /// Same physical roll: equal roll number and bill of lading.
    pub fn is_roll(&self, roll_no: &str, bill_no: &str) -> bool {
        self.roll_no == roll_no && self.bill_no == bill_no
    }
}

impl Record for StockItem {
    const COLLECTION: &'static str = "stock";
    const ENTITY: &'static str = "StockItem";

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}

/// Stock view search. Owner and picker are matched separately.
#[derive(Debug, Clone, Default)]
pub struct StockFilter {
    pub bill_no: Option<String>,
    pub roll_no: Option<String>,
    pub owner: Option<String>,
    pub picker: Option<String>,
}

impl StockFilter {
    pub fn matches(&self, item: &StockItem) -> bool {
        text_matches(&item.bill_no, self.bill_no.as_deref())
            && text_matches(&item.roll_no, self.roll_no.as_deref())
            && text_matches(&item.owner, self.owner.as_deref())
            && text_matches(&item.picker, self.picker.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fees::parse_date;
    use rust_decimal_macros::dec;

    fn sample_item() -> StockItem {
        StockItem {
            roll_no: "J001".into(),
            bill_no: "TD001".into(),
            in_date: parse_date("2025-06-23"),
            has_carrier: true,
            owner: "Jianfa Paper Group".into(),
            picker: "Fengtu Ltd".into(),
            location: Location::new("Baowan", "Hall 10", "A01"),
            spec: CargoSpec {
                product_name: "Kraft liner".into(),
                weight: Some(dec!(10)),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn complete_item_is_valid() {
        assert!(sample_item().check().is_ok());
    }

    #[test]
    fn location_is_required() {
        let mut item = sample_item();
        item.location.slot.clear();
        assert!(item.check().unwrap_err().to_string().contains("slot is required"));
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut item = sample_item();
        item.spec.weight = Some(dec!(-1));
        assert!(item.check().unwrap_err().to_string().contains("weight"));
    }

    #[test]
    fn serialized_flat() {
        let json = serde_json::to_value(sample_item()).unwrap();
        assert_eq!(json["warehouse"], "Baowan");
        assert_eq!(json["productName"], "Kraft liner");
        assert_eq!(json["inDate"], "2025-06-23");

        let back: StockItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample_item());
    }

    #[test]
    fn filter_matches_owner_and_picker_separately() {
        let item = sample_item();
        let by_owner = StockFilter {
            owner: Some("jianfa".into()),
            ..Default::default()
        };
        assert!(by_owner.matches(&item));

        let owner_as_picker = StockFilter {
            picker: Some("jianfa".into()),
            ..Default::default()
        };
        assert!(!owner_as_picker.matches(&item));
    }
}
