//! Contract domain entity

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::rate::{RateSchedule, Tier};
use crate::domain::repositories::Record;
use crate::shared::errors::DomainError;
use crate::shared::validations::validate_fields;

/// Form of the signed contract
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContractType {
    #[default]
    Paper,
    Electronic,
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paper => write!(f, "Paper"),
            Self::Electronic => write!(f, "Electronic"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    #[serde(default)]
    pub key: String,
    /// The contracting customer, who is the cargo owner on its settlements.
    #[validate(length(min = 1, message = "customer name is required"))]
    pub customer_name: String,
    /// Storage rate schedule reference.
    #[validate(length(min = 1, message = "rate number is required"))]
    pub rate_no: String,
    #[validate(length(min = 1, message = "contract name is required"))]
    pub contract_name: String,
    #[validate(length(min = 1, message = "contract id is required"))]
    pub contract_id: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub contract_type: ContractType,
    /// Invoice tax rate in percent.
    #[validate(custom(function = "validate_percent"))]
    pub invoice_rate: Decimal,
    /// Inbound handling price per tonne.
    pub in_fee: Option<Decimal>,
    /// Outbound handling price per tonne.
    pub out_fee: Option<Decimal>,
    /// Container unstuffing price per container.
    pub box_fee: Option<Decimal>,
}

fn validate_percent(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO || *value > Decimal::ONE_HUNDRED {
        let mut err = ValidationError::new("range");
        err.message = Some("invoice rate must be between 0 and 100".into());
        return Err(err);
    }
    Ok(())
}

impl Contract {
    pub fn new(
        customer_name: impl Into<String>,
        rate_no: impl Into<String>,
        contract_name: impl Into<String>,
        contract_id: impl Into<String>,
    ) -> Self {
        Self {
            key: String::new(),
            customer_name: customer_name.into(),
            rate_no: rate_no.into(),
            contract_name: contract_name.into(),
            contract_id: contract_id.into(),
            start_date: None,
            end_date: None,
            contract_type: ContractType::default(),
            invoice_rate: Decimal::ZERO,
            in_fee: None,
            out_fee: None,
            box_fee: None,
        }
    }

    pub fn check(&self) -> Result<(), DomainError> {
        validate_fields(self)?;

        for (field, fee) in [
            ("in_fee", self.in_fee),
            ("out_fee", self.out_fee),
            ("box_fee", self.box_fee),
        ] {
            if matches!(fee, Some(f) if f < Decimal::ZERO) {
                return Err(DomainError::Validation(format!(
                    "{}: must not be negative",
                    field
                )));
            }
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(DomainError::Validation(
                    "contract start date is after its end date".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Whether the contract term covers `date`. Open ends count as unbounded.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_date.map_or(true, |start| start <= date)
            && self.end_date.map_or(true, |end| date <= end)
    }
}

impl Record for Contract {
    const COLLECTION: &'static str = "contracts";
    const ENTITY: &'static str = "Contract";

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}

/// A contract with its storage rate resolved, as the settlement forms use it.
#[derive(Debug, Clone)]
pub struct ContractTerms {
    pub contract: Contract,
    pub rate: Option<RateSchedule>,
}

impl ContractTerms {
    /// Tiers ascending by threshold; empty when the rate number is dangling.
    pub fn tiers(&self) -> Vec<Tier> {
        self.rate
            .as_ref()
            .map(RateSchedule::sorted_tiers)
            .unwrap_or_default()
    }

    pub fn rate_name(&self) -> String {
        self.rate
            .as_ref()
            .map(|r| r.rate_name.clone())
            .unwrap_or_default()
    }
}
