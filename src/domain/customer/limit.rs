//! Redemption limits
//!
//! A limit caps how many tonnes a pickup party may take out on behalf of a
//! cargo owner. Outbound movements draw their weight from one limit.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::repositories::Record;
use crate::shared::errors::DomainError;
use crate::shared::validations::require;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionLimit {
    #[serde(default)]
    pub key: String,
    /// Redemption number quoted on outbound movements.
    pub code: String,
    pub owner: String,
    pub picker: String,
    /// Tonnes the picker may take out in total.
    pub total_weight: Decimal,
    /// Tonnes already shipped.
    #[serde(default)]
    pub out_weight: Decimal,
    /// Date the total was last changed.
    pub date: Option<NaiveDate>,
    /// Link to the document backing the last change.
    #[serde(default)]
    pub voucher: String,
}

impl RedemptionLimit {
    pub fn new(
        code: impl Into<String>,
        owner: impl Into<String>,
        picker: impl Into<String>,
        total_weight: Decimal,
    ) -> Self {
        Self {
            code: code.into(),
            owner: owner.into(),
            picker: picker.into(),
            total_weight,
            ..Default::default()
        }
    }

    pub fn check(&self) -> Result<(), DomainError> {
        require("code", &self.code)?;
        require("owner", &self.owner)?;
        require("picker", &self.picker)?;
        if self.date.is_none() {
            return Err(DomainError::Validation("date is required".to_string()));
        }
        if self.total_weight < Decimal::ZERO || self.out_weight < Decimal::ZERO {
            return Err(DomainError::Validation(
                "weights must not be negative".to_string(),
            ));
        }
        if self.out_weight > self.total_weight {
            return Err(DomainError::Validation(format!(
                "out_weight {} exceeds total_weight {}",
                self.out_weight, self.total_weight
            )));
        }
        Ok(())
    }

    /// Tonnes still available.
    pub fn remaining(&self) -> Decimal {
        (self.total_weight - self.out_weight).max(Decimal::ZERO)
    }

    /// Book `weight` tonnes against the limit.
    pub fn draw(&mut self, weight: Decimal) -> Result<(), DomainError> {
        if weight > self.remaining() {
            return Err(DomainError::Conflict(format!(
                "limit {} has {} t left, {} t requested",
                self.code,
                self.remaining(),
                weight
            )));
        }
        self.out_weight += weight;
        Ok(())
    }

    /// Give back `weight` tonnes, never below zero shipped.
    pub fn refund(&mut self, weight: Decimal) {
        self.out_weight = (self.out_weight - weight).max(Decimal::ZERO);
    }
}

impl Record for RedemptionLimit {
    const COLLECTION: &'static str = "customer_limits";
    const ENTITY: &'static str = "RedemptionLimit";

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}
