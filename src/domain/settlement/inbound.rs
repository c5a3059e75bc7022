//! Inbound settlement record

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::contract::Contract;
use crate::domain::fees::line_fee;
use crate::domain::repositories::Record;
use crate::shared::errors::DomainError;
use crate::shared::filter::{any_text_matches, text_matches};
use crate::shared::validations::require;

/// One-off handling charges billed when goods arrive under a bill of lading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundSettlement {
    #[serde(default)]
    pub key: String,
    pub cargo_owner: String,
    #[serde(default)]
    pub pickup_party: String,
    pub contract_name: String,
    pub bill_no: String,
    /// Total as entered by the clerk.
    #[serde(default)]
    pub total_in_fee: Decimal,

    pub in_unit_price: Option<Decimal>,
    pub in_weight: Option<Decimal>,
    #[serde(default)]
    pub in_fee: Decimal,

    pub out_unit_price: Option<Decimal>,
    pub out_weight: Option<Decimal>,
    #[serde(default)]
    pub out_fee: Decimal,

    pub box_unit_price: Option<Decimal>,
    pub box_count: Option<Decimal>,
    #[serde(default)]
    pub box_total_fee: Decimal,

    pub check_fee: Option<Decimal>,
    pub package_fee: Option<Decimal>,
    pub additional_fee: Option<Decimal>,
    #[serde(default)]
    pub additional_detail: String,
    #[serde(default)]
    pub in_detail: String,
}

impl InboundSettlement {
    pub fn recompute(&mut self) {
        self.in_fee = line_fee(self.in_unit_price, self.in_weight);
        self.out_fee = line_fee(self.out_unit_price, self.out_weight);
        self.box_total_fee = line_fee(self.box_unit_price, self.box_count);
    }

    /// Copy the contract's customer and any unit price left empty.
    pub fn apply_contract(&mut self, contract: &Contract) {
        self.cargo_owner = contract.customer_name.clone();
        self.in_unit_price = self.in_unit_price.or(contract.in_fee);
        self.out_unit_price = self.out_unit_price.or(contract.out_fee);
        self.box_unit_price = self.box_unit_price.or(contract.box_fee);
    }

    /// Sum of every itemised charge.
    pub fn itemized_total(&self) -> Decimal {
        [self.check_fee, self.package_fee, self.additional_fee]
            .into_iter()
            .flatten()
            .fold(self.in_fee + self.out_fee + self.box_total_fee, |acc, fee| acc + fee)
    }

    pub fn check(&self) -> Result<(), DomainError> {
        require("cargo_owner", &self.cargo_owner)?;
        require("contract_name", &self.contract_name)?;
        require("bill_no", &self.bill_no)?;

        let amounts = [
            ("in_unit_price", self.in_unit_price),
            ("in_weight", self.in_weight),
            ("out_unit_price", self.out_unit_price),
            ("out_weight", self.out_weight),
            ("box_unit_price", self.box_unit_price),
            ("box_count", self.box_count),
            ("check_fee", self.check_fee),
            ("package_fee", self.package_fee),
            ("additional_fee", self.additional_fee),
        ];
        if let Some((field, _)) = amounts
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

impl Record for InboundSettlement {
    const COLLECTION: &'static str = "cost_in";
    const ENTITY: &'static str = "InboundSettlement";

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}

#[derive(Debug, Clone, Default)]
pub struct InboundFilter {
    pub bill_no: Option<String>,
    /// Matches the cargo owner or the pickup party.
    pub customer: Option<String>,
    pub contract_name: Option<String>,
}

impl InboundFilter {
    pub fn matches(&self, record: &InboundSettlement) -> bool {
        text_matches(&record.bill_no, self.bill_no.as_deref())
            && any_text_matches(
                &[&record.cargo_owner, &record.pickup_party],
                self.customer.as_deref(),
            )
            && text_matches(&record.contract_name, self.contract_name.as_deref())
    }
}
