//! Inbound and outbound goods movements

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::model::{CargoSpec, StockItem};
use crate::domain::repositories::Record;
use crate::domain::warehouse::Location;
use crate::shared::errors::DomainError;
use crate::shared::filter::{any_text_matches, text_matches};
use crate::shared::validations::require;

/// A roll received into the warehouse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundMovement {
    #[serde(default)]
    pub key: String,
    pub in_no: String,
    /// Received as part of an ownership transfer.
    #[serde(default)]
    pub is_transfer: bool,
    pub in_date: Option<NaiveDate>,
    #[serde(default)]
    pub has_carrier: bool,
    #[serde(flatten)]
    pub location: Location,
    pub bill_no: String,
    pub owner: String,
    pub picker: String,
    pub roll_no: String,
    #[serde(default)]
    pub contract_no: String,
    #[serde(default)]
    pub in_car_no: String,
    #[serde(default)]
    pub container_no: String,
    #[serde(default)]
    pub container_type: String,
    #[serde(default)]
    pub container_amount: Option<u32>,
    #[serde(flatten)]
    pub spec: CargoSpec,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub scanner: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub damage_remark: String,
}

impl InboundMovement {
    pub fn check(&self) -> Result<(), DomainError> {
        require("in_no", &self.in_no)?;
        if self.in_date.is_none() {
            return Err(DomainError::Validation("in_date is required".to_string()));
        }
        check_roll(&self.location, &self.bill_no, &self.owner, &self.picker, &self.roll_no)?;
        self.spec.check()
    }

    /// The stock item this receipt puts on the floor.
    pub fn to_stock_item(&self) -> StockItem {
        StockItem {
            key: String::new(),
            roll_no: self.roll_no.clone(),
            bill_no: self.bill_no.clone(),
            in_date: self.in_date,
            has_carrier: self.has_carrier,
            owner: self.owner.clone(),
            picker: self.picker.clone(),
            location: self.location.clone(),
            spec: self.spec.clone(),
        }
    }
}

/// A roll released from the warehouse against a redemption limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMovement {
    #[serde(default)]
    pub key: String,
    pub out_no: String,
    /// Code of the redemption limit the weight is drawn from.
    pub limit_no: String,
    #[serde(default)]
    pub is_transfer: bool,
    pub in_date: Option<NaiveDate>,
    pub out_date: Option<NaiveDate>,
    #[serde(default)]
    pub has_carrier: bool,
    #[serde(flatten)]
    pub location: Location,
    pub bill_no: String,
    pub owner: String,
    pub picker: String,
    pub out_car_no: String,
    pub roll_no: String,
    #[serde(default)]
    pub contract_no: String,
    #[serde(flatten)]
    pub spec: CargoSpec,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub scanner: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub damage_remark: String,
}

impl OutboundMovement {
    pub fn check(&self) -> Result<(), DomainError> {
        require("out_no", &self.out_no)?;
        require("limit_no", &self.limit_no)?;
        let (in_date, out_date) = match (self.in_date, self.out_date) {
            (Some(i), Some(o)) => (i, o),
            _ => {
                return Err(DomainError::Validation(
                    "in_date and out_date are required".to_string(),
                ))
            }
        };
        if out_date < in_date {
            return Err(DomainError::Validation(
                "out_date must not precede in_date".to_string(),
            ));
        }
        require("out_car_no", &self.out_car_no)?;
        check_roll(&self.location, &self.bill_no, &self.owner, &self.picker, &self.roll_no)?;
        self.spec.check()
    }
}

fn check_roll(
    location: &Location,
    bill_no: &str,
    owner: &str,
    picker: &str,
    roll_no: &str,
) -> Result<(), DomainError> {
    require("warehouse", &location.warehouse)?;
    require("zone", &location.zone)?;
    require("slot", &location.slot)?;
    require("bill_no", bill_no)?;
    require("owner", owner)?;
    require("picker", picker)?;
    require("roll_no", roll_no)
}

impl Record for InboundMovement {
    const COLLECTION: &'static str = "product_in";
    const ENTITY: &'static str = "InboundMovement";

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}

impl Record for OutboundMovement {
    const COLLECTION: &'static str = "product_out";
    const ENTITY: &'static str = "OutboundMovement";

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}

/// Search over either movement log.
#[derive(Debug, Clone, Default)]
pub struct MovementFilter {
    pub bill_no: Option<String>,
    pub roll_no: Option<String>,
    /// Matches the owner or the picker.
    pub customer: Option<String>,
}

impl MovementFilter {
    fn matches_fields(&self, bill_no: &str, roll_no: &str, owner: &str, picker: &str) -> bool {
        text_matches(bill_no, self.bill_no.as_deref())
            && text_matches(roll_no, self.roll_no.as_deref())
            && any_text_matches(&[owner, picker], self.customer.as_deref())
    }

    pub fn matches_inbound(&self, m: &InboundMovement) -> bool {
        self.matches_fields(&m.bill_no, &m.roll_no, &m.owner, &m.picker)
    }

    pub fn matches_outbound(&self, m: &OutboundMovement) -> bool {
        self.matches_fields(&m.bill_no, &m.roll_no, &m.owner, &m.picker)
    }
}
