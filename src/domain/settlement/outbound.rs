//! Outbound settlement record

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::payment::Payment;
use crate::domain::fees::line_fee;
use crate::domain::repositories::Record;
use crate::shared::errors::DomainError;
use crate::shared::filter::text_matches;
use crate::shared::validations::require;

/// Priced-by-quantity charges raised when goods leave the warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChargeKind {
    PaperCut,
    Overtime,
    Boxing,
    HighRail,
    Laying,
    CornerWood,
    Cardboard,
}

impl ChargeKind {
    pub const ALL: [ChargeKind; 7] = [
        Self::PaperCut,
        Self::Overtime,
        Self::Boxing,
        Self::HighRail,
        Self::Laying,
        Self::CornerWood,
        Self::Cardboard,
    ];

    /// Quantity unit the price is quoted in.
    pub fn unit(&self) -> &'static str {
        match self {
            Self::PaperCut => "cut",
            Self::Overtime | Self::Boxing | Self::HighRail | Self::Laying => "tonne",
            Self::CornerWood | Self::Cardboard => "piece",
        }
    }
}

impl std::fmt::Display for ChargeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PaperCut => write!(f, "PaperCut"),
            Self::Overtime => write!(f, "Overtime"),
            Self::Boxing => write!(f, "Boxing"),
            Self::HighRail => write!(f, "HighRail"),
            Self::Laying => write!(f, "Laying"),
            Self::CornerWood => write!(f, "CornerWood"),
            Self::Cardboard => write!(f, "Cardboard"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeteredCharge {
    pub kind: ChargeKind,
    pub unit_price: Option<Decimal>,
    pub quantity: Option<Decimal>,
    #[serde(default)]
    pub fee: Decimal,
    #[serde(default)]
    pub payment: Payment,
}

impl MeteredCharge {
    pub fn new(kind: ChargeKind, unit_price: Decimal, quantity: Decimal) -> Self {
        Self {
            kind,
            unit_price: Some(unit_price),
            quantity: Some(quantity),
            fee: Decimal::ZERO,
            payment: Payment::default(),
        }
    }
}

/// A lump-sum charge with a free-text description (transport, sundries).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatCharge {
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub payment: Payment,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundSettlement {
    #[serde(default)]
    pub key: String,
    /// `OUT` followed by six digits, assigned on creation.
    #[serde(default)]
    pub out_id: String,
    pub cargo_owner: String,
    #[serde(default)]
    pub pickup_party: String,
    pub out_time: Option<NaiveDateTime>,
    pub bill_no: String,
    #[serde(default)]
    pub plate_number: String,
    #[serde(default)]
    pub charges: Vec<MeteredCharge>,
    #[serde(default)]
    pub transport: FlatCharge,
    #[serde(default)]
    pub other: FlatCharge,
}

impl OutboundSettlement {
    pub fn recompute(&mut self) {
        for charge in &mut self.charges {
            charge.fee = line_fee(charge.unit_price, charge.quantity);
        }
    }

    pub fn charge(&self, kind: ChargeKind) -> Option<&MeteredCharge> {
        self.charges.iter().find(|c| c.kind == kind)
    }

    fn fee_lines(&self) -> impl Iterator<Item = (Decimal, &Payment)> + '_ {
        self.charges
            .iter()
            .map(|c| (c.fee, &c.payment))
            .chain(
                [&self.transport, &self.other]
                    .into_iter()
                    .map(|f| (f.amount.unwrap_or(Decimal::ZERO), &f.payment)),
            )
    }

    pub fn total_fee(&self) -> Decimal {
        self.fee_lines().map(|(fee, _)| fee).sum()
    }

    pub fn unpaid_fee(&self) -> Decimal {
        self.fee_lines()
            .filter(|(_, payment)| !payment.fees_paid)
            .map(|(fee, _)| fee)
            .sum()
    }

    pub fn check(&self) -> Result<(), DomainError> {
        require("cargo_owner", &self.cargo_owner)?;
        require("bill_no", &self.bill_no)?;
        if self.out_time.is_none() {
            return Err(DomainError::Validation("out_time is required".to_string()));
        }

        for (idx, charge) in self.charges.iter().enumerate() {
            if self.charges[..idx].iter().any(|c| c.kind == charge.kind) {
                return Err(DomainError::Validation(format!(
                    "{} charge listed twice",
                    charge.kind
                )));
            }
            let negative = [charge.unit_price, charge.quantity]
                .into_iter()
                .flatten()
                .any(|v| v < Decimal::ZERO);
            if negative {
                return Err(DomainError::Validation(format!(
                    "{} charge: amounts must not be negative",
                    charge.kind
                )));
            }
        }

        for (name, flat) in [("transport", &self.transport), ("other", &self.other)] {
            if matches!(flat.amount, Some(a) if a < Decimal::ZERO) {
                return Err(DomainError::Validation(format!(
                    "{} fee must not be negative",
                    name
                )));
            }
        }
        Ok(())
    }
}

impl Record for OutboundSettlement {
    const COLLECTION: &'static str = "cost_out";
    const ENTITY: &'static str = "OutboundSettlement";

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}

#[derive(Debug, Clone, Default)]
pub struct OutboundFilter {
    pub bill_no: Option<String>,
    pub cargo_owner: Option<String>,
    pub pickup_party: Option<String>,
    pub plate_number: Option<String>,
    /// Keeps records shipped on this calendar day.
    pub date: Option<NaiveDate>,
}

impl OutboundFilter {
    pub fn matches(&self, record: &OutboundSettlement) -> bool {
        text_matches(&record.bill_no, self.bill_no.as_deref())
            && text_matches(&record.cargo_owner, self.cargo_owner.as_deref())
            && text_matches(&record.pickup_party, self.pickup_party.as_deref())
            && text_matches(&record.plate_number, self.plate_number.as_deref())
            && self
                .date
                .map_or(true, |day| record.out_time.map(|t| t.date()) == Some(day))
    }
}
