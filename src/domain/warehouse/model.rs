//! Area, zone and slot entities

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::repositories::Record;
use crate::shared::errors::DomainError;
use crate::shared::validations::validate_fields;

/// A warehouse site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    #[serde(default)]
    pub key: String,
    #[validate(length(min = 1, max = 100, message = "area name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 32, message = "area code is required"))]
    pub code: String,
    #[validate(length(min = 1, max = 200, message = "area address is required"))]
    pub address: String,
}

impl Area {
    pub fn new(name: impl Into<String>, code: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            address: address.into(),
            ..Default::default()
        }
    }

    pub fn check(&self) -> Result<(), DomainError> {
        validate_fields(self)
    }
}

/// A storage hall inside an area. Dimensions are in metres.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    #[serde(default)]
    pub key: String,
    #[validate(length(min = 1, max = 100, message = "zone name is required"))]
    pub name: String,
    /// Display order within the area.
    pub index: u32,
    /// Name of the owning area.
    #[validate(length(min = 1, message = "zone area is required"))]
    pub area: String,
    pub length: Decimal,
    pub width: Decimal,
    pub height: Decimal,
}

impl Zone {
    pub fn new(area: impl Into<String>, name: impl Into<String>, index: u32) -> Self {
        Self {
            area: area.into(),
            name: name.into(),
            index,
            ..Default::default()
        }
    }

    pub fn check(&self) -> Result<(), DomainError> {
        validate_fields(self)?;
        for (field, value) in [
            ("length", self.length),
            ("width", self.width),
            ("height", self.height),
        ] {
            if value <= Decimal::ZERO {
                return Err(DomainError::Validation(format!(
                    "{}: must be positive",
                    field
                )));
            }
        }
        Ok(())
    }

    /// Floor area in square metres.
    pub fn floor_area(&self) -> Decimal {
        self.length * self.width
    }
}

/// A single storage position inside a zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(default)]
    pub key: String,
    #[validate(length(min = 1, max = 100, message = "slot name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 32, message = "slot code is required"))]
    pub code: String,
    #[validate(length(min = 1, message = "slot area is required"))]
    pub area: String,
    #[validate(length(min = 1, message = "slot zone is required"))]
    pub zone: String,
}

impl Slot {
    pub fn new(
        area: impl Into<String>,
        zone: impl Into<String>,
        name: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            area: area.into(),
            zone: zone.into(),
            name: name.into(),
            code: code.into(),
            ..Default::default()
        }
    }

    pub fn check(&self) -> Result<(), DomainError> {
        validate_fields(self)
    }
}

/// Where a roll sits, by area, zone and slot name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub warehouse: String,
    pub zone: String,
    pub slot: String,
}

impl Location {
    pub fn new(
        warehouse: impl Into<String>,
        zone: impl Into<String>,
        slot: impl Into<String>,
    ) -> Self {
        Self {
            warehouse: warehouse.into(),
            zone: zone.into(),
            slot: slot.into(),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.warehouse, self.zone, self.slot)
    }
}

impl Record for Area {
    const COLLECTION: &'static str = "warehouse_areas";
    const ENTITY: &'static str = "Area";

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}

impl Record for Zone {
    const COLLECTION: &'static str = "warehouse_zones";
    const ENTITY: &'static str = "Zone";

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}

impl Record for Slot {
    const COLLECTION: &'static str = "warehouse_slots";
    const ENTITY: &'static str = "Slot";

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}
