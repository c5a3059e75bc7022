//! Customer domain entity

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::repositories::Record;
use crate::shared::errors::DomainError;
use crate::shared::validations::validate_fields;

/// A customer keeps at most this many contacts.
pub const MAX_CONTACTS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default)]
    pub key: String,
    #[validate(length(min = 1, max = 32, message = "customer code is required"))]
    pub code: String,
    #[validate(length(min = 1, max = 200, message = "customer name is required"))]
    pub name: String,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub address: String,
    /// May appear as cargo owner on settlements.
    #[serde(default)]
    pub cargo_owner: bool,
    /// May appear as pickup party on settlements.
    #[serde(default)]
    pub pickup_party: bool,
    /// Handles paper goods.
    #[serde(default)]
    pub paper: bool,
    /// Handles bulk goods.
    #[serde(default)]
    pub bulk: bool,
    #[validate(email(message = "invalid email address"))]
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

impl Customer {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn check(&self) -> Result<(), DomainError> {
        validate_fields(self)?;
        if self.contacts.len() > MAX_CONTACTS {
            return Err(DomainError::Validation(format!(
                "a customer has at most {} contacts",
                MAX_CONTACTS
            )));
        }
        Ok(())
    }

    /// Text shown in pickers: the alias when set, otherwise the full name.
    pub fn display_name(&self) -> &str {
        if self.alias.trim().is_empty() {
            &self.name
        } else {
            &self.alias
        }
    }
}

impl Record for Customer {
    const COLLECTION: &'static str = "customers";
    const ENTITY: &'static str = "Customer";

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_customer_is_valid() {
        assert!(Customer::new("C00001", "Jianfa Paper Group").check().is_ok());
    }

    #[test]
    fn name_is_required() {
        let c = Customer::new("C00001", "");
        let err = c.check().unwrap_err();
        assert!(err.to_string().contains("customer name is required"));
    }

    #[test]
    fn email_is_checked_when_present() {
        let mut c = Customer::new("C00002", "Fengtu Ltd");
        c.email = Some("not-an-email".into());
        assert!(c.check().is_err());
        c.email = Some("fengtu@example.com".into());
        assert!(c.check().is_ok());
    }

    #[test]
    fn contact_limit() {
        let mut c = Customer::new("C00002", "Fengtu Ltd");
        c.contacts = vec![Contact::default(); MAX_CONTACTS + 1];
        assert!(c.check().is_err());
    }

    #[test]
    fn display_name_prefers_alias() {
        let mut c = Customer::new("C00001", "Jianfa Paper Group");
        assert_eq!(c.display_name(), "Jianfa Paper Group");
        c.alias = "Jianfa".into();
        assert_eq!(c.display_name(), "Jianfa");
    }
}
