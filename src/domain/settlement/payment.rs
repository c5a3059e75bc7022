//! Payment details attached to a fee line

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    Electronic,
    Cash,
    /// Billed on the customer's monthly statement.
    MonthlyStatement,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Electronic => write!(f, "Electronic"),
            Self::Cash => write!(f, "Cash"),
            Self::MonthlyStatement => write!(f, "MonthlyStatement"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "electronic" => Ok(Self::Electronic),
            "cash" => Ok(Self::Cash),
            "monthlystatement" | "monthly-statement" | "monthly" => Ok(Self::MonthlyStatement),
            other => Err(format!("unknown payment method: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default)]
    pub fees_paid: bool,
    #[serde(default)]
    pub payment_person: String,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}

impl Payment {
    pub fn paid_by(person: impl Into<String>, method: PaymentMethod) -> Self {
        Self {
            fees_paid: true,
            payment_person: person.into(),
            payment_method: Some(method),
        }
    }
}
