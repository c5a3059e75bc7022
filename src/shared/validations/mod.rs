use validator::{Validate, ValidationErrors};

use crate::shared::types::errors::DomainError;

/// Run `validator` rules and flatten any failures into a single
/// `DomainError::Validation`, fields sorted for stable messages.
pub fn validate_fields<T: Validate>(value: &T) -> Result<(), DomainError> {
    value
        .validate()
        .map_err(|errors| DomainError::Validation(describe(&errors)))
}

fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, msg)
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

/// Reject blank required text fields.
pub fn require(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Form {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
        #[validate(range(min = 0.0, max = 100.0, message = "must be between 0 and 100"))]
        rate: f64,
    }

    #[test]
    fn collects_all_field_errors() {
        let form = Form {
            name: String::new(),
            rate: 120.0,
        };
        let err = validate_fields(&form).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation: name: name is required; rate: must be between 0 and 100"
        );
    }

    #[test]
    fn blank_is_rejected() {
        assert!(require("roll_no", "  ").is_err());
        assert!(require("roll_no", "J001").is_ok());
    }
}
