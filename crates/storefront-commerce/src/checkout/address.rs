//! Shipping details collected on the checkout form.

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

/// Where to ship an order and who to tell about it.
///
/// Serialized with camelCase keys, the shape stored in the order's
/// `shipping_address` column.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub zip: String,
}

impl ShippingAddress {
    /// Check every field is filled in and the email looks like one.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let required = [
            ("email", &self.email),
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("address", &self.address),
            ("city", &self.city),
            ("zip", &self.zip),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(CommerceError::ValidationError(format!("{} is required", name)));
            }
        }

        match self.email.trim().split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(CommerceError::ValidationError(format!(
                "invalid email address: {}",
                self.email
            ))),
        }
    }

    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        format!("{}, {} {}", self.address, self.city, self.zip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> ShippingAddress {
        ShippingAddress {
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            address: "12 Analytical Way".to_string(),
            city: "London".to_string(),
            zip: "N1 9GU".to_string(),
        }
    }

    #[test]
    fn test_valid_address() {
        let a = address();
        assert!(a.validate().is_ok());
        assert_eq!(a.full_name(), "Ada Lovelace");
        assert_eq!(a.one_line(), "12 Analytical Way, London N1 9GU");
    }

    #[test]
    fn test_blank_field_rejected() {
        let mut a = address();
        a.city = "   ".to_string();
        let err = a.validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: city is required");
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut a = address();
        a.email = "ada.example.com".to_string();
        assert!(matches!(a.validate(), Err(CommerceError::ValidationError(_))));
    }

    #[test]
    fn test_camel_case_keys() {
        let json = serde_json::to_value(address()).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
    }
}
