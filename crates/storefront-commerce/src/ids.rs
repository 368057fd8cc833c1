//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing an OrderId where a UserId is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(OrderId);
define_id!(UserId);

/// Product identifier as handed out by the catalog.
///
/// The hosted database uses integer keys, imported catalogs sometimes use
/// strings. The JSON form is kept as-is: `1` stays a number, `"sku-1"` stays
/// a string, and the two never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl ProductId {
    /// Parse user input: anything that reads as an integer becomes
    /// [`ProductId::Number`].
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.parse::<i64>() {
            Ok(n) => ProductId::Number(n),
            Err(_) => ProductId::Text(trimmed.to_string()),
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(n: i64) -> Self {
        ProductId::Number(n)
    }
}

impl From<i32> for ProductId {
    fn from(n: i32) -> Self {
        ProductId::Number(i64::from(n))
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        ProductId::Text(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId::Text(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = OrderId::new("order-123");
        assert_eq!(id.as_str(), "order-123");
    }

    #[test]
    fn test_id_from_string() {
        let id: UserId = "user-456".into();
        assert_eq!(id.as_str(), "user-456");
    }

    #[test]
    fn test_product_id_keeps_json_shape() {
        let numeric: ProductId = serde_json::from_str("1").unwrap();
        assert_eq!(numeric, ProductId::Number(1));
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "1");

        let text: ProductId = serde_json::from_str(r#""sku-1""#).unwrap();
        assert_eq!(text, ProductId::from("sku-1"));
        assert_eq!(serde_json::to_string(&text).unwrap(), r#""sku-1""#);
    }

    #[test]
    fn test_number_and_text_differ() {
        assert_ne!(ProductId::Number(1), ProductId::from("1"));
    }

    #[test]
    fn test_product_id_parse() {
        assert_eq!(ProductId::parse("42"), ProductId::Number(42));
        assert_eq!(ProductId::parse(" 7 "), ProductId::Number(7));
        assert_eq!(ProductId::parse("hat"), ProductId::from("hat"));
    }

    #[test]
    fn test_product_id_display() {
        assert_eq!(ProductId::Number(99).to_string(), "99");
        assert_eq!(ProductId::from("abc").to_string(), "abc");
    }
}
