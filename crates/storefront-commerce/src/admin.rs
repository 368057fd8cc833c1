//! Admin dashboard figures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checkout::OrderStatus;
use crate::error::CommerceError;
use crate::ids::OrderId;
use crate::money::{self, Currency, Money};

/// An order as listed on the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    pub id: OrderId,
    #[serde(with = "money::decimal")]
    pub total_price: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    /// Customer email from the shipping address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardStats {
    pub total_products: usize,
    pub total_orders: usize,
    #[serde(with = "money::decimal")]
    pub revenue: Money,
}

impl DashboardStats {
    /// Revenue is the sum of every order's total, whatever its status.
    pub fn compute(total_products: usize, orders: &[OrderSummary]) -> Result<Self, CommerceError> {
        let currency = orders
            .first()
            .map_or(Currency::default(), |o| o.total_price.currency);
        let revenue = Money::try_sum(orders.iter().map(|o| &o.total_price), currency)
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            total_products,
            total_orders: orders.len(),
            revenue,
        })
    }
}

/// Orders sorted newest first.
pub fn recent_first(mut orders: Vec<OrderSummary>) -> Vec<OrderSummary> {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    orders
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn summary(id: &str, cents: i64, day: u32) -> OrderSummary {
        OrderSummary {
            id: OrderId::new(id),
            total_price: Money::new(cents, Currency::USD),
            status: OrderStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap(),
            email: None,
        }
    }

    #[test]
    fn test_compute_stats() {
        let orders = vec![summary("1", 5998, 1), summary("2", 17996, 2)];
        let stats = DashboardStats::compute(8, &orders).unwrap();

        assert_eq!(stats.total_products, 8);
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.revenue.display(), "$239.94");
    }

    #[test]
    fn test_compute_no_orders() {
        let stats = DashboardStats::compute(0, &[]).unwrap();
        assert_eq!(stats.total_orders, 0);
        assert!(stats.revenue.is_zero());
    }

    #[test]
    fn test_recent_first() {
        let orders = recent_first(vec![summary("1", 100, 1), summary("3", 100, 3), summary("2", 100, 2)]);
        let ids: Vec<_> = orders.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["3", "2", "1"]);
    }

    #[test]
    fn test_summary_json() {
        let json = r#"{"id":"7","total_price":55,"status":"shipped","created_at":"2026-03-04T10:00:00Z"}"#;
        let summary: OrderSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.status, OrderStatus::Shipped);
        assert_eq!(summary.total_price.amount_cents, 5500);
        assert!(summary.email.is_none());
    }
}
