//! Order submission.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::cart::CartStore;
use crate::checkout::{NewOrder, ShippingAddress};
use crate::error::CommerceError;
use crate::ids::{OrderId, UserId};

/// Backend that stores placed orders (the hosted database in production).
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Persist `order` and return the id the backend assigned.
    async fn submit_order(&self, order: &NewOrder) -> Result<OrderId, CommerceError>;
}

/// Gateway that keeps submitted orders in memory.
#[derive(Debug, Default)]
pub struct InMemoryOrderGateway {
    orders: Mutex<Vec<(OrderId, NewOrder)>>,
}

impl InMemoryOrderGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Orders submitted so far, oldest first.
    pub fn orders(&self) -> Vec<(OrderId, NewOrder)> {
        self.orders
            .lock()
            .map(|orders| orders.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.orders.lock().map(|orders| orders.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OrderGateway for InMemoryOrderGateway {
    async fn submit_order(&self, order: &NewOrder) -> Result<OrderId, CommerceError> {
        let mut orders = self
            .orders
            .lock()
            .map_err(|e| CommerceError::OrderSubmission(e.to_string()))?;
        let id = OrderId::new((orders.len() + 1).to_string());
        orders.push((id.clone(), order.clone()));
        Ok(id)
    }
}

/// Validate the address, submit the cart as an order and clear the cart.
///
/// The cart is only cleared once the gateway has accepted the order; on any
/// error it is left exactly as it was.
pub async fn place_order(
    store: &mut CartStore,
    gateway: &dyn OrderGateway,
    shipping_address: ShippingAddress,
    user_id: Option<UserId>,
) -> Result<OrderId, CommerceError> {
    shipping_address.validate()?;
    let order = NewOrder::from_cart(store.cart(), shipping_address, user_id)?;

    let id = gateway.submit_order(&order).await.map_err(|e| {
        tracing::warn!(error = %e, "order submission failed");
        match e {
            CommerceError::OrderSubmission(_) => e,
            other => CommerceError::OrderSubmission(other.to_string()),
        }
    })?;

    tracing::debug!(order = %id, total = %order.total_price, "order placed");
    store.clear_cart();
    store.close_drawer();
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::money::{Currency, Money};
    use storefront_cache::Cache;

    struct DownGateway;

    #[async_trait]
    impl OrderGateway for DownGateway {
        async fn submit_order(&self, _order: &NewOrder) -> Result<OrderId, CommerceError> {
            Err(CommerceError::OrderSubmission("503 Service Unavailable".to_string()))
        }
    }

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

    fn filled_store() -> CartStore {
        let mut store = CartStore::open(Cache::in_memory());
        store
            .add_to_cart(&Product::new(1, "Shirt", Money::from_decimal(29.99, Currency::USD)), 2)
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_sequential_ids() {
        let gateway = InMemoryOrderGateway::new();
        let mut store = filled_store();
        let first = place_order(&mut store, &gateway, address(), None).await.unwrap();

        store
            .add_to_cart(&Product::new(2, "Hat", Money::from_decimal(19.99, Currency::USD)), 1)
            .unwrap();
        let second = place_order(&mut store, &gateway, address(), None).await.unwrap();

        assert_eq!(first.as_str(), "1");
        assert_eq!(second.as_str(), "2");
        assert_eq!(gateway.len(), 2);
    }

    #[tokio::test]
    async fn test_success_clears_cart() {
        let gateway = InMemoryOrderGateway::new();
        let mut store = filled_store();

        place_order(&mut store, &gateway, address(), Some(UserId::new("u-1")))
            .await
            .unwrap();

        assert_eq!(store.cart_count().unwrap(), 0);
        assert!(!store.is_open());
        let (_, order) = &gateway.orders()[0];
        assert_eq!(order.total_price.display_amount(), "59.98");
        assert_eq!(order.user_id, Some(UserId::new("u-1")));
    }

    #[tokio::test]
    async fn test_failure_keeps_cart() {
        let mut store = filled_store();
        let err = place_order(&mut store, &DownGateway, address(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, CommerceError::OrderSubmission(_)));
        assert_eq!(store.cart_count().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_invalid_address_not_submitted() {
        let gateway = InMemoryOrderGateway::new();
        let mut store = filled_store();
        let mut bad = address();
        bad.zip.clear();

        let err = place_order(&mut store, &gateway, bad, None).await.unwrap_err();
        assert!(matches!(err, CommerceError::ValidationError(_)));
        assert!(gateway.is_empty());
        assert_eq!(store.cart_count().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let gateway = InMemoryOrderGateway::new();
        let mut store = CartStore::open(Cache::in_memory());
        let err = place_order(&mut store, &gateway, address(), None).await.unwrap_err();
        assert!(matches!(err, CommerceError::EmptyCart));
    }
}
