//! Order domain types.
//!
//! Orders are created by the storefront purchase flow and are read-only
//! from the admin's perspective.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use prism_core::{OrderId, OrderStatus};

/// An order header row.
///
/// Field names serialize in camelCase to match the SPA's wire format.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Customer display name.
    pub customer_name: String,
    /// Customer email address.
    pub customer_email: String,
    /// Fulfillment status.
    pub status: OrderStatus,
    /// Order total.
    pub total_amount: Decimal,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

/// A single line item of an order.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Line item ID.
    pub id: i32,
    /// Order this item belongs to.
    pub order_id: OrderId,
    /// Product name at time of purchase.
    pub product_name: String,
    /// Quantity purchased.
    pub quantity: i32,
    /// Unit price at time of purchase.
    pub unit_price: Decimal,
}

/// An order with its line items, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}
