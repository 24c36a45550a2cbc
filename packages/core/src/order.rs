//! Order domain types for the order-processing actors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Error from parsing an order ID string.
#[derive(Debug, thiserror::Error)]
#[error("invalid order id: {0}")]
pub struct ParseOrderIdError(#[from] ulid::DecodeError);

/// Unique identifier for an order, using ULID for chronological sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub Ulid);

impl OrderId {
    /// Create a new unique order ID.
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Parse an order ID from either the display form (`ORD-<ulid>`) or a
    /// bare ULID.
    pub fn parse(s: &str) -> Result<Self, ParseOrderIdError> {
        let raw = s.strip_prefix("ORD-").unwrap_or(s);
        Ok(Self(Ulid::from_string(raw)?))
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ORD-{}", self.0)
    }
}

/// A single line item in an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub price: f64,
}

/// Processing state of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    /// Order is stored and waiting to be processed.
    #[default]
    Pending,
    /// Order was accepted by the stateless handler.
    Created,
    /// Order is being worked on.
    Processing,
    /// No order exists for the requested ID.
    NotFound,
}

impl OrderState {
    /// Simple status string for display and wire responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderState::Pending => "pending",
            OrderState::Created => "created",
            OrderState::Processing => "processing",
            OrderState::NotFound => "not found",
        }
    }
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored order owned by the keyed-store actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub status: OrderState,
    pub created_at: DateTime<Utc>,
}

impl OrderRecord {
    /// Create a new pending record with a fresh ID.
    pub fn new(user_id: impl Into<String>, items: Vec<OrderItem>) -> Self {
        Self {
            id: OrderId::new(),
            user_id: user_id.into(),
            items,
            status: OrderState::Pending,
            created_at: Utc::now(),
        }
    }
}

/// Reply to an order-creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: OrderId,
    pub status: OrderState,
    pub message: String,
}

/// Reply to an order-status lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusReply {
    pub order_id: OrderId,
    pub status: OrderState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_ids_are_unique_and_displayable() {
        let a = OrderId::new();
        let b = OrderId::new();
        assert_ne!(a, b);
        assert!(a.to_string().starts_with("ORD-"));
    }

    #[test]
    fn order_id_parses_its_own_display_form() {
        let id = OrderId::new();
        assert_eq!(OrderId::parse(&id.to_string()).unwrap(), id);
        assert_eq!(OrderId::parse(&id.0.to_string()).unwrap(), id);
        assert!(OrderId::parse("not-a-ulid").is_err());
    }

    #[test]
    fn order_state_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderState::NotFound).unwrap(),
            "\"not_found\""
        );
        assert_eq!(
            serde_json::from_str::<OrderState>("\"pending\"").unwrap(),
            OrderState::Pending
        );
    }

    #[test]
    fn order_state_strings() {
        assert_eq!(OrderState::Pending.as_str(), "pending");
        assert_eq!(OrderState::NotFound.as_str(), "not found");
    }

    #[test]
    fn new_record_starts_pending() {
        let record = OrderRecord::new("u1", vec![]);
        assert_eq!(record.status, OrderState::Pending);
        assert_eq!(record.user_id, "u1");
    }
}
