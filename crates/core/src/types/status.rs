//! Order status values.
//!
//! Orders are recorded as `Pending Payment` at checkout intake; every later
//! transition happens outside the storefront (payment confirmation, shipping).
//! The wire strings are the human-readable labels the back-office already uses.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Intake recorded, payment not yet confirmed.
    #[default]
    #[serde(rename = "Pending Payment")]
    PendingPayment,
    /// Payment confirmed.
    Paid,
    /// Handed to the carrier.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Cancelled before fulfilment.
    Cancelled,
}

impl OrderStatus {
    /// The label stored in the order document.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PendingPayment => "Pending Payment",
            Self::Paid => "Paid",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending Payment" => Ok(Self::PendingPayment),
            "Paid" => Ok(Self::Paid),
            "Shipped" => Ok(Self::Shipped),
            "Delivered" => Ok(Self::Delivered),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}
