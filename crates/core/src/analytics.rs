//! Back-office analytics types.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{OrderStatus, Price};

/// The aggregate collections an admin can reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsKind {
    Customers,
    Orders,
    Products,
}

impl AnalyticsKind {
    /// All kinds, in reporting order.
    pub const ALL: [Self; 3] = [Self::Customers, Self::Orders, Self::Products];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Orders => "orders",
            Self::Products => "products",
        }
    }
}

impl std::fmt::Display for AnalyticsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalyticsKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customers" => Ok(Self::Customers),
            "orders" => Ok(Self::Orders),
            "products" => Ok(Self::Products),
            _ => Err(format!("invalid analytics kind: {s}")),
        }
    }
}

/// Headline order figures for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_orders: u64,
    pub total_revenue: Price,
    pub shipped_orders: u64,
    pub pending_orders: u64,
}

impl AnalyticsSummary {
    /// Fold a set of order documents into summary figures.
    ///
    /// Revenue sums each order's `amount`, or its `total` when `amount` is
    /// absent. Values that are neither numbers nor numeric strings count as
    /// zero. The revenue sum saturates rather than overflowing.
    pub fn from_orders<'a, I>(orders: I) -> Self
    where
        I: IntoIterator<Item = &'a Map<String, Value>>,
    {
        orders.into_iter().fold(Self::default(), |mut acc, order| {
            acc.total_orders += 1;
            acc.total_revenue = acc.total_revenue + order_revenue(order);
            match order.get("status").and_then(Value::as_str).map(OrderStatus::from_str) {
                Some(Ok(OrderStatus::Shipped)) => acc.shipped_orders += 1,
                Some(Ok(OrderStatus::PendingPayment)) => acc.pending_orders += 1,
                _ => {}
            }
            acc
        })
    }
}

fn order_revenue(order: &Map<String, Value>) -> Price {
    order
        .get("amount")
        .or_else(|| order.get("total"))
        .and_then(decimal_of)
        .map_or(Price::ZERO, Price::new)
}

fn decimal_of(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_summary_counts_and_revenue() {
        let orders = [
            doc(json!({"status": "Pending Payment", "amount": 10})),
            doc(json!({"status": "Shipped", "amount": 24.5})),
            doc(json!({"status": "Shipped", "total": "5.25"})),
            doc(json!({"status": "Paid", "amount": "n/a"})),
            doc(json!({})),
        ];

        let summary = AnalyticsSummary::from_orders(&orders);
        assert_eq!(summary.total_orders, 5);
        assert_eq!(summary.shipped_orders, 2);
        assert_eq!(summary.pending_orders, 1);
        assert_eq!(summary.total_revenue, Price::from_cents(3975));
    }

    #[test]
    fn test_revenue_saturates_on_huge_amounts() {
        let orders = [
            doc(json!({"status": "Paid", "amount": "60000000000000000000000000000"})),
            doc(json!({"status": "Paid", "amount": "60000000000000000000000000000"})),
            doc(json!({"status": "Paid", "total": 1})),
        ];

        let summary = AnalyticsSummary::from_orders(&orders);
        assert_eq!(summary.total_orders, 3);
        assert_eq!(summary.total_revenue.amount(), Decimal::MAX);
        assert!(serde_json::to_value(summary).is_ok());
    }

    #[test]
    fn test_empty_summary_serializes_camel_case() {
        let summary = AnalyticsSummary::from_orders(&[]);
        assert_eq!(
            serde_json::to_value(summary).unwrap(),
            json!({"totalOrders": 0, "totalRevenue": 0.0, "shippedOrders": 0, "pendingOrders": 0})
        );
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("orders".parse::<AnalyticsKind>().unwrap(), AnalyticsKind::Orders);
        assert!("all".parse::<AnalyticsKind>().is_err());
    }
}
