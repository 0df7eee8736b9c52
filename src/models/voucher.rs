// src/models/voucher.rs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Customer reference: a bare user id, or the populated profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Customer {
    Id(String),
    Profile {
        #[serde(rename = "_id", default)]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        email: Option<String>,
    },
}

impl Default for Customer {
    fn default() -> Self {
        Customer::Id(String::new())
    }
}

impl Customer {
    /// Name, then email, then id.
    pub fn label(&self) -> &str {
        match self {
            Customer::Id(id) => id,
            Customer::Profile { id, name, email } => name
                .as_deref()
                .or(email.as_deref())
                .or(id.as_deref())
                .unwrap_or(""),
        }
    }
}

/// A voucher purchase. Created by the checkout flow; the dashboard only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherOrder {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub user: Customer,

    #[serde(default)]
    pub quantity: u32,

    /// Amount charged, in the gateway's major currency unit.
    #[serde(default)]
    pub amount: f64,

    /// Payment gateway order id.
    #[serde(default, alias = "razorpayOrderId")]
    pub order_id: Option<String>,

    /// Payment gateway payment id, present once paid.
    #[serde(default, alias = "razorpayPaymentId")]
    pub payment_id: Option<String>,

    #[serde(default)]
    pub status: OrderStatus,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for VoucherOrder {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn title(&self) -> &str {
        self.user.label()
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.user.label()];
        if let Some(order_id) = &self.order_id {
            fields.push(order_id);
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_reads_gateway_fields() {
        let order: VoucherOrder = serde_json::from_value(serde_json::json!({
            "_id": "o1",
            "user": { "_id": "u1", "name": "Asha", "email": "asha@example.com" },
            "quantity": 3,
            "amount": 1497.0,
            "razorpayOrderId": "order_9A33XWu170gUtm",
            "status": "completed",
            "createdAt": "2024-03-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(order.title(), "Asha");
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.order_id.as_deref(), Some("order_9A33XWu170gUtm"));
        assert!(order.created_at.is_some());
    }

    #[test]
    fn bare_customer_id_is_the_label() {
        let order: VoucherOrder =
            serde_json::from_value(serde_json::json!({ "user": "u42", "status": "failed" }))
                .unwrap();
        assert_eq!(order.title(), "u42");
        assert_eq!(order.status, OrderStatus::Failed);
    }
}
