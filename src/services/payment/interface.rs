use async_trait::async_trait;
use thiserror::Error;

use crate::models::booking::PaymentOrder;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment gateway is not configured")]
    NotConfigured,
    #[error("unsupported currency: {0}")]
    InvalidCurrency(String),
    #[error("payment not found: {0}")]
    NotFound(String),
    #[error("payment gateway error: {0}")]
    Gateway(String),
}

/// Payment state as reported by the gateway, reduced to what bookings need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentStatus {
    Succeeded,
    Pending(String),
}

impl PaymentStatus {
    pub fn booking_status(&self) -> &str {
        match self {
            PaymentStatus::Succeeded => "completed",
            PaymentStatus::Pending(status) => status,
        }
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Opens an order for `amount` minor units in the gateway's currency.
    async fn create_order(&self, amount: i64, description: &str) -> Result<PaymentOrder, PaymentError>;
    async fn payment_status(&self, payment_id: &str) -> Result<PaymentStatus, PaymentError>;
    /// Key the client-side checkout widget is initialised with.
    fn public_key(&self) -> &str;
}
