use async_trait::async_trait;
use log::error;
use std::str::FromStr;
use stripe::{Currency, PaymentIntent, PaymentIntentId, PaymentIntentStatus};

use crate::models::booking::PaymentOrder;
use crate::services::payment::interface::{PaymentError, PaymentGateway, PaymentStatus};

/// Stripe-backed [`PaymentGateway`]. Credentials are passed in at
/// construction; nothing is read from the environment here.
pub struct StripeProvider {
    client: Option<stripe::Client>,
    publishable_key: String,
    currency: Currency,
}

pub fn parse_currency(code: &str) -> Result<Currency, PaymentError> {
    serde_json::from_value(serde_json::Value::String(code.trim().to_lowercase()))
        .map_err(|_| PaymentError::InvalidCurrency(code.to_string()))
}

impl StripeProvider {
    pub fn new(
        secret_key: &str,
        publishable_key: impl Into<String>,
        currency: &str,
    ) -> Result<Self, PaymentError> {
        let client = (!secret_key.is_empty()).then(|| stripe::Client::new(secret_key));
        Ok(Self {
            client,
            publishable_key: publishable_key.into(),
            currency: parse_currency(currency)?,
        })
    }

    fn client(&self) -> Result<&stripe::Client, PaymentError> {
        self.client.as_ref().ok_or(PaymentError::NotConfigured)
    }
}

#[async_trait]
impl PaymentGateway for StripeProvider {
    async fn create_order(&self, amount: i64, description: &str) -> Result<PaymentOrder, PaymentError> {
        let client = self.client()?;

        let mut create_intent = stripe::CreatePaymentIntent::new(amount, self.currency);
        create_intent.description = Some(description);
        // Captured as soon as the customer confirms.
        create_intent.capture_method = Some(stripe::PaymentIntentCaptureMethod::Automatic);

        match PaymentIntent::create(client, create_intent).await {
            Ok(intent) => Ok(PaymentOrder {
                order_id: intent.id.to_string(),
                client_secret: intent.client_secret,
                amount: intent.amount,
                currency: intent.currency.to_string(),
            }),
            Err(e) => {
                error!("Error creating payment intent: {:?}", e);
                Err(PaymentError::Gateway(e.to_string()))
            }
        }
    }

    async fn payment_status(&self, payment_id: &str) -> Result<PaymentStatus, PaymentError> {
        let client = self.client()?;
        let intent_id = PaymentIntentId::from_str(payment_id)
            .map_err(|_| PaymentError::NotFound(payment_id.to_string()))?;

        match PaymentIntent::retrieve(client, &intent_id, &[]).await {
            Ok(intent) => Ok(match intent.status {
                PaymentIntentStatus::Succeeded => PaymentStatus::Succeeded,
                other => PaymentStatus::Pending(other.as_str().to_string()),
            }),
            Err(stripe::StripeError::Stripe(e)) if e.http_status == 404 => {
                Err(PaymentError::NotFound(payment_id.to_string()))
            }
            Err(e) => {
                error!("Error retrieving payment intent {}: {:?}", payment_id, e);
                Err(PaymentError::Gateway(e.to_string()))
            }
        }
    }

    fn public_key(&self) -> &str {
        &self.publishable_key
    }
}
