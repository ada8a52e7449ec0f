use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// One entry of a user's travel history, written after a hotel payment.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BookingRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub hotel_id: ObjectId,
    pub hotel_name: String,
    pub place_id: ObjectId,
    pub place_name: String,
    pub image: String,
    pub booking_date: String,
    pub price: String,
    pub payment_id: String,
    pub payment_status: String,
    pub created_at: Option<DateTime>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentConfirmation {
    #[serde(default)]
    pub payment_id: String,
}

#[derive(Debug, Serialize)]
pub struct PaymentOrder {
    pub order_id: String,
    pub client_secret: Option<String>,
    pub amount: i64,
    pub currency: String,
}
