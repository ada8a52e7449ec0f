use actix_web::{web, HttpResponse, Responder};
use bson::{oid::ObjectId, DateTime};
use chrono::Utc;
use log::{error, info};
use serde_json::json;

use crate::db::repository::parse_object_id;
use crate::middleware::auth_context::AuthenticatedUser;
use crate::models::{
    booking::{BookingRecord, PaymentConfirmation},
    place::Hotel,
};
use crate::services::payment::interface::PaymentError;
use crate::state::AppState;

async fn load_hotel(state: &AppState, id: &str) -> Result<(ObjectId, Hotel), HttpResponse> {
    let id = parse_object_id(id).map_err(|_| HttpResponse::BadRequest().body("Invalid ID"))?;

    match state.catalog.find_hotel(&id).await {
        Ok(Some(hotel)) => Ok((id, hotel)),
        Ok(None) => Err(HttpResponse::NotFound().body("Hotel not found")),
        Err(err) => {
            error!("Failed to retrieve hotel {}: {:?}", id, err);
            Err(HttpResponse::InternalServerError().body("Failed to retrieve hotel"))
        }
    }
}

/*
    GET /api/hotels/{id}
    Opens a payment order for one stay at the hotel's listed price.
*/
pub async fn hotel_details(
    _user: AuthenticatedUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let (_, hotel) = match load_hotel(&state, &path).await {
        Ok(found) => found,
        Err(response) => return response,
    };

    let amount = hotel.price_minor_units();
    match state.payments.create_order(amount, &hotel.name).await {
        Ok(order) => HttpResponse::Ok().json(json!({
            "hotel": hotel,
            "order": order,
            "payment_key": state.payments.public_key(),
        })),
        Err(err) => {
            error!("Failed to create payment order for {}: {}", hotel.name, err);
            HttpResponse::InternalServerError().body(format!("Failed to create payment order: {}", err))
        }
    }
}

/*
    POST /api/hotels/{id}/payment-success
*/
pub async fn payment_success(
    user: AuthenticatedUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
    input: web::Json<PaymentConfirmation>,
) -> impl Responder {
    let user_id = match user.object_id() {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid user id"),
    };

    let payment_id = input.into_inner().payment_id.trim().to_string();
    if payment_id.is_empty() {
        return HttpResponse::BadRequest().body("Missing payment id");
    }

    let (hotel_id, hotel) = match load_hotel(&state, &path).await {
        Ok(found) => found,
        Err(response) => return response,
    };

    let place = match state.catalog.find_place(&hotel.place_id).await {
        Ok(Some(place)) => place,
        Ok(None) => return HttpResponse::NotFound().body("Place not found"),
        Err(err) => {
            error!("Failed to retrieve place {}: {:?}", hotel.place_id, err);
            return HttpResponse::InternalServerError().body("Failed to retrieve place");
        }
    };

    let status = match state.payments.payment_status(&payment_id).await {
        Ok(status) => status,
        Err(PaymentError::NotFound(_)) => {
            return HttpResponse::BadRequest().body("Unknown payment id");
        }
        Err(err) => {
            error!("Failed to verify payment {}: {}", payment_id, err);
            return HttpResponse::InternalServerError().body("Failed to verify payment");
        }
    };

    let booking = BookingRecord {
        id: Some(ObjectId::new()),
        user_id,
        hotel_id,
        hotel_name: hotel.name.clone(),
        place_id: hotel.place_id,
        place_name: place.name,
        image: hotel.image.clone().unwrap_or_default(),
        booking_date: Utc::now().format("%Y-%m-%d").to_string(),
        price: format!("{:.2}", hotel.price),
        payment_id,
        payment_status: status.booking_status().to_string(),
        created_at: Some(DateTime::now()),
    };

    match state.bookings.record_booking(&booking).await {
        Ok(()) => {
            info!("Booking recorded for {} at {}", user.email, hotel.name);
            HttpResponse::Created().json(json!({
                "message": format!("Booking confirmed for {}!", hotel.name),
                "booking": booking,
            }))
        }
        Err(err) => {
            error!("Failed to record booking: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to record booking")
        }
    }
}
