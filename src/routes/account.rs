use actix_web::{web, HttpResponse, Responder};
use log::error;

use crate::middleware::auth_context::AuthenticatedUser;
use crate::state::AppState;

/*
    GET /api/account/travel-history
*/
pub async fn travel_history(user: AuthenticatedUser, state: web::Data<AppState>) -> impl Responder {
    let user_id = match user.object_id() {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid user id"),
    };

    match state.bookings.travel_history(&user_id).await {
        Ok(bookings) => HttpResponse::Ok().json(bookings),
        Err(err) => {
            error!("Failed to retrieve travel history for {}: {:?}", user_id, err);
            HttpResponse::InternalServerError().body("Failed to retrieve travel history")
        }
    }
}
