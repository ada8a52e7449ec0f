use actix_web::{
    error::{InternalError, JsonPayloadError},
    web, HttpRequest, HttpResponse, Resource,
};
use log::warn;

use crate::middleware::auth_context::AuthenticatedUser;
use crate::models::trip::{TripRequest, TripResponse};
use crate::services::itinerary_service::TripFailure;
use crate::state::AppState;

/// `/api/trips/generate`: POST only, every outcome is a 200 with a
/// `success` flag in the body.
pub fn generate_resource() -> Resource {
    web::resource("/generate")
        .app_data(web::JsonConfig::default().error_handler(json_error))
        .route(web::post().to(generate_trip))
        .default_service(web::to(invalid_method))
}

/*
    POST /api/trips/generate
*/
pub async fn generate_trip(
    state: web::Data<AppState>,
    user: Option<AuthenticatedUser>,
    input: web::Json<TripRequest>,
) -> HttpResponse {
    let response = match state
        .itineraries
        .generate(input.into_inner(), user.as_ref())
        .await
    {
        Ok(trip) => TripResponse::from(trip),
        Err(failure) => TripResponse::failed(failure),
    };
    HttpResponse::Ok().json(response)
}

async fn invalid_method() -> HttpResponse {
    HttpResponse::Ok().json(TripResponse::failed(TripFailure::InvalidMethod))
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected trip request body: {}", err);
    let response =
        HttpResponse::Ok().json(TripResponse::failed(TripFailure::Request(err.to_string())));
    InternalError::from_response(err, response).into()
}
