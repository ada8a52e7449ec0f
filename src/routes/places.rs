use actix_web::{web, HttpResponse, Responder};
use log::error;
use serde::Deserialize;
use serde_json::json;

use crate::db::repository::parse_object_id;
use crate::models::place::Place;
use crate::services::map_service::{self, TRANSPORTATION_TYPES};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct QueryParams {
    limit: Option<u16>,
    search: Option<String>,
}

pub(crate) async fn load_place(state: &AppState, id: &str) -> Result<Place, HttpResponse> {
    let id = parse_object_id(id).map_err(|_| HttpResponse::BadRequest().body("Invalid ID"))?;

    match state.catalog.find_place(&id).await {
        Ok(Some(place)) => Ok(place),
        Ok(None) => Err(HttpResponse::NotFound().body("Place not found")),
        Err(err) => {
            error!("Failed to retrieve place {}: {:?}", id, err);
            Err(HttpResponse::InternalServerError().body("Failed to retrieve place"))
        }
    }
}

/*
    GET /api/places?search=&limit=
*/
pub async fn list_places(
    state: web::Data<AppState>,
    params: web::Query<QueryParams>,
) -> impl Responder {
    let limit = params.limit.map(i64::from);

    match state.catalog.list_places(params.search.as_deref(), limit).await {
        Ok(places) => HttpResponse::Ok().json(places),
        Err(err) => {
            error!("Failed to retrieve places: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve places")
        }
    }
}

/*
    GET /api/places/{id}
*/
pub async fn place_details(path: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    let place = match load_place(&state, &path).await {
        Ok(place) => place,
        Err(response) => return response,
    };

    let map = map_service::place_map(&place);
    HttpResponse::Ok().json(json!({ "place": place, "map": map }))
}

/*
    GET /api/places/{id}/hotels
*/
pub async fn hotels_near_place(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let place = match load_place(&state, &path).await {
        Ok(place) => place,
        Err(response) => return response,
    };

    let place_id = match place.id {
        Some(id) => id,
        None => return HttpResponse::InternalServerError().body("Place has no id"),
    };

    match state.catalog.hotels_for_place(&place_id).await {
        Ok(hotels) => {
            let map = map_service::hotels_map(&place, &hotels);
            HttpResponse::Ok().json(json!({ "place": place, "hotels": hotels, "map": map }))
        }
        Err(err) => {
            error!("Failed to retrieve hotels for {}: {:?}", place_id, err);
            HttpResponse::InternalServerError().body("Failed to retrieve hotels")
        }
    }
}

/*
    GET /api/places/{id}/transportation
*/
pub async fn transportation_near_place(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let place = match load_place(&state, &path).await {
        Ok(place) => place,
        Err(response) => return response,
    };

    let map = map_service::transportation_map(&place);
    HttpResponse::Ok().json(json!({
        "place": place,
        "transportation_types": TRANSPORTATION_TYPES,
        "map": map
    }))
}
