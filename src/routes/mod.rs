use actix_web::web;

pub mod account;
pub mod contact;
pub mod health;
pub mod hotels;
pub mod places;
pub mod trips;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .service(web::scope("/trips").service(trips::generate_resource()))
                .service(
                    web::scope("/places")
                        .route("", web::get().to(places::list_places))
                        .route("/{id}", web::get().to(places::place_details))
                        .route("/{id}/hotels", web::get().to(places::hotels_near_place))
                        .route(
                            "/{id}/transportation",
                            web::get().to(places::transportation_near_place),
                        ),
                )
                .service(
                    web::scope("/hotels")
                        .route("/{id}", web::get().to(hotels::hotel_details))
                        .route(
                            "/{id}/payment-success",
                            web::post().to(hotels::payment_success),
                        ),
                )
                .route(
                    "/account/travel-history",
                    web::get().to(account::travel_history),
                )
                .route("/contact", web::post().to(contact::submit)),
        );
}
