use std::{io, sync::Arc};

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{error, info, warn};

use travelhub_api::{
    config::AppConfig,
    db::{mongo::create_mongo_client, repository::MongoRepository},
    middleware::auth::AuthMiddleware,
    routes,
    services::{gemini::GeminiTripPlanner, stripe::provider::StripeProvider},
    state::AppState,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        info!("Release mode");
    }

    let config = AppConfig::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let client = create_mongo_client(&config.mongodb_uri)
        .await
        .map_err(|e| {
            error!("Failed to create MongoDB client: {}", e);
            io::Error::other(e)
        })?;
    let repository = Arc::new(MongoRepository::new(client, &config.mongodb_database));

    let planner = GeminiTripPlanner::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.ai_timeout,
    )
    .map_err(io::Error::other)?;
    if !planner.is_configured() {
        warn!("GEMINI_API_KEY not set; trip generation requests will fail");
    }

    let payments = StripeProvider::new(
        &config.stripe_secret_key,
        config.stripe_publishable_key.clone(),
        &config.payment_currency,
    )
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    if config.stripe_secret_key.is_empty() {
        warn!("STRIPE_SECRET_KEY not set; hotel checkout will fail");
    }

    let host = config.host.clone();
    let port = config.port;
    let jwt_secret = config.jwt_secret.clone();

    let state = web::Data::new(AppState::new(
        config,
        repository.clone(),
        repository.clone(),
        repository,
        Arc::new(planner),
        Arc::new(payments),
    ));

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(AuthMiddleware::new(&jwt_secret))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
