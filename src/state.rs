use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::repository::{BookingStore, Catalog, TripStore};
use crate::services::{
    itinerary_service::ItineraryService, payment::interface::PaymentGateway,
    trip_planner::TripPlanGenerator,
};

/// Process-wide context handed to every handler through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<dyn Catalog>,
    pub bookings: Arc<dyn BookingStore>,
    pub payments: Arc<dyn PaymentGateway>,
    pub itineraries: Arc<ItineraryService>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        catalog: Arc<dyn Catalog>,
        bookings: Arc<dyn BookingStore>,
        trips: Arc<dyn TripStore>,
        planner: Arc<dyn TripPlanGenerator>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        let itineraries = ItineraryService::new(
            planner,
            trips,
            config.ai_timeout,
            config.max_trip_days,
        );
        Self {
            config: Arc::new(config),
            catalog,
            bookings,
            payments,
            itineraries: Arc::new(itineraries),
        }
    }
}
