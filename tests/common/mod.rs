#![allow(dead_code)]

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use travelhub_api::{
    config::AppConfig,
    db::repository::{BookingStore, Catalog, StoreError, TripStore},
    middleware::auth::{issue_token, AuthMiddleware},
    models::{
        booking::{BookingRecord, PaymentOrder},
        place::{Hotel, Place},
        trip::SavedTrip,
    },
    routes,
    services::{
        payment::interface::{PaymentError, PaymentGateway, PaymentStatus},
        trip_planner::{GeneratorError, TripPlanGenerator, TripPlanParams},
    },
    state::AppState,
};

pub const JWT_SECRET: &str = "test_secret";
pub const TEST_USER_ID: &str = "65f0c0ffee0000000000beef";

pub fn long_itinerary() -> String {
    "<h2>Day 1</h2><ul><li>Morning walk along the ghats</li><li>Lunch at a rooftop cafe</li></ul>"
        .repeat(3)
}

pub enum PlannerBehaviour {
    Reply(String),
    Fail(String),
    Sleep(Duration),
}

pub struct FakePlanner {
    behaviour: PlannerBehaviour,
    pub calls: Mutex<Vec<TripPlanParams>>,
}

impl FakePlanner {
    pub fn new(behaviour: PlannerBehaviour) -> Self {
        Self {
            behaviour,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<TripPlanParams> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TripPlanGenerator for FakePlanner {
    async fn generate(&self, params: &TripPlanParams) -> Result<String, GeneratorError> {
        self.calls.lock().unwrap().push(params.clone());
        match &self.behaviour {
            PlannerBehaviour::Reply(content) => Ok(content.clone()),
            PlannerBehaviour::Fail(message) => Err(GeneratorError::Failed(message.clone())),
            PlannerBehaviour::Sleep(duration) => {
                tokio::time::sleep(*duration).await;
                Ok(long_itinerary())
            }
        }
    }
}

#[derive(Default)]
pub struct FakeStore {
    pub fail_saves: bool,
    pub places: Vec<Place>,
    pub hotels: Vec<Hotel>,
    pub trips: Mutex<Vec<SavedTrip>>,
    pub bookings: Mutex<Vec<BookingRecord>>,
}

impl FakeStore {
    pub fn saved_trips(&self) -> Vec<SavedTrip> {
        self.trips.lock().unwrap().clone()
    }

    pub fn bookings(&self) -> Vec<BookingRecord> {
        self.bookings.lock().unwrap().clone()
    }
}

#[async_trait]
impl TripStore for FakeStore {
    async fn save_trip(&self, trip: &SavedTrip) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::InvalidId("write rejected".to_string()));
        }
        self.trips.lock().unwrap().push(trip.clone());
        Ok(())
    }
}

#[async_trait]
impl Catalog for FakeStore {
    async fn list_places(
        &self,
        search: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<Place>, StoreError> {
        let search = search.unwrap_or_default().to_lowercase();
        let limit = limit.map_or(usize::MAX, |l| l as usize);
        Ok(self
            .places
            .iter()
            .filter(|p| p.name.to_lowercase().starts_with(&search))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_place(&self, id: &ObjectId) -> Result<Option<Place>, StoreError> {
        Ok(self.places.iter().find(|p| p.id.as_ref() == Some(id)).cloned())
    }

    async fn hotels_for_place(&self, place_id: &ObjectId) -> Result<Vec<Hotel>, StoreError> {
        Ok(self
            .hotels
            .iter()
            .filter(|h| &h.place_id == place_id)
            .cloned()
            .collect())
    }

    async fn find_hotel(&self, id: &ObjectId) -> Result<Option<Hotel>, StoreError> {
        Ok(self.hotels.iter().find(|h| h.id.as_ref() == Some(id)).cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl BookingStore for FakeStore {
    async fn record_booking(&self, booking: &BookingRecord) -> Result<(), StoreError> {
        self.bookings.lock().unwrap().push(booking.clone());
        Ok(())
    }

    async fn travel_history(&self, user_id: &ObjectId) -> Result<Vec<BookingRecord>, StoreError> {
        let mut history: Vec<BookingRecord> = self
            .bookings()
            .into_iter()
            .filter(|b| &b.user_id == user_id)
            .collect();
        history.reverse();
        Ok(history)
    }
}

pub struct FakeGateway {
    pub status: PaymentStatus,
    pub orders: Mutex<Vec<(i64, String)>>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self {
            status: PaymentStatus::Succeeded,
            orders: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_order(&self, amount: i64, description: &str) -> Result<PaymentOrder, PaymentError> {
        self.orders.lock().unwrap().push((amount, description.to_string()));
        Ok(PaymentOrder {
            order_id: "pi_test_123".to_string(),
            client_secret: Some("pi_test_123_secret".to_string()),
            amount,
            currency: "inr".to_string(),
        })
    }

    async fn payment_status(&self, payment_id: &str) -> Result<PaymentStatus, PaymentError> {
        if payment_id.starts_with("pi_") {
            Ok(self.status.clone())
        } else {
            Err(PaymentError::NotFound(payment_id.to_string()))
        }
    }

    fn public_key(&self) -> &str {
        "pk_test_123"
    }
}

pub fn sample_place(name: &str) -> Place {
    Place {
        id: Some(ObjectId::new()),
        name: name.to_string(),
        description: Some(format!("{} is lovely in winter", name)),
        latitude: 26.91,
        longitude: 75.79,
        image: None,
    }
}

pub fn sample_hotel(place: &Place, name: &str, price: f64) -> Hotel {
    Hotel {
        id: Some(ObjectId::new()),
        place_id: place.id.unwrap_or_else(ObjectId::new),
        name: name.to_string(),
        description: None,
        price,
        latitude: 26.92,
        longitude: 75.8,
        image: Some(format!("https://cdn.example.com/{}.jpg", name)),
    }
}

pub struct TestApp {
    pub planner: Arc<FakePlanner>,
    pub store: Arc<FakeStore>,
    pub gateway: Arc<FakeGateway>,
    pub config: AppConfig,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with(
            FakePlanner::new(PlannerBehaviour::Reply(long_itinerary())),
            FakeStore::default(),
        )
    }

    pub fn with(planner: FakePlanner, store: FakeStore) -> Self {
        let config = AppConfig {
            jwt_secret: JWT_SECRET.to_string(),
            ai_timeout: Duration::from_millis(200),
            ..AppConfig::default()
        };
        Self {
            planner: Arc::new(planner),
            store: Arc::new(store),
            gateway: Arc::new(FakeGateway::default()),
            config,
        }
    }

    pub fn state(&self) -> AppState {
        AppState::new(
            self.config.clone(),
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            self.planner.clone(),
            self.gateway.clone(),
        )
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(AuthMiddleware::new(JWT_SECRET))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(self.state()))
            .configure(routes::configure)
    }
}

pub fn bearer(user_id: &str) -> (&'static str, String) {
    let token = issue_token(user_id, "test@example.com", JWT_SECRET, 3600)
        .expect("token should encode");
    ("Authorization", format!("Bearer {}", token))
}
