pub mod gemini;
pub mod itinerary_service;
pub mod map_service;
pub mod payment;
pub mod stripe;
pub mod trip_planner;
