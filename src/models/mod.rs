pub mod booking;
pub mod map;
pub mod place;
pub mod trip;
