mod models;
pub mod routes;
mod store;

pub use models::RawBookingInput;
pub use store::BookingStore;
