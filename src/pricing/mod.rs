mod models;
pub mod options;
pub mod routes;
mod store;

pub use models::{PricingTable, Selection};
pub use store::PricingStore;
