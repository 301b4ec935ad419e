mod catalog;
mod models;
pub mod routes;

pub use catalog::GameCatalog;
pub use models::{CreateGame, Game, GamePatch};

#[cfg(test)]
pub use models::{fixtures, Availability};
