//! The routes behind the admin dashboard: managing the game catalog and the
//! pricing table, and reading the booking requests.

use actix_web::web::{self, Data, Json, Path};
use actix_web::{delete, get, post, put};
use serde_json::Value;

use crate::games::{CreateGame, GamePatch};
use crate::pricing::PricingTable;
use crate::server::{Response, State};

#[derive(Debug, Serialize)]
struct Message {
    message: &'static str,
}

#[post("/games")]
async fn create_game(game: Json<CreateGame>, state: Data<State>) -> Response {
    let game = state.games.create(game.into_inner()).await?;

    http_created_json!(game);
}

#[put("/games/{id}")]
async fn update_game(
    game_id: Path<String>,
    patch: Json<GamePatch>,
    state: Data<State>,
) -> Response {
    let game = state.games.update(&game_id, patch.into_inner()).await?;

    http_ok_json!(game);
}

#[delete("/games/{id}")]
async fn delete_game(game_id: Path<String>, state: Data<State>) -> Response {
    state.games.delete(&game_id).await?;

    http_ok_json!(Message {
        message: "Game deleted"
    });
}

#[put("/pricing")]
async fn update_pricing(table: Json<Value>, state: Data<State>) -> Response {
    let table = PricingTable::from_json(&table)?;

    let table = state.pricing.set(table).await?;

    http_ok_json!(table);
}

#[get("/bookings")]
async fn bookings(state: Data<State>) -> Response {
    let bookings = state.bookings.list().await;

    http_ok_json!(bookings);
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(create_game);
    cfg.service(update_game);
    cfg.service(delete_game);
    cfg.service(update_pricing);
    cfg.service(bookings);
}
