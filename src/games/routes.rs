use actix_web::get;
use actix_web::web::{self, Data, Path};

use crate::server::{Response, State};

#[get("/games")]
async fn find_all(state: Data<State>) -> Response {
    let games = state.games.list().await;

    http_ok_json!(games);
}

#[get("/games/{id}")]
async fn find(game_id: Path<String>, state: Data<State>) -> Response {
    let game = state.games.find(&game_id).await?;

    http_ok_json!(game);
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(find_all);
    cfg.service(find);
}
