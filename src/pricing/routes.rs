use actix_web::web::{self, Data, Json};
use actix_web::{get, post};

use crate::pricing::Selection;
use crate::server::{Response, State};

#[get("/pricing")]
async fn find(state: Data<State>) -> Response {
    let table = state.pricing.get().await;

    http_ok_json!(table);
}

#[post("/calculate-price")]
async fn calculate(selection: Json<Selection>, state: Data<State>) -> Response {
    let estimate = state.pricing.estimate(&selection).await;

    debug!(
        "estimated {} ({} per guest) for {:?}",
        estimate.total,
        estimate.per_guest(),
        selection
    );

    http_ok_json!(estimate);
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(find);
    cfg.service(calculate);
}
