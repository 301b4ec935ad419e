use actix_web::post;
use actix_web::web::{self, Data, Json};

use crate::bookings::RawBookingInput;
use crate::server::{Response, State};

#[post("/booking")]
async fn submit(booking: Json<RawBookingInput>, state: Data<State>) -> Response {
    let games = state.games.list().await;
    let booking = booking.into_inner().validate(&games)?;

    let booking = state.bookings.submit(booking).await?;

    http_created_json!(booking);
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(submit);
}
