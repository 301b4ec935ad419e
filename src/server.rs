use actix_cors::Cors;
use actix_web::web::{self, Data};
use actix_web::{get, middleware, App, HttpRequest, HttpResponse, HttpServer};

use crate::admin;
use crate::bookings::{self, BookingStore};
use crate::config::Config;
use crate::errors::ServiceError;
use crate::games::{self, GameCatalog};
use crate::pricing::{self, PricingStore};
use crate::storage::Storage;

pub type Response = Result<HttpResponse, ServiceError>;

/// Everything the handlers share, each store guards its own data.
#[derive(Debug, Clone)]
pub struct State {
    pub games: GameCatalog,
    pub pricing: PricingStore,
    pub bookings: BookingStore,
}

impl State {
    pub fn load(storage: Storage) -> Result<Self, ServiceError> {
        Ok(State {
            games: GameCatalog::load(storage.clone())?,
            pricing: PricingStore::load(storage.clone())?,
            bookings: BookingStore::load(storage)?,
        })
    }
}

#[get("/health")]
async fn health(_: HttpRequest) -> &'static str {
    "ok"
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(262_144)
        .error_handler(|err, _| {
            debug!("rejected json payload: {}", err);
            ServiceError::BadRequest(err.to_string()).into()
        })
}

fn cors() -> Cors {
    match Config::allowed_origin() {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allow_any_method()
            .allow_any_header(),
        None => Cors::permissive(),
    }
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .configure(games::routes::register)
            .configure(pricing::routes::register)
            .configure(bookings::routes::register)
            .configure(admin::routes::register)
            .service(health),
    );
}

pub async fn launch(state: Data<State>) -> std::io::Result<()> {
    let address = format!("{}:{}", Config::api_host(), Config::api_port());
    info!("listening on {}", address);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::DefaultHeaders::new().header("X-Version", env!("CARGO_PKG_VERSION")))
            .wrap(middleware::Logger::default())
            .wrap(sentry_actix::Sentry::new())
            .wrap(cors())
            .configure(register)
    })
    .bind(address)?
    .run()
    .await
}
