//! Package pricing and booking requests for basketball trips, plus the admin
//! routes that manage games, prices and incoming bookings.
#![warn(missing_debug_implementations, rust_2018_idioms, missing_docs)]

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate log;

#[macro_use]
extern crate serde_derive;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use actix_web::web;
use anyhow::Error;
use dotenv::dotenv;

#[macro_use]
mod macros;

mod admin;
mod bookings;
mod config;
mod errors;
mod games;
mod pricing;
mod server;
mod storage;

use config::Config;

#[actix_web::main]
async fn main() -> anyhow::Result<(), Error> {
    init().await?;

    Ok(())
}

async fn init() -> anyhow::Result<(), Error> {
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(filter)
        .try_init()?;

    Config::init();

    let _sentry = Config::sentry_dsn().map(|dsn| {
        info!("reporting errors to sentry");
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let storage = storage::Storage::from_config(Config::data_dir());
    let state = web::Data::new(server::State::load(storage)?);

    debug!("launching the actix webserver");
    server::launch(state).await?;

    Ok(())
}
