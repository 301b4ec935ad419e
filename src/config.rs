use std::path::Path;

use validator::Validate;

#[derive(Deserialize, Debug, Validate)]
pub struct Config {
    api_host: Option<String>,
    #[validate(range(min = 1, max = 65535))]
    api_port: Option<u32>,
    /// directory holding the json snapshots, everything stays in memory when unset
    #[validate(length(min = 1))]
    data_dir: Option<String>,
    /// origin allowed to call the api cross-origin, any origin when unset
    #[validate(url)]
    allowed_origin: Option<String>,
    sentry_dsn: Option<String>,
}

lazy_static! {
    static ref CONFIG: Config = match envy::from_env::<Config>() {
        Ok(config) => {
            match config.validate() {
                Ok(()) => config,
                Err(e) => panic!("invalid environment variable: {}", e),
            }
        }
        Err(error) => panic!("Missing or incorrect environment variable: {}", error),
    };
}

impl Config {
    /// force the environment to be parsed, so configuration errors show up at boot
    pub fn init() {
        lazy_static::initialize(&CONFIG);
        debug!(
            "serving on {}:{}, snapshots in {:?}",
            Config::api_host(),
            Config::api_port(),
            Config::data_dir()
        );
    }

    pub fn api_host() -> &'static str {
        match &CONFIG.api_host {
            Some(host) => host.as_ref(),
            None => "localhost",
        }
    }

    pub fn api_port() -> u32 {
        CONFIG.api_port.unwrap_or(5000)
    }

    pub fn data_dir() -> Option<&'static Path> {
        CONFIG.data_dir.as_ref().map(Path::new)
    }

    pub fn allowed_origin() -> Option<&'static str> {
        CONFIG.allowed_origin.as_ref().map(|origin| origin.as_ref())
    }

    pub fn sentry_dsn() -> Option<&'static str> {
        CONFIG.sentry_dsn.as_ref().map(|dsn| dsn.as_ref())
    }
}
