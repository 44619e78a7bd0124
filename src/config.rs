use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Environment variables with this prefix override the defaults,
/// e.g. `GATEHOUSE_DATABASE_URL`, `GATEHOUSE_LOGLEVEL`.
pub const ENV_PREFIX: &str = "GATEHOUSE_";

pub static CONFIG: LazyLock<Config> =
    LazyLock::new(|| Config::load().expect("Gatehouse configuration is invalid"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite file standing in for the browser's local storage.
    pub database_url: String,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:gatehouse.sqlite".to_string(),
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}
