use rocket::figment::{providers::Env, Figment};
use serde::Deserialize;

use crate::dao::HistoryConfig;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub history: HistoryConfig,
}

/// Rocket's configuration sources with `APP_` environment variables on top
///
/// The first `_` after the prefix separates the section, so `APP_HISTORY_PATH`
/// sets `history.path`.
pub fn figment() -> Figment {
    rocket::Config::figment()
        .merge(Env::prefixed("APP_").map(|s| s.as_str().replacen('_', ".", 1).into()))
}
