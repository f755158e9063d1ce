#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate rocket;

use std::error::Error;
use std::sync::Arc;

use log::info;

use crate::dao::{HistoryDao, HistoryDaoFile};

mod api;
mod config;
mod dao;
mod error;
mod expression;

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let figment = config::figment();
    let config: config::Config = figment.extract()?;

    if tail::ensure_exists(&config.history.path)? {
        info!("Created history file {}", config.history.path.display());
    }
    let history = Arc::new(HistoryDaoFile::new(&config.history));

    rocket::custom(figment)
        .manage(history as Arc<dyn HistoryDao>)
        .manage(config.history)
        .mount("/", api::routes())
        .launch()
        .await?;

    Ok(())
}
