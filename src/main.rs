use astra::Server;
use log::info;

use crate::config::AppConfig;
use crate::db::{init_db, Database};
use crate::responses::error_to_response;
use crate::router::{handle, AppState};

mod alerts;
mod auth;
mod config;
mod db;
mod domain;
mod errors;
mod handlers;
mod responses;
mod router;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    env_logger::init();

    let config = AppConfig::from_env();

    let db = Database::new(&config.db_path);
    if let Err(e) = init_db(&db, &config.schema_path) {
        eprintln!("Database initialization failed: {e}");
        std::process::exit(1);
    }

    let addr = config.bind_addr;
    let state = AppState { db, config };

    info!("starting server at http://{addr}");
    let server = Server::bind(addr).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        eprintln!("Server ended with error: {e}");
    }
}
