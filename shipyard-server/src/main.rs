#![deny(missing_docs)]
//! Shipyard server executable.
//!
//! Hosts the ship catalog REST endpoints.

mod config;
mod db;
mod models;
mod openapi;
mod repository;
mod routes;
mod schema;

#[cfg(not(test))]
use actix_cors::Cors;
#[cfg(not(test))]
use actix_web::{App, HttpServer, http::header, web};
#[cfg(not(test))]
use dotenvy::dotenv;
#[cfg(not(test))]
use shipyard_core::{MemoryShipRepository, ShipService};

#[cfg(not(test))]
use crate::config::ServerConfig;
#[cfg(not(test))]
use crate::db::init_pool;
#[cfg(not(test))]
use crate::repository::{PgShipRepository, Storage};
#[cfg(not(test))]
use crate::routes::{AppState, configure, json_config, query_config};

#[cfg(not(test))]
fn storage_from(config: &ServerConfig) -> std::io::Result<Storage> {
    match &config.database_url {
        Some(url) => {
            let pool = init_pool(url).map_err(std::io::Error::other)?;
            Ok(Storage::Postgres(PgShipRepository::new(pool)))
        }
        None => {
            log::warn!("DATABASE_URL not set; ships are kept in memory and lost on restart");
            Ok(Storage::Memory(MemoryShipRepository::new()))
        }
    }
}

#[cfg(not(test))]
fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;
    // Pool setup and migrations block, so they run before the actix system starts.
    let storage = storage_from(&config)?;
    log::info!("using {} ship storage", storage.label());

    let state = web::Data::new(AppState {
        ships: ShipService::new(storage),
    });
    let ServerConfig {
        host,
        port,
        allowed_origins,
        ..
    } = config;
    log::info!("listening on {host}:{port}");

    actix_web::rt::System::new().block_on(async move {
        HttpServer::new(move || {
            let mut cors = Cors::default()
                .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
                .allowed_headers(vec![header::CONTENT_TYPE])
                .max_age(3600);
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            App::new()
                .wrap(actix_web::middleware::Logger::default())
                .wrap(cors)
                .app_data(state.clone())
                .app_data(json_config())
                .app_data(query_config())
                .configure(configure)
        })
        .bind((host, port))?
        .run()
        .await
    })
}

#[cfg(test)]
fn main() {}
