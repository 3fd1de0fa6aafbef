#[macro_use]
extern crate diesel;

use actix_web::web;
use diesel::{prelude::*, r2d2};

pub mod actions;
pub mod auth;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod schema;

pub type DbPool = r2d2::Pool<r2d2::ConnectionManager<PgConnection>>;

pub fn initialize_db_pool() -> DbPool {
    let conn_spec = std::env::var("DATABASE_URL").expect("DATABASE_URL should be set");
    let manager = r2d2::ConnectionManager::<PgConnection>::new(conn_spec);
    r2d2::Pool::builder()
        .build(manager)
        .expect("database URL should point to a reachable PostgreSQL server")
}

/// Mounts every route under `/api` and installs the error handlers that keep
/// malformed payloads, query strings and path segments in the same
/// `{"detail": ...}` shape the handlers use.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(errors::json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(errors::query_error_handler))
            .app_data(web::PathConfig::default().error_handler(errors::path_error_handler))
            .configure(handlers::listings::configure)
            .configure(handlers::bookings::configure),
    );
}
