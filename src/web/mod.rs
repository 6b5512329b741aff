//! HTTP surface of the taskboard application.
//!
//! Thin translation layer: each handler parses request input, runs one or
//! two store calls on the blocking pool, and answers with the rendered board
//! or a redirect back to it.

pub mod handlers;

use actix_web::web;

/// Registers every route on an actix app.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::board)
        .service(handlers::add)
        .service(handlers::delete)
        .service(handlers::toggle)
        .service(handlers::edit)
        .service(handlers::update);
}
