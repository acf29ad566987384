//! HTTP inbound adapter exposing the catalogue's REST endpoints.

pub mod courses;
pub mod error;
pub mod health;
pub mod materials;
pub mod modules;
pub mod schemas;
pub mod state;
pub mod subjects;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
pub use validation::{json_config, query_config};

use actix_web::web;

/// Register every catalogue route under the caller's scope.
///
/// Each entity registers its literal paths (`search`, `tag/{tag}`, ...)
/// before `{id}` so they are not captured as identifiers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(courses::configure)
        .configure(modules::configure)
        .configure(materials::configure)
        .configure(subjects::configure);
}
