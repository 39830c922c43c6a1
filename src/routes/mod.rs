pub mod auth;
pub mod health;
pub mod tasks;

use crate::auth::AuthMiddleware;
use actix_web::web;

/// Wires the service routes. Registration and login are public; the task
/// scope requires a valid bearer token.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::register).service(auth::login).service(
        web::scope("/tasks")
            .wrap(AuthMiddleware)
            .service(tasks::create_task)
            .service(tasks::list_tasks),
    );
}
