use actix_web::web::ServiceConfig;

pub mod handlers;
pub mod models;

pub fn scope() -> String {
    "/catalog".to_string()
}

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(handlers::sizes);
    cfg.service(handlers::images);
}
