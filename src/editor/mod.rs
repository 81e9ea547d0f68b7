use actix_web::web::ServiceConfig;

pub mod core;
pub mod handlers;
pub mod models;
pub mod session;

pub fn scope() -> String {
    "/editor".to_string()
}

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(handlers::open_editor);
    cfg.service(handlers::inspect_field);
    cfg.service(handlers::show_editor);
    cfg.service(handlers::close_editor);
    cfg.service(handlers::create);
    cfg.service(handlers::edit_record);
    cfg.service(handlers::delete_record);
    cfg.service(handlers::update_dialog);
    cfg.service(handlers::add_command_row);
    cfg.service(handlers::add_env_var_row);
    cfg.service(handlers::remove_row);
    cfg.service(handlers::submit);
    cfg.service(handlers::cancel);
}
