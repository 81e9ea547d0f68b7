use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use extra_container_editor::{
    catalog::{self, models::CatalogAppData},
    editor::{self, models::EditorsAppData},
    utils::env::{
        editoridle, hostname, knownimages, load_known_images, maxeditors, port, sizeschema,
    },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let schema = sizeschema();
    let known_images_path = knownimages();
    let known_images = load_known_images(known_images_path.as_deref());
    let idle = editoridle();
    let max_editors = maxeditors();

    // Log env for debugging
    log::info!("Using env:");
    log::info!("HOSTNAME {}", hostname());
    log::info!("PORT {}", port());
    log::info!("SIZESCHEMA {:?}", schema);
    log::info!(
        "KNOWNIMAGES {} ({} images)",
        known_images_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
        known_images.len()
    );
    log::info!("EDITORIDLE {}s", idle.as_secs());
    log::info!("MAXEDITORS {}", max_editors);

    // Editors live across requests and workers
    let editors = web::Data::new(
        EditorsAppData::new(schema, known_images.clone()).with_limits(idle, max_editors),
    );
    let catalog = web::Data::new(CatalogAppData {
        schema,
        known_images,
    });

    // Start server
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(editors.clone())
            .app_data(catalog.clone())
            .service(web::scope(&editor::scope()).configure(editor::configure))
            .service(web::scope(&catalog::scope()).configure(catalog::configure))
    })
    .bind(format!("{}:{}", hostname(), port()))?
    .run()
    .await
}
