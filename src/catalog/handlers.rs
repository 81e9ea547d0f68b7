use actix_web::{get, web, HttpResponse, Responder};

use super::models::{CatalogAppData, SizeOption};

#[get("/sizes")]
async fn sizes(data: web::Data<CatalogAppData>) -> impl Responder {
    let response: Vec<SizeOption> = data
        .schema
        .sizes()
        .iter()
        .map(|size| SizeOption::new(*size, data.schema))
        .collect();
    HttpResponse::Ok().json(response)
}

#[get("/images")]
async fn images(data: web::Data<CatalogAppData>) -> impl Responder {
    HttpResponse::Ok().json(&data.known_images)
}
