use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, HttpResponseBuilder};

/// Landing page, served for the root and for any unknown path
const LANDING_PAGE: &str = include_str!("home.html");

/// Home handler
pub async fn home() -> HttpResponse {
    landing_page(HttpResponse::Ok())
}

/// Fallback handler: the landing page with a 404 status
pub async fn not_found() -> HttpResponse {
    landing_page(HttpResponse::NotFound())
}

fn landing_page(mut builder: HttpResponseBuilder) -> HttpResponse {
    builder.content_type(ContentType::html()).body(LANDING_PAGE)
}
