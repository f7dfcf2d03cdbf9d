use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

/// Liveness check for load balancers and orchestrators.
///
/// Answers from the HTTP worker alone, so a `200` means the server accepts
/// requests. Database reachability is not checked here; a broken pool shows up
/// as `500`s on `/auth` and `/tasks` instead. Mounted outside the `/tasks`
/// guard, so no token is needed.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now()
    }))
}
