#![allow(dead_code)]

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use serde_json::json;

use taskvault::auth::{AuthResponse, AuthService, JwtSigner};
use taskvault::routes::{self, health};
use taskvault::store::{InMemoryTasksStore, InMemoryUsersStore};
use taskvault::tasks::TasksService;

pub const JWT_SECRET: &str = "integration_test_secret";

/// The full application, backed by in-memory stores.
pub async fn init_app() -> impl Service<
    Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    let auth = web::Data::new(AuthService::new(
        Arc::new(InMemoryUsersStore::new()),
        Arc::new(JwtSigner::new(JWT_SECRET, 3600)),
    ));
    let signer = auth.signer();
    let tasks = web::Data::new(TasksService::new(Arc::new(InMemoryTasksStore::new())));

    test::init_service(
        App::new()
            .wrap(Logger::default())
            .app_data(auth)
            .app_data(tasks)
            .service(health::health)
            .configure(routes::config(signer)),
    )
    .await
}

/// Signs up `username` and returns a fresh access token for it.
pub async fn sign_up_and_in(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    username: &str,
    password: &str,
) -> String {
    let credentials = json!({ "username": username, "password": password });

    let req = test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(&credentials)
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(
        resp.status().is_success(),
        "signup of {} failed with {}",
        username,
        resp.status()
    );

    let req = test::TestRequest::post()
        .uri("/auth/signin")
        .set_json(&credentials)
        .to_request();
    let response: AuthResponse = test::call_and_read_body_json(app, req).await;
    response.access_token
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
