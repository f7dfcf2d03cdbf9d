use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;

use taskvault::auth::{AuthService, JwtSigner};
use taskvault::config::Config;
use taskvault::routes::{self, health};
use taskvault::store::{PgTasksStore, PgUsersStore};
use taskvault::tasks::TasksService;

fn io_error(msg: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, msg.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        io_error(e)
    })?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| {
            log::error!("Failed to connect to database: {}", e);
            io_error(e)
        })?;

    log::info!("Running database migrations");
    sqlx::migrate!("./migrations").run(&pool).await.map_err(|e| {
        log::error!("Failed to run database migrations: {}", e);
        io_error(e)
    })?;

    let auth_service = web::Data::new(AuthService::new(
        Arc::new(PgUsersStore::new(pool.clone())),
        Arc::new(JwtSigner::new(&config.jwt_secret, config.jwt_expires_in)),
    ));
    // The guard verifies with the same signer that issues tokens.
    let signer = auth_service.signer();
    let tasks_service = web::Data::new(TasksService::new(Arc::new(PgTasksStore::new(pool))));

    log::info!("Starting Taskvault server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(auth_service.clone())
            .app_data(tasks_service.clone())
            .service(health::health)
            .configure(routes::config(Arc::clone(&signer)))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
