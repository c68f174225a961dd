use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::io;
use std::sync::Arc;

use taskgate::auth::AuthService;
use taskgate::config::Config;
use taskgate::routes;
use taskgate::store::{PgStore, TaskStore, UserStore};

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    log::error!("{}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| startup_error("invalid configuration", e))?;

    let store = Arc::new(
        PgStore::connect(&config)
            .await
            .map_err(|e| startup_error("failed to connect to database", e))?,
    );
    let users: Arc<dyn UserStore> = store.clone();
    let tasks: Arc<dyn TaskStore> = store;

    let auth = web::Data::new(
        AuthService::from_config(&config, users)
            .map_err(|e| startup_error("failed to initialise auth service", e))?,
    );
    let tasks = web::Data::from(tasks);

    log::info!(
        "Starting taskgate at {} (token ttl {}s)",
        config.server_url(),
        config.token_ttl_secs
    );

    HttpServer::new(move || {
        App::new()
            .app_data(auth.clone())
            .app_data(tasks.clone())
            .app_data(routes::json_config())
            .app_data(routes::query_config())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
