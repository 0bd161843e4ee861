use std::sync::Arc;

use actix_web::{App, HttpServer, middleware::Logger, web};
use dotenv::dotenv;
use env_logger::Env;

use qrdeck::config::AppConfig;
use qrdeck::db::mongodb::{MongoStore, get_database};
use qrdeck::middlewares::cors::build_cors;
use qrdeck::routes::{init_routes, json_config};
use qrdeck::state::app_state::AppState;
use qrdeck::utils::jwt::JwtVerifier;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let verifier = match JwtVerifier::from_config(&config.auth) {
        Ok(verifier) => web::Data::new(verifier),
        Err(e) => {
            log::error!("Invalid auth configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // The database must be reachable before we accept traffic
    let db = match get_database(&config.mongodb_uri, &config.mongodb_database).await {
        Ok(db) => db,
        Err(e) => {
            log::error!("Error connecting to the database: {:#}", e);
            std::process::exit(1);
        }
    };
    let store = MongoStore::new(&db);
    if let Err(e) = store.ensure_indexes().await {
        log::error!("{:#}", e);
        std::process::exit(1);
    }

    let app_state = web::Data::new(AppState::from_config(Arc::new(store), &config));
    let allowed_origins = config.allowed_origins.clone();

    log::info!(
        "Server running on {}:{} (frontend {})",
        config.bind_address,
        config.port,
        config.frontend_url
    );

    HttpServer::new(move || {
        let logger = Logger::new("%a \"%r\" %s %b \"%{Referer}i\" \"%{User-Agent}i\" %D ms");
        App::new()
            .wrap(build_cors(&allowed_origins))
            .wrap(logger)
            .app_data(app_state.clone())
            .app_data(verifier.clone())
            .app_data(json_config())
            .configure(init_routes)
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}
