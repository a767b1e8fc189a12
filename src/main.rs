mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::database::{MongoDB, MongoProductStore, MongoUserStore, ProductStore, UserStore};
use crate::services::{Authenticator, BcryptMatcher, IdentityResolver, ProductService, TokenCodec};

fn cors(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        return Cors::permissive();
    }

    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::AUTHORIZATION,
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::ACCEPT,
        ])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("❌ Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    log::info!("🚀 Starting Catalog Service...");

    let db = MongoDB::new(&config.database_url).await.map_err(|e| {
        log::error!("❌ Failed to connect to MongoDB: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    log::info!("✅ MongoDB connected successfully");

    let users: Arc<dyn UserStore> = Arc::new(MongoUserStore::new(&db));
    let products: Arc<dyn ProductStore> = Arc::new(MongoProductStore::new(&db));
    let codec = Arc::new(TokenCodec::new(&config.jwt_secret));

    let authenticator = web::Data::new(Authenticator::new(
        users.clone(),
        codec.clone(),
        Arc::new(BcryptMatcher::new(config.bcrypt_cost)),
    ));
    let resolver = web::Data::new(IdentityResolver::new(users));
    let product_service = web::Data::new(ProductService::new(products));
    let codec_data = web::Data::from(codec);
    let config_data = web::Data::new(config.clone());

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(authenticator.clone())
            .app_data(resolver.clone())
            .app_data(product_service.clone())
            .app_data(codec_data.clone())
            .app_data(config_data.clone())
            .wrap(cors(&config_data.allowed_origins))
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
