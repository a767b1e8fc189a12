pub mod auth;
pub mod health;
pub mod products;
pub mod swagger;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::middleware::AuthMiddleware;
use crate::utils::AppError;

/// Unreadable JSON bodies get the same `{success, error}` shape as every
/// other client error.
fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("⚠️ {} {} rejected body: {}", req.method(), req.path(), err);
    AppError::validation("Invalid request body").into()
}

/// Registers every route. Expects `Authenticator`, `IdentityResolver`,
/// `ProductService`, `TokenCodec` and `Config` as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error));

    cfg
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Auth endpoints
        .route("/register", web::post().to(auth::register))
        .route("/login", web::post().to(auth::login))
        .service(
            web::resource("/profile")
                .wrap(AuthMiddleware)
                .route(web::get().to(auth::profile)),
        )
        // Products
        .route("/products", web::get().to(products::get_products))
        .service(
            // Reads are public, writes need a token; other methods get 405.
            web::resource("/product/{id}")
                .route(web::get().to(products::get_product))
                .route(web::put().to(products::update_product).wrap(AuthMiddleware))
                .route(web::delete().to(products::delete_product).wrap(AuthMiddleware)),
        )
        .service(
            web::resource("/add-product")
                .wrap(AuthMiddleware)
                .route(web::post().to(products::add_product)),
        )
        .service(
            web::resource("/search/{key}")
                .wrap(AuthMiddleware)
                .route(web::get().to(products::search_products)),
        )
        .service(
            web::resource("/user-products/{user_id}")
                .wrap(AuthMiddleware)
                .route(web::get().to(products::user_products)),
        );
}
