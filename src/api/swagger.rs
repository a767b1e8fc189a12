use utoipa::OpenApi;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog Service API",
        version = "1.0.0",
        description = "Account registration/login and a product catalog.\n\n**Authentication:** protected endpoints require `Authorization: Bearer <token>`. Tokens are returned by `/register` and `/login` and expire after 2 hours."
    ),
    paths(
        // Auth endpoints
        crate::api::auth::register,
        crate::api::auth::login,
        crate::api::auth::profile,

        // Products
        crate::api::products::add_product,
        crate::api::products::get_products,
        crate::api::products::get_product,
        crate::api::products::update_product,
        crate::api::products::delete_product,
        crate::api::products::search_products,
        crate::api::products::user_products,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::models::RegisterRequest,
            crate::models::LoginRequest,
            crate::models::RegisterResponse,
            crate::models::LoginResponse,
            crate::models::ProfileResponse,
            crate::models::UserView,
            crate::models::Product,
            crate::models::CreateProductRequest,
            crate::models::ProductChanges,
            crate::models::UpdateOutcome,
            crate::models::DeleteOutcome,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Registration, login and the current user's profile."),
        (name = "Products", description = "Product catalog. Reads of single products and the full list are public; everything else requires a bearer token."),
        (name = "Health", description = "Liveness check."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from /register or /login"))
                        .build()
                ),
            );
        }
    }
}
