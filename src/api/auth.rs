use actix_web::{web, HttpResponse};

use crate::config::Config;
use crate::models::{
    IdentityClaim, LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, RegisterResponse,
};
use crate::services::{Authenticator, IdentityResolver};
use crate::utils::AppError;

#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration successful", body = RegisterResponse),
        (status = 400, description = "Missing fields"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    auth: web::Data<Authenticator>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let email = request.email.as_deref().unwrap_or("N/A");
    log::info!("📝 POST /register - email: {}", email);

    match auth
        .register(request.name.as_deref(), request.email.as_deref(), request.password.as_deref())
        .await
    {
        Ok(session) => Ok(HttpResponse::Created().json(RegisterResponse {
            result: session.user,
            auth: session.token,
        })),
        Err(e) => {
            log::warn!("❌ Registration failed: {} - {}", email, e);
            Err(e)
        }
    }
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "No user found")
    )
)]
pub async fn login(
    auth: web::Data<Authenticator>,
    config: web::Data<Config>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let email = request.email.as_deref().unwrap_or("N/A");
    log::info!("🔐 POST /login - email: {}", email);

    match auth.login(request.email.as_deref(), request.password.as_deref()).await {
        Ok(session) => {
            log::info!("✅ Login successful: {}", email);
            Ok(HttpResponse::Ok().json(LoginResponse {
                user: session.user,
                auth: session.token,
            }))
        }
        Err(AppError::AuthenticationFailed) if config.legacy_login_failure => {
            log::warn!("❌ Login failed: {}", email);
            Ok(HttpResponse::Ok().json(serde_json::json!({ "result": "No user found" })))
        }
        Err(e) => {
            log::warn!("❌ Login failed: {} - {}", email, e);
            Err(e)
        }
    }
}

#[utoipa::path(
    get,
    path = "/profile",
    tag = "Auth",
    responses(
        (status = 200, description = "Current user", body = ProfileResponse),
        (status = 401, description = "Invalid or expired token"),
        (status = 403, description = "Token required"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn profile(
    resolver: web::Data<IdentityResolver>,
    claim: web::ReqData<IdentityClaim>,
) -> Result<HttpResponse, AppError> {
    log::info!("👤 GET /profile");

    let user = resolver.resolve(&claim).await.map_err(|e| {
        log::warn!("❌ Profile lookup failed: {}", e);
        e
    })?;

    Ok(HttpResponse::Ok().json(ProfileResponse { user }))
}
