use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::{models::IdentityClaim, services::TokenCodec, utils::AppError};

/// Bearer-token gate for protected routes.
///
/// Verifies the `Authorization: Bearer <token>` header with the app's
/// [`TokenCodec`] before the wrapped service runs. On success the decoded
/// [`IdentityClaim`] is put in the request extensions, so handlers take it
/// as `web::ReqData<IdentityClaim>`.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

/// Token part of a `Bearer` authorization header.
fn bearer_token(req: &ServiceRequest) -> Result<String, AppError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AppError::MissingToken)?
        .to_str()
        .map_err(|_| AppError::MissingToken)?;

    header
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(AppError::MissingToken)
}

fn authenticate(req: &ServiceRequest) -> Result<IdentityClaim, AppError> {
    let token = bearer_token(req)?;

    let codec = req
        .app_data::<web::Data<TokenCodec>>()
        .ok_or(AppError::Misconfigured("TokenCodec not registered as app data"))?;

    codec.verify(&token)
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(&req) {
            Ok(claim) => {
                req.extensions_mut().insert(claim);

                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(e) => {
                log::warn!("🔒 {} {} rejected: {}", req.method(), req.path(), e);
                let res = req.error_response(e).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserView;
    use actix_web::{http::StatusCode, test, App, HttpResponse};
    use chrono::Duration;

    const SECRET: &str = "test-secret";

    async fn whoami(claim: web::ReqData<IdentityClaim>) -> HttpResponse {
        let email = claim.identity.as_ref().map(|u| u.email.clone()).unwrap_or_default();
        HttpResponse::Ok().body(email)
    }

    fn ann_token() -> String {
        TokenCodec::new(SECRET)
            .issue(IdentityClaim::for_user(UserView {
                id: "65f0c0ffee0000000000abcd".into(),
                name: "Ann".into(),
                email: "ann@x.com".into(),
            }))
            .unwrap()
    }

    macro_rules! guarded_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(TokenCodec::new(SECRET)))
                    .service(
                        web::resource("/protected")
                            .wrap(AuthMiddleware)
                            .route(web::get().to(whoami)),
                    ),
            )
            .await
        };
    }

    async fn error_of(res: ServiceResponse) -> String {
        let body: serde_json::Value = test::read_body_json(res).await;
        body["error"].as_str().unwrap_or_default().to_string()
    }

    #[actix_web::test]
    async fn test_valid_token_is_admitted_with_claim() {
        let app = guarded_app!();

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((AUTHORIZATION, format!("Bearer {}", ann_token())))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "ann@x.com");
    }

    #[actix_web::test]
    async fn test_missing_header() {
        let app = guarded_app!();

        let req = test::TestRequest::get().uri("/protected").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_of(res).await, "Token required");
    }

    #[actix_web::test]
    async fn test_wrong_scheme_counts_as_missing() {
        let app = guarded_app!();

        for value in [ann_token(), format!("Basic {}", ann_token()), "Bearer ".to_string()] {
            let req = test::TestRequest::get()
                .uri("/protected")
                .insert_header((AUTHORIZATION, value))
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::FORBIDDEN);
        }
    }

    #[actix_web::test]
    async fn test_invalid_token() {
        let app = guarded_app!();
        let token = ann_token();

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((AUTHORIZATION, format!("Bearer {}", &token[..token.len() - 1])))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_of(res).await, "Invalid Token");
    }

    #[actix_web::test]
    async fn test_missing_codec_is_a_server_error() {
        let app = test::init_service(
            App::new().service(
                web::resource("/protected")
                    .wrap(AuthMiddleware)
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((AUTHORIZATION, format!("Bearer {}", ann_token())))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_of(res).await, "Internal Server Error");
    }

    #[actix_web::test]
    async fn test_expired_token() {
        let app = guarded_app!();

        // Sign a token whose exp is already in the past.
        let exp = (chrono::Utc::now() - Duration::hours(1)).timestamp();
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &serde_json::json!({ "user": { "_id": "abc" }, "iat": exp - 7200, "exp": exp }),
            &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_of(res).await, "Token expired");
    }
}
