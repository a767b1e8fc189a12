pub mod auth_service;
pub mod identity_service;
pub mod jwt;
pub mod password;
pub mod product_service;

pub use auth_service::Authenticator;
pub use identity_service::IdentityResolver;
pub use jwt::TokenCodec;
pub use password::{BcryptMatcher, CredentialMatcher};
pub use product_service::ProductService;
