use serde::{Deserialize, Serialize};

/// A stored account. `password_hash` never leaves the service; use
/// [`UserView`] for anything outbound.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,  // store-assigned, 24-char ObjectId hex
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Fields needed to create an account; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Sanitized user: what clients and token claims get to see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// `201` body of `POST /register`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    pub result: UserView,
    pub auth: String,
}

/// `200` body of `POST /login`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub user: UserView,
    pub auth: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    pub user: UserView,
}
