use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::Collection;
use serde::{Deserialize, Serialize};

use super::{MongoDB, USERS};
use crate::models::{NewUser, User};
use crate::utils::AppError;

const DUPLICATE_KEY: i32 = 11000;

/// Credential store consumed by the authenticator and identity resolver.
///
/// `insert` must reject a second record with the same email atomically and
/// report it as [`AppError::DuplicateEmail`].
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Unknown or malformed ids are `Ok(None)`.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    async fn insert(&self, user: NewUser) -> Result<User, AppError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    email: String,
    password: String,  // bcrypt hash
}

impl UserDocument {
    fn into_user(self) -> Option<User> {
        Some(User {
            id: self.id?.to_hex(),
            name: self.name,
            email: self.email,
            password_hash: self.password,
        })
    }
}

pub struct MongoUserStore {
    collection: Collection<UserDocument>,
}

impl MongoUserStore {
    pub fn new(db: &MongoDB) -> Self {
        Self {
            collection: db.collection::<UserDocument>(USERS),
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) if write_error.code == DUPLICATE_KEY
    )
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let found = self.collection.find_one(doc! { "email": email }).await?;
        Ok(found.and_then(UserDocument::into_user))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let found = self.collection.find_one(doc! { "_id": object_id }).await?;
        Ok(found.and_then(UserDocument::into_user))
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let object_id = ObjectId::new();
        let document = UserDocument {
            id: Some(object_id),
            name: user.name,
            email: user.email,
            password: user.password_hash,
        };

        match self.collection.insert_one(&document).await {
            Ok(_) => {}
            Err(e) if is_duplicate_key(&e) => return Err(AppError::DuplicateEmail),
            Err(e) => return Err(e.into()),
        }

        Ok(User {
            id: object_id.to_hex(),
            name: document.name,
            email: document.email,
            password_hash: document.password,
        })
    }
}
