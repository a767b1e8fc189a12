use std::sync::Arc;

use serde_json::Value;

use crate::{
    database::UserStore,
    models::{IdentityClaim, UserView},
    utils::AppError,
};

/// User id carried by a verified claim.
///
/// This is the only place that knows about the legacy shapes: tokens from
/// the old login flow kept the user under `user`, the old registration flow
/// under `result`. Checked after the canonical `identity`, in that order.
pub fn claimed_user_id(claim: &IdentityClaim) -> Result<String, AppError> {
    if let Some(identity) = &claim.identity {
        if !identity.id.is_empty() {
            return Ok(identity.id.clone());
        }
    }

    [&claim.user, &claim.result]
        .into_iter()
        .flatten()
        .find_map(legacy_id)
        .ok_or(AppError::InvalidTokenPayload)
}

/// `_id` as a plain string or as extended JSON `{"$oid": "..."}`.
fn legacy_id(snapshot: &Value) -> Option<String> {
    let id = snapshot.get("_id")?;
    let id = match id {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("$oid")?.as_str()?,
        _ => return None,
    };

    (!id.is_empty()).then(|| id.to_string())
}

/// Answers "who is this" for an already verified claim.
pub struct IdentityResolver {
    users: Arc<dyn UserStore>,
}

impl IdentityResolver {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Current record for the claimed user, not the snapshot in the token.
    pub async fn resolve(&self, claim: &IdentityClaim) -> Result<UserView, AppError> {
        let user_id = claimed_user_id(claim)?;

        self.users
            .find_by_id(&user_id)
            .await?
            .map(UserView::from)
            .ok_or(AppError::UserNotFound)
    }
}
