use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::UserView;

/// Identity embedded in a token.
///
/// Tokens issued by this service only ever carry `identity`. `user` and
/// `result` are the shapes older login and registration flows used; they are
/// kept as raw JSON so such tokens still decode, and only the identity
/// resolver looks inside them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IdentityClaim {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<UserView>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

impl IdentityClaim {
    pub fn for_user(view: UserView) -> Self {
        Self {
            identity: Some(view),
            ..Default::default()
        }
    }
}
