//! Anonymous password-recovery requests.

use serde::{Deserialize, Serialize};

/// Body for `POST /recover`: mail a recovery code to the user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryCodeRequest {
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    pub email: String,
}

/// Body for `POST /recover/reset`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordReset {
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    pub recoverycode: String,
    pub password: String,
}
