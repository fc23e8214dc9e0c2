//! Anonymous password recovery: request a code by mail, then reset.

#[cfg(test)]
#[path = "recovery_test.rs"]
mod recovery_test;

use records::{PasswordReset, RecoveryCodeRequest};

use super::Services;
use crate::state::recovery::{RecoveryPhase, RecoveryState};
use crate::state::store::Store;

pub const MSG_CODE_SENT: &str = "The recovery code has been sent to your email address.";
pub const MSG_PASSWORD_RESET: &str = "Your password has been reset.";
pub const MSG_MISMATCH: &str = "The passwords do not match.";

/// Where a successful reset sends the user.
pub const LOGIN_URL: &str = "/";

#[derive(Clone)]
pub struct RecoveryController {
    services: Services,
    store: Store<RecoveryState>,
}

impl RecoveryController {
    #[must_use]
    pub fn new(services: Services, store: Store<RecoveryState>) -> Self {
        Self { services, store }
    }

    #[must_use]
    pub fn store(&self) -> &Store<RecoveryState> {
        &self.store
    }

    pub async fn request_code(&self, params: RecoveryCodeRequest) {
        self.begin();
        let sent = match self.services.api.request_recovery_code(&params).await {
            Ok(resp) => resp.value_is_true(),
            Err(_) => false,
        };
        if sent {
            self.services.inform(MSG_CODE_SENT);
        }
        self.finish(if sent { RecoveryPhase::CodeSent } else { RecoveryPhase::Idle });
    }

    /// Reset the password. `confirm` must repeat `params.password`.
    pub async fn reset(&self, params: PasswordReset, confirm: &str) {
        if params.password != confirm {
            let message = self.services.tr(MSG_MISMATCH);
            self.store.update(|s| s.error = Some(message));
            return;
        }
        self.begin();
        let done = match self.services.api.reset_password(&params).await {
            Ok(resp) => resp.value_is_true(),
            Err(_) => false,
        };
        if done {
            self.services.inform(MSG_PASSWORD_RESET);
            self.services.navigator.go(LOGIN_URL);
        }
        self.finish(if done { RecoveryPhase::PasswordReset } else { RecoveryPhase::Idle });
    }

    fn begin(&self) {
        self.store.update(|s| {
            s.phase = RecoveryPhase::Submitting;
            s.error = None;
        });
    }

    fn finish(&self, phase: RecoveryPhase) {
        self.store.update(|s| s.phase = phase);
    }
}
