//! View state of the password-recovery flow.

/// Progress of the anonymous recovery views.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecoveryPhase {
    #[default]
    Idle,
    Submitting,
    CodeSent,
    PasswordReset,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecoveryState {
    pub phase: RecoveryPhase,
    /// Local validation message shown next to the form.
    pub error: Option<String>,
}
