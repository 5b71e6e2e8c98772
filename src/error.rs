use thiserror::Error;

/// User-facing failures surfaced by the session and meeting stores. Each
/// store operation records the message on its own state and re-raises the
/// error so callers can react to the rejection directly.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("An account with this email already exists")]
    DuplicateAccount,

    #[error("No account found with this email address")]
    UnknownAccount,

    #[error("Profile update failed")]
    ProfileUpdateFailed,

    #[error("Meeting not found. Please check the ID and try again.")]
    MeetingNotFound,

    #[error("session storage failed: {0}")]
    Storage(#[from] anyhow::Error),
}

impl SessionError {
    /// True when the failure leaves the session in a stable state that the
    /// user can recover from by re-submitting.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}
