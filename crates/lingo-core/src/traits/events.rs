//! Session expiry notification.

/// Why the session was terminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpiryReason {
    /// No credential was stored; the request was short-circuited.
    MissingCredential,
    /// The backend rejected the credential with the given status (401/403).
    Rejected(u16),
    /// The request failed at the transport level before a response arrived.
    Transport,
}

/// Observer for session-ending events.
///
/// The gateway does not own navigation or any other UI concern: when a
/// session ends it clears the credential and notifies the registered
/// listener, and the owner of the process decides what "go to login"
/// means. Notifications are not deduplicated; every session-ending call
/// produces one.
pub trait ExpiryListener: Send + Sync {
    /// Called after the credential has been cleared.
    fn on_session_expired(&self, reason: ExpiryReason);
}

impl<F> ExpiryListener for F
where
    F: Fn(ExpiryReason) + Send + Sync,
{
    fn on_session_expired(&self, reason: ExpiryReason) {
        self(reason)
    }
}
