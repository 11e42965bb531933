//! Traits implemented at the SDK's seams.

mod events;
mod store;

pub use events::{ExpiryListener, ExpiryReason};
pub use store::CredentialStore;
