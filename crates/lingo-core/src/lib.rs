//! lingo-core - Core types and traits for the lingo client SDK.
//!
//! This crate defines the data model shared by every lingo transport and
//! frontend: the validated API base URL, the persisted session credential,
//! request descriptors, classified responses, and the traits implemented
//! at the SDK's seams ([`CredentialStore`], [`ExpiryListener`]).

pub mod api_url;
pub mod credential;
pub mod error;
pub mod memory;
pub mod request;
pub mod response;
pub mod traits;

pub use api_url::ApiUrl;
pub use credential::{AuthToken, Credential};
pub use error::Error;
pub use memory::MemoryCredentialStore;
pub use request::{ApiRequest, FormPart, FormValue, Method, RequestBody};
pub use response::{ApiResponse, ResponseClass};
pub use traits::{CredentialStore, ExpiryListener, ExpiryReason};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
