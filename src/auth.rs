//! Credential models attached to authorized endpoints.

pub mod credential;
pub mod secret;

pub use credential::*;
pub use secret::*;
