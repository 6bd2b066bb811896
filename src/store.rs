//! Storage contracts and the in-memory store for persisted capabilities.
//!
//! Stores map opaque handles to [`StoredCapability`] records. Handles are bearer secrets:
//! whoever holds one can restore the capability, so stores key records by the handle's
//! SHA-256 fingerprint and never keep the raw handle.

pub mod memory;

pub use memory::MemoryStore;

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::Rng;
use sha2::{Digest, Sha256};
// self
use crate::_prelude::*;

const HANDLE_BYTES: usize = 32;

/// Persistence future returned by [`CapabilityStore`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract implemented by capability stores.
pub trait CapabilityStore
where
	Self: Send + Sync,
{
	/// Persists `frontend_ref` under `template` and returns a fresh handle.
	fn save(
		&self,
		template: SaveTemplate,
		frontend_ref: serde_json::Value,
	) -> StoreFuture<'_, CapabilityHandle>;

	/// Loads the record a handle refers to.
	fn load<'a>(&'a self, handle: &'a CapabilityHandle) -> StoreFuture<'a, StoredCapability>;

	/// Revokes a handle; returns whether a record was removed.
	fn drop_handle<'a>(&'a self, handle: &'a CapabilityHandle) -> StoreFuture<'a, bool>;
}

/// Error type produced by [`CapabilityStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
	/// No record exists for the handle.
	#[error("No capability is stored under the provided handle.")]
	UnknownHandle,
}

/// Opaque platform data persisted next to a capability (owner, requirements, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaveTemplate(pub serde_json::Value);

/// Record kept by a store for one handle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCapability {
	/// Template supplied when the capability was saved.
	pub template: SaveTemplate,
	/// Single-field object naming the capability type and its persisted descriptor.
	pub frontend_ref: serde_json::Value,
	/// Instant the record was created.
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}

/// Bearer handle naming a stored capability.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityHandle(String);
impl CapabilityHandle {
	/// Generates a fresh handle from 32 random bytes, base64url encoded.
	pub fn generate() -> Self {
		let mut bytes = [0_u8; HANDLE_BYTES];

		rand::rng().fill(&mut bytes);

		Self(URL_SAFE_NO_PAD.encode(bytes))
	}

	/// Wraps a handle received from a caller.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the raw handle. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Base64 (no padding) SHA-256 digest used as the storage key.
	pub fn fingerprint(&self) -> String {
		let mut hasher = Sha256::new();

		hasher.update(self.0.as_bytes());

		URL_SAFE_NO_PAD.encode(hasher.finalize())
	}
}
impl Debug for CapabilityHandle {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("CapabilityHandle").field(&"<redacted>").finish()
	}
}
