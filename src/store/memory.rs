//! Thread-safe in-memory [`CapabilityStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	store::{
		CapabilityHandle, CapabilityStore, SaveTemplate, StoreError, StoreFuture, StoredCapability,
	},
};

type StoreMap = Arc<RwLock<HashMap<String, StoredCapability>>>;

/// Thread-safe storage backend that keeps records in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Number of live records.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns true when no records are stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	fn save_now(
		map: StoreMap,
		template: SaveTemplate,
		frontend_ref: serde_json::Value,
	) -> CapabilityHandle {
		let handle = CapabilityHandle::generate();
		let record =
			StoredCapability { template, frontend_ref, created_at: OffsetDateTime::now_utc() };

		map.write().insert(handle.fingerprint(), record);

		handle
	}

	fn load_now(map: StoreMap, fingerprint: String) -> Result<StoredCapability, StoreError> {
		map.read().get(&fingerprint).cloned().ok_or(StoreError::UnknownHandle)
	}
}
impl CapabilityStore for MemoryStore {
	fn save(
		&self,
		template: SaveTemplate,
		frontend_ref: serde_json::Value,
	) -> StoreFuture<'_, CapabilityHandle> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::save_now(map, template, frontend_ref)) })
	}

	fn load<'a>(&'a self, handle: &'a CapabilityHandle) -> StoreFuture<'a, StoredCapability> {
		let map = self.0.clone();
		let fingerprint = handle.fingerprint();

		Box::pin(async move { Self::load_now(map, fingerprint) })
	}

	fn drop_handle<'a>(&'a self, handle: &'a CapabilityHandle) -> StoreFuture<'a, bool> {
		let map = self.0.clone();
		let fingerprint = handle.fingerprint();

		Box::pin(async move { Ok(map.write().remove(&fingerprint).is_some()) })
	}
}
