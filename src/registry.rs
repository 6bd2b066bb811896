//! Frontend reference registry dispatching persisted capabilities to their handlers.
//!
//! Persisted capabilities are stored as single-field objects (`{"http": {...}}`); the field
//! names the handler able to validate, restore, and offer that kind of capability. The
//! registry is an explicit value built at the composition root, not a process-wide global.

// self
use crate::{
	_prelude::*,
	descriptor::{
		self, API_SESSION_TYPE_ID, AccountId, ApiSessionTag, EndpointDescriptor, PowerboxOption,
		ValidatedGrant,
	},
	error::{ConfigError, ValidationError},
	http::SessionHttpClient,
	restore::{self, PersistentSession},
	store::{CapabilityHandle, CapabilityStore, SaveTemplate},
};

/// Field under which HTTP endpoint descriptors are persisted.
pub const HTTP_FRONTEND_REF_FIELD: &str = "http";

/// Handler for one frontend reference field.
pub trait FrontendRefHandler
where
	Self: Send + Sync,
{
	/// Field name the handler owns.
	fn field(&self) -> &'static str;

	/// Interface identifier restored capabilities implement.
	fn type_id(&self) -> u64;

	/// Canonicalizes an untyped grant request.
	fn validate(&self, request: serde_json::Value) -> Result<ValidatedGrant>;

	/// Restores a persisted value into a live session.
	fn restore(
		&self,
		value: serde_json::Value,
		template: SaveTemplate,
	) -> Result<Arc<dyn PersistentSession>>;

	/// Lists powerbox options for `account`, given the requester's optional tag value.
	fn query(
		&self,
		account: &AccountId,
		tag: Option<serde_json::Value>,
	) -> Result<Vec<PowerboxOption>>;
}

/// Registry of frontend reference handlers keyed by field.
#[derive(Default)]
pub struct FrontendRefRegistry {
	handlers: RwLock<HashMap<&'static str, Arc<dyn FrontendRefHandler>>>,
}
impl FrontendRefRegistry {
	/// Registers `handler`; a second handler for the same field is rejected.
	pub fn register(&self, handler: impl 'static + FrontendRefHandler) -> Result<()> {
		let field = handler.field();
		let mut handlers = self.handlers.write();

		if handlers.contains_key(field) {
			return Err(ConfigError::DuplicateFrontendRef { field }.into());
		}

		handlers.insert(field, Arc::new(handler));

		Ok(())
	}

	/// Returns the registered fields in sorted order.
	pub fn fields(&self) -> Vec<&'static str> {
		let mut fields = self.handlers.read().keys().copied().collect::<Vec<_>>();

		fields.sort_unstable();

		fields
	}

	/// Interface identifier of sessions restored for `field`.
	pub fn type_id(&self, field: &str) -> Result<u64> {
		Ok(self.handler(field)?.type_id())
	}

	/// Validates a grant request for `field`.
	pub fn validate(&self, field: &str, request: serde_json::Value) -> Result<ValidatedGrant> {
		self.handler(field)?.validate(request)
	}

	/// Restores a persisted `value` for `field`.
	pub fn restore(
		&self,
		field: &str,
		value: serde_json::Value,
		template: SaveTemplate,
	) -> Result<Arc<dyn PersistentSession>> {
		self.handler(field)?.restore(value, template)
	}

	/// Lists options offered by the handler for `field`.
	pub fn query(
		&self,
		field: &str,
		account: &AccountId,
		tag: Option<serde_json::Value>,
	) -> Result<Vec<PowerboxOption>> {
		self.handler(field)?.query(account, tag)
	}

	/// Loads `handle` from `store` and restores the record it names.
	pub async fn restore_from_store(
		&self,
		store: &dyn CapabilityStore,
		handle: &CapabilityHandle,
	) -> Result<Arc<dyn PersistentSession>> {
		let record = store.load(handle).await?;
		let (field, value) = match record.frontend_ref {
			serde_json::Value::Object(map) if map.len() == 1 => map
				.into_iter()
				.next()
				.ok_or_else(|| malformed_frontend_ref("Expected exactly one field."))?,
			_ => return Err(malformed_frontend_ref("Expected exactly one field.").into()),
		};

		self.restore(&field, value, record.template)
	}

	fn handler(&self, field: &str) -> Result<Arc<dyn FrontendRefHandler>> {
		self.handlers
			.read()
			.get(field)
			.cloned()
			.ok_or_else(|| ConfigError::UnknownFrontendRef { field: field.to_owned() }.into())
	}
}
impl Debug for FrontendRefRegistry {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("FrontendRefRegistry").field("fields", &self.fields()).finish()
	}
}

/// Handler for HTTP endpoint descriptors.
pub struct HttpFrontendRef<C>
where
	C: ?Sized + SessionHttpClient,
{
	http_client: Arc<C>,
}
impl<C> HttpFrontendRef<C>
where
	C: ?Sized + SessionHttpClient,
{
	/// Creates a handler whose restored sessions share `http_client`.
	pub fn new(http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into() }
	}
}
impl<C> FrontendRefHandler for HttpFrontendRef<C>
where
	C: ?Sized + SessionHttpClient,
{
	fn field(&self) -> &'static str {
		HTTP_FRONTEND_REF_FIELD
	}

	fn type_id(&self) -> u64 {
		API_SESSION_TYPE_ID
	}

	fn validate(&self, request: serde_json::Value) -> Result<ValidatedGrant> {
		Ok(descriptor::validate_value(request)?)
	}

	fn restore(
		&self,
		value: serde_json::Value,
		template: SaveTemplate,
	) -> Result<Arc<dyn PersistentSession>> {
		let descriptor: EndpointDescriptor = decode(value)?;
		let session = restore::restore::<C>(descriptor, template, Arc::clone(&self.http_client))?;

		Ok(Arc::new(session))
	}

	fn query(
		&self,
		account: &AccountId,
		tag: Option<serde_json::Value>,
	) -> Result<Vec<PowerboxOption>> {
		let tag = tag.map(decode::<ApiSessionTag>).transpose()?;

		Ok(descriptor::offer_options(account, tag.as_ref()))
	}
}
impl<C> Debug for HttpFrontendRef<C>
where
	C: ?Sized + SessionHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("HttpFrontendRef").field("field", &HTTP_FRONTEND_REF_FIELD).finish()
	}
}

fn decode<T>(value: serde_json::Value) -> Result<T, ValidationError>
where
	T: for<'de> Deserialize<'de>,
{
	serde_path_to_error::deserialize(value).map_err(|e| ValidationError::MalformedRequest {
		path: e.path().to_string(),
		message: e.inner().to_string(),
	})
}

fn malformed_frontend_ref(message: &str) -> ValidationError {
	ValidationError::MalformedRequest { path: "frontendRef".into(), message: message.into() }
}
