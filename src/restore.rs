//! Persistent capability restorer.
//!
//! Turns a persisted [`EndpointDescriptor`] back into a live [`ExternalSession`], injecting the
//! credential-specific `authorization` header. Restored sessions remember their descriptor and
//! save template so they can be persisted again without change.

// self
use crate::{
	_prelude::*,
	descriptor::EndpointDescriptor,
	http::{HeaderSet, SessionHttpClient},
	obs,
	registry::HTTP_FRONTEND_REF_FIELD,
	session::{ApiSession, HttpSessionBridge, PostContent, RequestContext, SessionFuture},
	store::{CapabilityHandle, CapabilityStore, SaveTemplate, StoreError},
};

/// Future returned by [`PersistentSession::save`].
pub type SaveFuture<'a> = Pin<Box<dyn Future<Output = Result<CapabilityHandle>> + 'a + Send>>;

/// Session capability that can be persisted again after being restored.
pub trait PersistentSession
where
	Self: ApiSession,
{
	/// Persisted form: a single-field object naming the handler and its descriptor.
	fn frontend_ref(&self) -> Result<serde_json::Value, StoreError>;

	/// Persists the session under its save template and returns a fresh handle.
	fn save<'a>(&'a self, store: &'a dyn CapabilityStore) -> SaveFuture<'a>;
}

/// Restores `descriptor` into a live session talking through `http_client`.
///
/// Refresh credentials fail as unimplemented before any URL parsing happens.
pub fn restore<C>(
	descriptor: EndpointDescriptor,
	template: SaveTemplate,
	http_client: impl Into<Arc<C>>,
) -> Result<ExternalSession<C>>
where
	C: ?Sized + SessionHttpClient,
{
	let authorization = descriptor.credential.authorization_header()?;
	let endpoint = descriptor.endpoint()?;
	let mut base_headers = HeaderSet::new();

	if let Some(value) = authorization {
		base_headers.insert("authorization".into(), value);
	}

	obs::record_restore(descriptor.credential.as_str());

	let bridge = HttpSessionBridge::with_http_client(endpoint, base_headers, http_client);

	Ok(ExternalSession { bridge, descriptor, template })
}

/// Live, persistable capability for one authorized endpoint.
pub struct ExternalSession<C>
where
	C: ?Sized + SessionHttpClient,
{
	bridge: HttpSessionBridge<C>,
	descriptor: EndpointDescriptor,
	template: SaveTemplate,
}
impl<C> ExternalSession<C>
where
	C: ?Sized + SessionHttpClient,
{
	/// Descriptor the session was restored from.
	pub fn descriptor(&self) -> &EndpointDescriptor {
		&self.descriptor
	}

	/// Save template supplied at restore time.
	pub fn template(&self) -> &SaveTemplate {
		&self.template
	}

	/// Underlying request bridge.
	pub fn bridge(&self) -> &HttpSessionBridge<C> {
		&self.bridge
	}
}
impl<C> ApiSession for ExternalSession<C>
where
	C: ?Sized + SessionHttpClient,
{
	fn get<'a>(&'a self, path: &'a str, context: &'a RequestContext) -> SessionFuture<'a> {
		self.bridge.get(path, context)
	}

	fn post<'a>(
		&'a self,
		path: &'a str,
		content: PostContent,
		context: &'a RequestContext,
	) -> SessionFuture<'a> {
		self.bridge.post(path, content, context)
	}

	fn put<'a>(
		&'a self,
		path: &'a str,
		content: PostContent,
		context: &'a RequestContext,
	) -> SessionFuture<'a> {
		self.bridge.put(path, content, context)
	}

	fn delete<'a>(&'a self, path: &'a str, context: &'a RequestContext) -> SessionFuture<'a> {
		self.bridge.delete(path, context)
	}
}
impl<C> PersistentSession for ExternalSession<C>
where
	C: ?Sized + SessionHttpClient,
{
	fn frontend_ref(&self) -> Result<serde_json::Value, StoreError> {
		let descriptor = serde_json::to_value(&self.descriptor)
			.map_err(|e| StoreError::Serialization { message: e.to_string() })?;

		Ok(serde_json::Value::Object(serde_json::Map::from_iter([(
			HTTP_FRONTEND_REF_FIELD.to_owned(),
			descriptor,
		)])))
	}

	fn save<'a>(&'a self, store: &'a dyn CapabilityStore) -> SaveFuture<'a> {
		Box::pin(async move {
			let frontend_ref = self.frontend_ref()?;
			let handle = store.save(self.template.clone(), frontend_ref).await?;

			Ok::<_, Error>(handle)
		})
	}
}
impl<C> Debug for ExternalSession<C>
where
	C: ?Sized + SessionHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ExternalSession")
			.field("bridge", &self.bridge)
			.field("descriptor", &self.descriptor)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::RecordingHttpClient,
		auth::{Credential, Secret},
		error::{ErrorKind, UnimplementedError, ValidationError},
		store::MemoryStore,
	};

	fn restore_with(credential: Credential) -> Result<ExternalSession<RecordingHttpClient>> {
		let descriptor = EndpointDescriptor::new("https://api.example.com/v1", credential);

		restore(descriptor, SaveTemplate::default(), RecordingHttpClient::status(204, &[], b""))
	}

	fn authorization(session: &ExternalSession<RecordingHttpClient>) -> Option<&str> {
		session.bridge().base_headers().get("authorization").map(String::as_str)
	}

	#[test]
	fn credentials_become_authorization_headers() {
		let bearer = restore_with(Credential::bearer("abc")).expect("Bearer should restore.");
		let basic = restore_with(Credential::basic("u", "p")).expect("Basic should restore.");
		let none = restore_with(Credential::None).expect("Anonymous should restore.");

		assert_eq!(authorization(&bearer), Some("Bearer abc"));
		assert_eq!(authorization(&basic), Some("Basic dTpw"));
		assert_eq!(authorization(&none), None);
		assert!(none.bridge().base_headers().is_empty());
		assert_eq!(bearer.bridge().endpoint().host, "api.example.com");
	}

	#[test]
	fn refresh_credentials_are_unimplemented() {
		let err = restore_with(Credential::Refresh(Secret::new("r")))
			.expect_err("Refresh credentials cannot be restored.");

		assert!(matches!(err, Error::Unimplemented(UnimplementedError::RefreshCredential)));
		assert_eq!(err.kind(), ErrorKind::Unimplemented);
		assert_eq!(err.to_string(), "Refresh credentials unimplemented.");
	}

	#[test]
	fn unparsable_urls_fail_validation() {
		let err = restore::<RecordingHttpClient>(
			EndpointDescriptor::new("ftp://example.com/", Credential::None),
			SaveTemplate::default(),
			RecordingHttpClient::status(204, &[], b""),
		)
		.expect_err("Foreign schemes cannot be restored.");

		assert!(matches!(err, Error::Validation(ValidationError::UnsupportedScheme { .. })));
	}

	#[tokio::test]
	async fn restored_sessions_save_the_same_descriptor() {
		let store = MemoryStore::default();
		let template = SaveTemplate(serde_json::json!({ "owner": "grain-1" }));
		let session = restore::<RecordingHttpClient>(
			EndpointDescriptor::new("https://example.com/", Credential::bearer("abc")),
			template.clone(),
			RecordingHttpClient::status(204, &[], b""),
		)
		.expect("Bearer should restore.");
		let handle = session.save(&store).await.expect("Save should succeed.");
		let record = store.load(&handle).await.expect("Saved handle should load.");

		assert_eq!(record.template, template);
		assert_eq!(
			record.frontend_ref,
			serde_json::json!({
				"http": { "url": "https://example.com/", "credential": { "bearer": "abc" } }
			})
		);

		let descriptor: EndpointDescriptor =
			serde_json::from_value(record.frontend_ref["http"].clone())
				.expect("Persisted descriptor should decode.");
		let again = restore::<RecordingHttpClient>(
			descriptor,
			record.template,
			RecordingHttpClient::status(204, &[], b""),
		)
		.expect("Persisted descriptor should restore again.");

		assert_eq!(again.descriptor(), session.descriptor());
		assert_eq!(again.bridge().base_headers(), session.bridge().base_headers());
	}
}
