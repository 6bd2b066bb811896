//! UI-view capability that opens API sessions against a fixed URL.

// self
use crate::{
	_prelude::*,
	auth::Secret,
	descriptor::{API_SESSION_TYPE_ID, Endpoint},
	error::ValidationError,
	http::{HeaderSet, SessionHttpClient},
	session::HttpSessionBridge,
};

/// External UI view bound to one URL and an optional bearer token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalUiView {
	url: String,
	token: Option<Secret>,
}
impl ExternalUiView {
	/// Creates a view for `url`; sessions carry `token` as a bearer credential when present.
	pub fn new(url: impl Into<String>, token: Option<Secret>) -> Self {
		Self { url: url.into(), token }
	}

	/// URL the view opens sessions against.
	pub fn url(&self) -> &str {
		&self.url
	}

	/// Opens a session of interface `session_type`; only API sessions are supported.
	pub fn new_session<C>(
		&self,
		session_type: u64,
		http_client: impl Into<Arc<C>>,
	) -> Result<HttpSessionBridge<C>>
	where
		C: ?Sized + SessionHttpClient,
	{
		if session_type != API_SESSION_TYPE_ID {
			return Err(ValidationError::UnsupportedSessionType { type_id: session_type }.into());
		}

		let endpoint = Endpoint::parse(&self.url)?;
		let mut base_headers = HeaderSet::new();

		if let Some(token) = &self.token {
			base_headers.insert("authorization".into(), format!("Bearer {}", token.expose()));
		}

		Ok(HttpSessionBridge::with_http_client(endpoint, base_headers, http_client))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::RecordingHttpClient,
		session::{ApiSession, RequestContext},
	};

	#[test]
	fn only_api_sessions_can_be_opened() {
		let view = ExternalUiView::new("https://example.com/", None);
		let err = view
			.new_session::<RecordingHttpClient>(42, RecordingHttpClient::status(204, &[], b""))
			.expect_err("Web sessions are not supported.");

		assert!(matches!(
			err,
			Error::Validation(ValidationError::UnsupportedSessionType { type_id: 42 })
		));
	}

	#[tokio::test]
	async fn tokens_become_bearer_headers() {
		let client = RecordingHttpClient::status(204, &[], b"");
		let view = ExternalUiView::new("https://example.com/app", Some(Secret::new("tok")));
		let session = view
			.new_session::<RecordingHttpClient>(API_SESSION_TYPE_ID, client.clone())
			.expect("API sessions should open.");

		session.get("status", &RequestContext::default()).await.expect("GET should succeed.");

		let recorded = client.recorded();

		assert_eq!(recorded[0].url(), "https://example.com/status");
		assert_eq!(recorded[0].header("authorization"), Some("Bearer tok"));
	}

	#[test]
	fn anonymous_views_send_no_authorization() {
		let session = ExternalUiView::new("http://example.com", None)
			.new_session::<RecordingHttpClient>(
				API_SESSION_TYPE_ID,
				RecordingHttpClient::status(204, &[], b""),
			)
			.expect("API sessions should open.");

		assert!(session.base_headers().is_empty());
	}
}
