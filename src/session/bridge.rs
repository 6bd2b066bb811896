//! HTTP request bridge implementing [`ApiSession`] for one external endpoint.

// std
use std::time::Duration;
// self
use crate::{
	_prelude::*,
	descriptor::Endpoint,
	error::{TimeoutError, TransportError},
	http::{HeaderSet, HttpMethod, OutboundRequest, SessionHttpClient},
	obs::{self, RequestOutcome, RequestSpan},
	session::{
		ApiSession, PostContent, RequestContext, ResponseResult, SessionFuture,
		context::{assemble_headers, normalize_path},
	},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Fixed deadline applied to every exchange, measured from the start of the call.
pub const REQUEST_DEADLINE: Duration = Duration::from_millis(15_000);

#[cfg(feature = "reqwest")]
/// Bridge specialized for the crate's default reqwest transport.
pub type ReqwestBridge = HttpSessionBridge<ReqwestHttpClient>;

/// Translates session verbs into HTTP exchanges against one endpoint.
///
/// The bridge owns nothing mutable: its endpoint identity and base headers are fixed at
/// construction, and every call works on a private copy of the headers, so any number of
/// calls may be in flight on the same instance. Each call performs exactly one exchange and
/// never retries. Calls must run inside a Tokio runtime with the time driver enabled.
pub struct HttpSessionBridge<C>
where
	C: ?Sized + SessionHttpClient,
{
	endpoint: Endpoint,
	base_headers: HeaderSet,
	http_client: Arc<C>,
}
impl<C> HttpSessionBridge<C>
where
	C: ?Sized + SessionHttpClient,
{
	/// Creates a bridge for `endpoint` whose requests always start from `base_headers`.
	pub fn with_http_client(
		endpoint: Endpoint,
		base_headers: HeaderSet,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self { endpoint, base_headers, http_client: http_client.into() }
	}

	/// Connection identity fixed at construction.
	pub fn endpoint(&self) -> &Endpoint {
		&self.endpoint
	}

	/// Headers every request starts from.
	pub fn base_headers(&self) -> &HeaderSet {
		&self.base_headers
	}

	/// Performs one exchange and classifies its response.
	///
	/// `path` gains a leading `/` only when it lacks one. The exchange is aborted, and the
	/// call fails as overloaded, once [`REQUEST_DEADLINE`] elapses.
	pub async fn request(
		&self,
		method: HttpMethod,
		path: &str,
		context: &RequestContext,
		content: Option<PostContent>,
	) -> Result<ResponseResult> {
		let span = RequestSpan::new(method, "request");

		obs::record_request_outcome(method, RequestOutcome::Attempt);

		let result = span
			.instrument(async {
				let (body, content_type) = match content {
					Some(PostContent { content, mime_type }) => (Some(content), Some(mime_type)),
					None => (None, None),
				};
				let request = OutboundRequest {
					method,
					scheme: self.endpoint.scheme,
					host: self.endpoint.host.clone(),
					port: self.endpoint.port,
					path: normalize_path(path),
					headers: assemble_headers(&self.base_headers, content_type.as_deref(), context),
					body,
				};

				match tokio::time::timeout(REQUEST_DEADLINE, self.exchange(request)).await {
					Ok(result) => result,
					Err(_) => {
						span.record_timeout(path);

						Err(TimeoutError::Deadline { elapsed: REQUEST_DEADLINE }.into())
					},
				}
			})
			.await;

		obs::record_request_outcome(method, RequestOutcome::of(&result));

		result
	}

	async fn exchange(&self, request: OutboundRequest) -> Result<ResponseResult> {
		let response = self.http_client.send(request).await.map_err(TransportError::network)?;

		ResponseResult::from_inbound(response).await
	}
}
impl<C> ApiSession for HttpSessionBridge<C>
where
	C: ?Sized + SessionHttpClient,
{
	fn get<'a>(&'a self, path: &'a str, context: &'a RequestContext) -> SessionFuture<'a> {
		Box::pin(self.request(HttpMethod::Get, path, context, None))
	}

	fn post<'a>(
		&'a self,
		path: &'a str,
		content: PostContent,
		context: &'a RequestContext,
	) -> SessionFuture<'a> {
		Box::pin(self.request(HttpMethod::Post, path, context, Some(content)))
	}

	fn put<'a>(
		&'a self,
		path: &'a str,
		content: PostContent,
		context: &'a RequestContext,
	) -> SessionFuture<'a> {
		Box::pin(self.request(HttpMethod::Put, path, context, Some(content)))
	}

	fn delete<'a>(&'a self, path: &'a str, context: &'a RequestContext) -> SessionFuture<'a> {
		Box::pin(self.request(HttpMethod::Delete, path, context, None))
	}
}
impl<C> Clone for HttpSessionBridge<C>
where
	C: ?Sized + SessionHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			endpoint: self.endpoint.clone(),
			base_headers: self.base_headers.clone(),
			http_client: Arc::clone(&self.http_client),
		}
	}
}
impl<C> Debug for HttpSessionBridge<C>
where
	C: ?Sized + SessionHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("HttpSessionBridge")
			.field("endpoint", &self.endpoint)
			.field("authorization_set", &self.base_headers.contains_key("authorization"))
			.finish()
	}
}
