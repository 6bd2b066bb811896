//! Transport primitives for session bridge exchanges.
//!
//! The module exposes [`SessionHttpClient`] alongside [`OutboundRequest`] and
//! [`InboundResponse`] so downstream crates can plug in custom HTTP stacks without
//! losing the bridge's classification and deadline handling. Implementations perform
//! exactly one exchange per [`SessionHttpClient::send`] call and hand back the response
//! head immediately; the body is only pulled when [`InboundResponse::read_body`] is
//! awaited, so error responses never have their payload read.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::{Method, header::HeaderMap, redirect::Policy};
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Header map keyed by lower-cased header name.
pub type HeaderSet = BTreeMap<String, String>;

/// Lazily evaluated response body.
pub type BodyFuture<E> = Pin<Box<dyn Future<Output = Result<Vec<u8>, E>> + Send>>;

/// Future returned by [`SessionHttpClient::send`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<InboundResponse<E>, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing a single session exchange.
///
/// The trait is the bridge's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so a single transport can back many bridges, and the futures
/// they return must be `Send` so callers can spawn bridge calls onto any executor.
///
/// # Cancellation Contract
///
/// Dropping the future returned by [`send`](SessionHttpClient::send), or the body future
/// inside the [`InboundResponse`], must tear down the underlying connection. The bridge
/// relies on this to abort exchanges that overrun their deadline.
pub trait SessionHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Issues `request` and resolves once the response head has arrived.
	fn send(&self, request: OutboundRequest) -> TransportFuture<'_, Self::TransportError>;
}

/// HTTP verbs supported by the session protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
	/// `PUT`.
	Put,
	/// `DELETE`.
	Delete,
}
impl HttpMethod {
	/// Returns the wire name of the method.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Put => "PUT",
			HttpMethod::Delete => "DELETE",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// URL schemes a bridge may talk to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scheme {
	/// Plain-text HTTP.
	Http,
	/// HTTP over TLS.
	Https,
}
impl Scheme {
	/// Parses a scheme name, accepting only `http` and `https`.
	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"http" => Some(Scheme::Http),
			"https" => Some(Scheme::Https),
			_ => None,
		}
	}

	/// Returns the scheme name without the trailing colon.
	pub const fn as_str(self) -> &'static str {
		match self {
			Scheme::Http => "http",
			Scheme::Https => "https",
		}
	}
}
impl Display for Scheme {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fully assembled request handed to a [`SessionHttpClient`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundRequest {
	/// Request method.
	pub method: HttpMethod,
	/// Transport selector.
	pub scheme: Scheme,
	/// Host name or bracketed IPv6 literal.
	pub host: String,
	/// Explicit port, if the endpoint URL carried one.
	pub port: Option<u16>,
	/// Absolute path (always starts with `/`), including any query string.
	pub path: String,
	/// Request headers, already private to this exchange.
	pub headers: HeaderSet,
	/// Optional request payload.
	pub body: Option<Vec<u8>>,
}
impl OutboundRequest {
	/// Renders the absolute URL this request targets.
	pub fn url(&self) -> String {
		match self.port {
			Some(port) => format!("{}://{}:{port}{}", self.scheme, self.host, self.path),
			None => format!("{}://{}{}", self.scheme, self.host, self.path),
		}
	}

	/// Returns a header value by lower-cased name.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).map(String::as_str)
	}
}

/// Response head plus a lazily consumed body.
pub struct InboundResponse<E> {
	/// Numeric HTTP status code.
	pub status: u16,
	/// Response headers keyed by lower-cased name.
	pub headers: HeaderSet,
	body: BodyFuture<E>,
}
impl<E> InboundResponse<E> {
	/// Wraps a response head and its pending body.
	pub fn new(status: u16, headers: HeaderSet, body: BodyFuture<E>) -> Self {
		Self { status, headers, body }
	}

	/// Returns a header value by lower-cased name.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).map(String::as_str)
	}

	/// Drains the body, concatenating chunks in arrival order.
	pub async fn read_body(self) -> Result<Vec<u8>, E> {
		self.body.await
	}
}
impl<E> Debug for InboundResponse<E> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("InboundResponse")
			.field("status", &self.status)
			.field("headers", &self.headers)
			.finish_non_exhaustive()
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Session exchanges must never follow redirects: 3xx responses are part of the session
/// protocol and are surfaced to the caller as redirect results. Configure any custom
/// [`ReqwestClient`] passed to [`ReqwestHttpClient::with_client`] the same way.
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client that never follows redirects and keeps no idle connections.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.redirect(Policy::none())
			.pool_max_idle_per_host(0)
			.build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Debug for ReqwestHttpClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ReqwestHttpClient(..)")
	}
}
#[cfg(feature = "reqwest")]
impl SessionHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn send(&self, request: OutboundRequest) -> TransportFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let method = match request.method {
				HttpMethod::Get => Method::GET,
				HttpMethod::Post => Method::POST,
				HttpMethod::Put => Method::PUT,
				HttpMethod::Delete => Method::DELETE,
			};
			let mut builder = client.request(method, request.url());

			for (name, value) in &request.headers {
				builder = builder.header(name.as_str(), value.as_str());
			}
			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let mut response = builder.send().await?;
			let status = response.status().as_u16();
			let headers = collect_headers(response.headers());
			let body: BodyFuture<ReqwestError> = Box::pin(async move {
				let mut bytes = Vec::new();

				while let Some(chunk) = response.chunk().await? {
					bytes.extend_from_slice(&chunk);
				}

				Ok(bytes)
			});

			Ok(InboundResponse::new(status, headers, body))
		})
	}
}

#[cfg(feature = "reqwest")]
fn collect_headers(headers: &HeaderMap) -> HeaderSet {
	let mut set = HeaderSet::new();

	for (name, value) in headers {
		set.entry(name.as_str().to_owned())
			.or_insert_with(|| String::from_utf8_lossy(value.as_bytes()).into_owned());
	}

	set
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn request(port: Option<u16>) -> OutboundRequest {
		OutboundRequest {
			method: HttpMethod::Get,
			scheme: Scheme::Https,
			host: "api.example.com".into(),
			port,
			path: "/v1/items?limit=2".into(),
			headers: HeaderSet::new(),
			body: None,
		}
	}

	#[test]
	fn outbound_url_includes_explicit_port_only() {
		assert_eq!(request(None).url(), "https://api.example.com/v1/items?limit=2");
		assert_eq!(request(Some(8443)).url(), "https://api.example.com:8443/v1/items?limit=2");
	}

	#[test]
	fn scheme_parse_is_exact() {
		assert_eq!(Scheme::parse("http"), Some(Scheme::Http));
		assert_eq!(Scheme::parse("https"), Some(Scheme::Https));
		assert_eq!(Scheme::parse("ftp"), None);
		assert_eq!(Scheme::parse("HTTPS"), None);
	}

	#[tokio::test]
	async fn read_body_resolves_lazily() {
		let body: BodyFuture<std::io::Error> = Box::pin(async { Ok(b"payload".to_vec()) });
		let response = InboundResponse::new(200, HeaderSet::new(), body);

		assert_eq!(response.status, 200);
		assert_eq!(response.read_body().await.expect("Body should resolve."), b"payload");
	}
}
