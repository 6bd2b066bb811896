//! API session protocol and the HTTP bridge implementing it.
//!
//! [`ApiSession`] is the verb-based surface untrusted code talks to. [`HttpSessionBridge`]
//! implements it for one external endpoint: every verb funnels into a single request
//! procedure that assembles per-call headers, performs one exchange under a fixed deadline,
//! and classifies the raw status into a [`ResponseResult`] through the static table in
//! [`status`].

pub mod bridge;
pub mod context;
pub mod response;
pub mod status;

pub use bridge::*;
pub use context::*;
pub use response::*;
pub use status::*;

// std
use std::convert::Infallible;
// self
use crate::{_prelude::*, error::UnimplementedError};

/// Future returned by [`ApiSession`] verbs.
pub type SessionFuture<'a> = Pin<Box<dyn Future<Output = Result<ResponseResult>> + 'a + Send>>;

/// Request payload carried by `post` and `put`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostContent {
	/// Raw payload bytes.
	pub content: Vec<u8>,
	/// MIME type sent as `content-type`.
	pub mime_type: String,
}
impl PostContent {
	/// Wraps a payload and its MIME type.
	pub fn new(content: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
		Self { content: content.into(), mime_type: mime_type.into() }
	}
}

/// Verb-based session contract exposed to sandboxed applications.
///
/// Each verb resolves exactly once, either with a [`ResponseResult`] or an error. Calls are
/// independent; implementations must not let one in-flight call observe another's state.
pub trait ApiSession
where
	Self: Send + Sync,
{
	/// Issues a `GET` for `path`.
	fn get<'a>(&'a self, path: &'a str, context: &'a RequestContext) -> SessionFuture<'a>;

	/// Issues a `POST` of `content` to `path`.
	fn post<'a>(
		&'a self,
		path: &'a str,
		content: PostContent,
		context: &'a RequestContext,
	) -> SessionFuture<'a>;

	/// Issues a `PUT` of `content` to `path`.
	fn put<'a>(
		&'a self,
		path: &'a str,
		content: PostContent,
		context: &'a RequestContext,
	) -> SessionFuture<'a>;

	/// Issues a `DELETE` for `path`.
	fn delete<'a>(&'a self, path: &'a str, context: &'a RequestContext) -> SessionFuture<'a>;

	/// Opens a streaming `POST` upload; unsupported unless overridden.
	fn post_streaming(
		&self,
		path: &str,
		mime_type: &str,
		context: &RequestContext,
	) -> Result<Infallible> {
		let _ = (path, mime_type, context);

		Err(UnimplementedError::Streaming { operation: "post" }.into())
	}

	/// Opens a streaming `PUT` upload; unsupported unless overridden.
	fn put_streaming(
		&self,
		path: &str,
		mime_type: &str,
		context: &RequestContext,
	) -> Result<Infallible> {
		let _ = (path, mime_type, context);

		Err(UnimplementedError::Streaming { operation: "put" }.into())
	}

	/// Upgrades `path` to a WebSocket; unsupported unless overridden.
	fn open_web_socket(
		&self,
		path: &str,
		context: &RequestContext,
		protocols: &[String],
	) -> Result<Infallible> {
		let _ = (path, context, protocols);

		Err(UnimplementedError::WebSocket.into())
	}
}
