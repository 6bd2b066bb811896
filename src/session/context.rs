//! Per-call request context and header assembly.

// self
use crate::{_prelude::*, http::HeaderSet};

/// Media type the caller is willing to accept, with its preference weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptedType {
	/// MIME type, e.g. `application/json`.
	pub mime_type: String,
	/// Preference weight in `0.0..=1.0`.
	pub q_value: f32,
}

/// Cookie forwarded to the upstream endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
	/// Cookie name.
	pub key: String,
	/// Cookie value.
	pub val: String,
}

/// Caller-supplied context for one session call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestContext {
	/// Acceptable media types in preference order.
	pub accept: Vec<AcceptedType>,
	/// Cookies in the order they should be sent.
	pub cookies: Vec<Cookie>,
}
impl RequestContext {
	/// Appends an acceptable media type.
	pub fn with_accept(mut self, mime_type: impl Into<String>, q_value: f32) -> Self {
		self.accept.push(AcceptedType { mime_type: mime_type.into(), q_value });

		self
	}

	/// Appends a cookie.
	pub fn with_cookie(mut self, key: impl Into<String>, val: impl Into<String>) -> Self {
		self.cookies.push(Cookie { key: key.into(), val: val.into() });

		self
	}
}

/// Prepends `/` unless `path` already starts with one.
pub fn normalize_path(path: &str) -> String {
	if path.starts_with('/') { path.to_owned() } else { format!("/{path}") }
}

/// Builds the header set for one call on a private copy of `base`.
pub fn assemble_headers(
	base: &HeaderSet,
	content_type: Option<&str>,
	context: &RequestContext,
) -> HeaderSet {
	let mut headers = base.clone();

	if let Some(content_type) = content_type.filter(|content_type| !content_type.is_empty()) {
		headers.insert("content-type".into(), content_type.to_owned());
	}

	if context.accept.is_empty() {
		headers.entry("accept".into()).or_insert_with(|| "*/*".into());
	} else {
		let accept = context
			.accept
			.iter()
			.map(|accepted| format!("{}; {}", accepted.mime_type, accepted.q_value))
			.collect::<Vec<_>>()
			.join(", ");

		headers.insert("accept".into(), accept);
	}

	if !context.cookies.is_empty() {
		let cookies = context
			.cookies
			.iter()
			.map(|cookie| format!("{}={}", cookie.key, cookie.val))
			.collect::<Vec<_>>()
			.join(",");

		headers.insert("cookies".into(), cookies);
	}

	headers
}
