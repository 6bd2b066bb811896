//! Static classification of HTTP status codes into session response kinds.
//!
//! The table is deliberately closed: statuses without an entry (206, 300, 304, 401, 429, ...)
//! have no session representation and make the call fail instead of being guessed into a
//! neighbouring kind.

// self
use crate::_prelude::*;

/// Success aliases reported for content responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SuccessCode {
	/// `200 OK`.
	Ok,
	/// `201 Created`.
	Created,
	/// `202 Accepted`.
	Accepted,
}
impl SuccessCode {
	/// Returns the protocol alias.
	pub const fn as_str(self) -> &'static str {
		match self {
			SuccessCode::Ok => "ok",
			SuccessCode::Created => "created",
			SuccessCode::Accepted => "accepted",
		}
	}
}
impl Display for SuccessCode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Client error codes the session protocol can express.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientErrorCode {
	/// `400`.
	BadRequest,
	/// `403`.
	Forbidden,
	/// `404`.
	NotFound,
	/// `405`.
	MethodNotAllowed,
	/// `406`.
	NotAcceptable,
	/// `409`.
	Conflict,
	/// `410`.
	Gone,
	/// `413`.
	RequestEntityTooLarge,
	/// `414`.
	RequestUriTooLong,
	/// `415`.
	UnsupportedMediaType,
	/// `418`.
	ImATeapot,
}
impl ClientErrorCode {
	/// Returns the protocol alias.
	pub const fn as_str(self) -> &'static str {
		match self {
			ClientErrorCode::BadRequest => "badRequest",
			ClientErrorCode::Forbidden => "forbidden",
			ClientErrorCode::NotFound => "notFound",
			ClientErrorCode::MethodNotAllowed => "methodNotAllowed",
			ClientErrorCode::NotAcceptable => "notAcceptable",
			ClientErrorCode::Conflict => "conflict",
			ClientErrorCode::Gone => "gone",
			ClientErrorCode::RequestEntityTooLarge => "requestEntityTooLarge",
			ClientErrorCode::RequestUriTooLong => "requestUriTooLong",
			ClientErrorCode::UnsupportedMediaType => "unsupportedMediaType",
			ClientErrorCode::ImATeapot => "imATeapot",
		}
	}

	/// Returns the fixed HTML description shown to users.
	pub const fn description_html(self) -> &'static str {
		match self {
			ClientErrorCode::BadRequest => "Bad Request",
			ClientErrorCode::Forbidden => "Forbidden",
			ClientErrorCode::NotFound => "Not Found",
			ClientErrorCode::MethodNotAllowed => "Method Not Allowed",
			ClientErrorCode::NotAcceptable => "Not Acceptable",
			ClientErrorCode::Conflict => "Conflict",
			ClientErrorCode::Gone => "Gone",
			ClientErrorCode::RequestEntityTooLarge => "Request Entity Too Large",
			ClientErrorCode::RequestUriTooLong => "Request-URI Too Long",
			ClientErrorCode::UnsupportedMediaType => "Unsupported Media Type",
			ClientErrorCode::ImATeapot => "I'm a teapot",
		}
	}
}
impl Display for ClientErrorCode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Response kind (plus fixed fields) a status code maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusClass {
	/// Body-carrying success.
	Content(SuccessCode),
	/// Success without a body.
	NoContent {
		/// Whether the client should reset the submitting form.
		should_reset_form: bool,
	},
	/// Redirect to another location.
	Redirect {
		/// Whether the redirect is permanent.
		is_permanent: bool,
		/// Whether the follow-up request must switch to `GET`.
		switch_to_get: bool,
	},
	/// Client error with a fixed code.
	ClientError(ClientErrorCode),
	/// Any supported server error.
	ServerError,
}

/// Looks `status` up in the classification table.
pub const fn classify(status: u16) -> Option<StatusClass> {
	use ClientErrorCode::*;

	let class = match status {
		200 => StatusClass::Content(SuccessCode::Ok),
		201 => StatusClass::Content(SuccessCode::Created),
		202 => StatusClass::Content(SuccessCode::Accepted),
		204 => StatusClass::NoContent { should_reset_form: false },
		205 => StatusClass::NoContent { should_reset_form: true },
		301 => StatusClass::Redirect { is_permanent: true, switch_to_get: true },
		302 => StatusClass::Redirect { is_permanent: false, switch_to_get: true },
		303 => StatusClass::Redirect { is_permanent: false, switch_to_get: true },
		307 => StatusClass::Redirect { is_permanent: false, switch_to_get: false },
		308 => StatusClass::Redirect { is_permanent: true, switch_to_get: false },
		400 => StatusClass::ClientError(BadRequest),
		403 => StatusClass::ClientError(Forbidden),
		404 => StatusClass::ClientError(NotFound),
		405 => StatusClass::ClientError(MethodNotAllowed),
		406 => StatusClass::ClientError(NotAcceptable),
		409 => StatusClass::ClientError(Conflict),
		410 => StatusClass::ClientError(Gone),
		413 => StatusClass::ClientError(RequestEntityTooLarge),
		414 => StatusClass::ClientError(RequestUriTooLong),
		415 => StatusClass::ClientError(UnsupportedMediaType),
		418 => StatusClass::ClientError(ImATeapot),
		500..=505 => StatusClass::ServerError,
		_ => return None,
	};

	Some(class)
}
