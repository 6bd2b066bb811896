//! Structured session responses and their construction from raw HTTP.

// self
use crate::{
	_prelude::*,
	error::{ProtocolError, TransportError},
	http::InboundResponse,
	session::status::{self, ClientErrorCode, StatusClass, SuccessCode},
};

/// Body-carrying success response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
	/// Success alias from the status table.
	pub status: SuccessCode,
	/// Full response body, chunks concatenated in arrival order.
	pub body: Vec<u8>,
	/// `content-encoding` header, if any.
	pub encoding: Option<String>,
	/// `content-language` header, if any.
	pub language: Option<String>,
	/// `content-type` header, if any.
	pub content_type: Option<String>,
	/// File name from an `attachment` content disposition.
	pub attachment_filename: Option<String>,
}

/// Session-protocol result of one call; exactly one variant is populated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseResult {
	/// Success with a body.
	Content(Content),
	/// Success without a body.
	#[serde(rename_all = "camelCase")]
	NoContent {
		/// Whether the client should reset the submitting form.
		should_reset_form: bool,
	},
	/// Redirect; never followed by the bridge.
	#[serde(rename_all = "camelCase")]
	Redirect {
		/// Whether the redirect is permanent.
		is_permanent: bool,
		/// Whether the follow-up request must switch to `GET`.
		switch_to_get: bool,
		/// `location` header, if any.
		location: Option<String>,
	},
	/// Client error; the upstream body is discarded.
	#[serde(rename_all = "camelCase")]
	ClientError {
		/// Fixed error code.
		code: ClientErrorCode,
		/// Fixed HTML description for the code.
		description_html: &'static str,
	},
	/// Server error marker; the upstream body is discarded.
	ServerError,
}
impl ResponseResult {
	/// Classifies `response`, reading its body only for content responses.
	pub async fn from_inbound<E>(response: InboundResponse<E>) -> Result<Self>
	where
		E: 'static + Send + Sync + StdError,
	{
		let class = status::classify(response.status)
			.ok_or(ProtocolError::UnexpectedStatus { status: response.status })?;
		let result = match class {
			StatusClass::Content(status) => {
				let encoding = response.header("content-encoding").map(str::to_owned);
				let language = response.header("content-language").map(str::to_owned);
				let content_type = response.header("content-type").map(str::to_owned);
				let attachment_filename =
					response.header("content-disposition").and_then(attachment_filename);
				let body = response.read_body().await.map_err(TransportError::network)?;

				ResponseResult::Content(Content {
					status,
					body,
					encoding,
					language,
					content_type,
					attachment_filename,
				})
			},
			StatusClass::NoContent { should_reset_form } =>
				ResponseResult::NoContent { should_reset_form },
			StatusClass::Redirect { is_permanent, switch_to_get } => ResponseResult::Redirect {
				is_permanent,
				switch_to_get,
				location: response.header("location").map(str::to_owned),
			},
			StatusClass::ClientError(code) =>
				ResponseResult::ClientError { code, description_html: code.description_html() },
			StatusClass::ServerError => ResponseResult::ServerError,
		};

		Ok(result)
	}

	/// Returns a stable label for the populated variant.
	pub const fn kind(&self) -> &'static str {
		match self {
			ResponseResult::Content(_) => "content",
			ResponseResult::NoContent { .. } => "noContent",
			ResponseResult::Redirect { .. } => "redirect",
			ResponseResult::ClientError { .. } => "clientError",
			ResponseResult::ServerError => "serverError",
		}
	}
}

/// Extracts the file name from an `attachment` content disposition.
///
/// The last `filename` parameter wins; quoting is preserved as sent.
pub fn attachment_filename(disposition: &str) -> Option<String> {
	let mut parts = disposition.split(';');

	if !parts.next()?.trim().eq_ignore_ascii_case("attachment") {
		return None;
	}

	parts
		.filter_map(|part| part.split_once('='))
		.filter(|(key, _)| key.trim().eq_ignore_ascii_case("filename"))
		.map(|(_, value)| value.trim().to_owned())
		.next_back()
}
