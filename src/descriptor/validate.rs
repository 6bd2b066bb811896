//! Normalizer for caller-proposed endpoint grants.

// crates.io
use percent_encoding::percent_decode_str;
// self
use crate::{
	_prelude::*,
	auth::Credential,
	descriptor::{API_SESSION_TYPE_ID, EndpointDescriptor},
	error::ValidationError,
};

/// Grant proposed by a caller before canonicalization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRequest {
	/// Requested endpoint URL, possibly carrying userinfo or a fragment.
	pub url: String,
	/// Explicitly supplied credential.
	pub credential: Credential,
}

/// Tag identifying which interface a granted capability satisfies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceTag {
	/// Interface type identifier.
	pub id: u64,
}

/// Powerbox descriptor returned alongside a validated grant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerboxDescriptor {
	/// Interfaces the grant satisfies.
	pub tags: Vec<InterfaceTag>,
}

/// Outcome of a successful validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedGrant {
	/// Interfaces satisfied by the grant.
	pub descriptor: PowerboxDescriptor,
	/// Opaque platform requirements the grant depends on; always empty for HTTP endpoints.
	pub requirements: Vec<serde_json::Value>,
	/// Canonical descriptor to persist.
	pub endpoint: EndpointDescriptor,
}

/// Canonicalizes a proposed `(url, credential)` pair.
///
/// Userinfo embedded in the URL becomes a basic credential and a fragment becomes a bearer
/// token, provided no other credential source is active; both are stripped from the URL.
pub fn validate(url: &str, credential: Credential) -> Result<ValidatedGrant, ValidationError> {
	if !url.starts_with("https://") && !url.starts_with("http://") {
		return Err(ValidationError::UnsupportedScheme { url: url.to_owned() });
	}

	let mut parsed = Url::parse(url).map_err(|source| ValidationError::InvalidUrl { source })?;
	let mut credential = credential;
	let mut rewritten = false;

	// `Url` reports an empty password as absent; the raw authority still carries the `:`.
	let has_password = parsed.password().is_some() || userinfo_has_password(url);

	if !parsed.username().is_empty() || has_password {
		if has_password {
			if !credential.is_none() {
				return Err(ValidationError::MultipleAuthMechanisms);
			}

			credential = Credential::basic(
				decode(parsed.username()),
				decode(parsed.password().unwrap_or_default()),
			);
		}

		// Cannot fail: `http`/`https` URLs always carry a host.
		let _ = parsed.set_username("");
		let _ = parsed.set_password(None);

		rewritten = true;
	}
	if let Some(fragment) = parsed.fragment().map(str::to_owned) {
		if !fragment.is_empty() {
			if !credential.is_none() {
				return Err(ValidationError::MultipleAuthMechanisms);
			}

			credential = Credential::bearer(fragment);
		}

		parsed.set_fragment(None);

		rewritten = true;
	}

	let url = if rewritten { parsed.to_string() } else { url.to_owned() };

	Ok(ValidatedGrant {
		descriptor: PowerboxDescriptor { tags: vec![InterfaceTag { id: API_SESSION_TYPE_ID }] },
		requirements: Vec::new(),
		endpoint: EndpointDescriptor::new(url, credential),
	})
}

/// Decodes an untyped request and validates it.
///
/// Decoding failures report the path of the offending field.
pub fn validate_value(value: serde_json::Value) -> Result<ValidatedGrant, ValidationError> {
	let request: ValidationRequest =
		serde_path_to_error::deserialize(value).map_err(|e| ValidationError::MalformedRequest {
			path: e.path().to_string(),
			message: e.inner().to_string(),
		})?;

	validate(&request.url, request.credential)
}

fn userinfo_has_password(url: &str) -> bool {
	let Some((_, rest)) = url.split_once("://") else {
		return false;
	};
	let authority = rest.split(['/', '?', '#', '\\']).next().unwrap_or_default();

	authority.rsplit_once('@').is_some_and(|(userinfo, _)| userinfo.contains(':'))
}

fn decode(component: &str) -> String {
	percent_decode_str(component).decode_utf8_lossy().into_owned()
}
