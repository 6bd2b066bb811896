//! Endpoint descriptors (data), their normalizer, and the interactive offer builder.
//!
//! [`EndpointDescriptor`] is the persisted unit of authorization: one `http`/`https` URL plus
//! the [`Credential`] used to reach it. `validate` canonicalizes caller-proposed descriptors by
//! folding URL-embedded credentials into the explicit credential slot, and `offer` lists the
//! powerbox options a user may pick from while granting access.

pub mod offer;
pub mod validate;

pub use offer::*;
pub use validate::*;

// self
use crate::{_prelude::*, auth::Credential, error::ValidationError, http::Scheme};

/// Interface identifier of the API session protocol this crate implements.
pub const API_SESSION_TYPE_ID: u64 = 14445827391922490823;

/// Canonical, persistable description of one authorized endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
	/// Endpoint URL; `http` or `https`, without userinfo or fragment once validated.
	pub url: String,
	/// Credential injected into every request.
	pub credential: Credential,
}
impl EndpointDescriptor {
	/// Creates a descriptor without validating it; see [`validate`] for canonicalization.
	pub fn new(url: impl Into<String>, credential: Credential) -> Self {
		Self { url: url.into(), credential }
	}

	/// Parses the connection identity fixed for the lifetime of a bridge.
	pub fn endpoint(&self) -> Result<Endpoint, ValidationError> {
		Endpoint::parse(&self.url)
	}
}

/// Immutable `(scheme, host, port)` triple a bridge talks to.
///
/// Any path, query, or fragment on the source URL is ignored; session calls supply their own
/// paths.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Endpoint {
	/// Transport selector.
	pub scheme: Scheme,
	/// Host name or bracketed IPv6 literal.
	pub host: String,
	/// Explicit port, if the URL carried one.
	pub port: Option<u16>,
}
impl Endpoint {
	/// Parses an `http`/`https` URL into its connection identity.
	pub fn parse(url: &str) -> Result<Self, ValidationError> {
		let parsed = Url::parse(url).map_err(|source| ValidationError::InvalidUrl { source })?;
		let scheme = Scheme::parse(parsed.scheme())
			.ok_or_else(|| ValidationError::UnsupportedScheme { url: url.to_owned() })?;
		let host = parsed
			.host_str()
			.ok_or(ValidationError::InvalidUrl { source: url::ParseError::EmptyHost })?
			.to_owned();

		Ok(Self { scheme, host, port: parsed.port() })
	}
}
