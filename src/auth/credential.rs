//! Credential variants an endpoint grant may carry.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Serializer, ser::SerializeMap};
// self
use crate::{_prelude::*, auth::Secret, error::UnimplementedError};

/// Username/password pair sent with HTTP Basic authentication.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicCredential {
	/// Basic-auth user name.
	pub username: String,
	/// Basic-auth password.
	pub password: Secret,
}
impl BasicCredential {
	/// Creates a new username/password pair.
	pub fn new(username: impl Into<String>, password: impl Into<Secret>) -> Self {
		Self { username: username.into(), password: password.into() }
	}
}

/// Credential attached to an endpoint; exactly one variant is active.
///
/// Persisted as a single-key object: `{"none": null}`, `{"bearer": "<token>"}`,
/// `{"basic": {"username": "..", "password": ".."}}`, or `{"refresh": "<token>"}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Credential {
	/// Anonymous access.
	#[default]
	None,
	/// `Authorization: Bearer <token>`.
	Bearer(Secret),
	/// `Authorization: Basic base64(username:password)`.
	Basic(BasicCredential),
	/// Refresh-token grant; recognized but never restorable.
	Refresh(Secret),
}
impl Credential {
	/// Creates a bearer credential.
	pub fn bearer(token: impl Into<Secret>) -> Self {
		Self::Bearer(token.into())
	}

	/// Creates a basic credential.
	pub fn basic(username: impl Into<String>, password: impl Into<Secret>) -> Self {
		Self::Basic(BasicCredential::new(username, password))
	}

	/// Returns true for anonymous access.
	pub fn is_none(&self) -> bool {
		matches!(self, Credential::None)
	}

	/// Returns a stable label suitable for span fields; never includes secret material.
	pub const fn as_str(&self) -> &'static str {
		match self {
			Credential::None => "none",
			Credential::Bearer(_) => "bearer",
			Credential::Basic(_) => "basic",
			Credential::Refresh(_) => "refresh",
		}
	}

	/// Derives the `authorization` header value injected into every request.
	///
	/// Returns `Ok(None)` for anonymous access.
	pub fn authorization_header(&self) -> Result<Option<String>, UnimplementedError> {
		match self {
			Credential::None => Ok(None),
			Credential::Bearer(token) => Ok(Some(format!("Bearer {}", token.expose()))),
			Credential::Basic(basic) => {
				let userpass = format!("{}:{}", basic.username, basic.password.expose());

				Ok(Some(format!("Basic {}", STANDARD.encode(userpass))))
			},
			Credential::Refresh(_) => Err(UnimplementedError::RefreshCredential),
		}
	}
}
impl Serialize for Credential {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut map = serializer.serialize_map(Some(1))?;

		match self {
			Credential::None => map.serialize_entry("none", &())?,
			Credential::Bearer(token) => map.serialize_entry("bearer", token)?,
			Credential::Basic(basic) => map.serialize_entry("basic", basic)?,
			Credential::Refresh(token) => map.serialize_entry("refresh", token)?,
		}

		map.end()
	}
}
