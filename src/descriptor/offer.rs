//! Powerbox offer builder for interactive endpoint grants.

// self
use crate::{_prelude::*, auth::Credential, descriptor::EndpointDescriptor};

/// Card template for an option pre-bound to a canonical URL.
pub const URL_CARD_TEMPLATE: &str = "httpUrlPowerboxCard";
/// Card template for the arbitrary-URL option.
pub const ARBITRARY_CARD_TEMPLATE: &str = "httpArbitraryPowerboxCard";
/// Configuration template for the arbitrary-URL option.
pub const ARBITRARY_CONFIGURE_TEMPLATE: &str = "httpArbitraryPowerboxConfiguration";

const URL_OPTION_PREFIX: &str = "http-url-";
const ARBITRARY_OPTION_ID: &str = "http-arbitrary";

/// Identifier of the account browsing powerbox options.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);
impl AccountId {
	/// Wraps an account identifier.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}
}
impl AsRef<str> for AccountId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Debug for AccountId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Account({})", self.0)
	}
}
impl Display for AccountId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Hint supplied by the requesting application describing the endpoint it wants.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSessionTag {
	/// Canonical URL the application expects to talk to.
	pub canonical_url: Option<String>,
}

/// What selecting an option binds the capability to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OfferBinding {
	/// Fully specified endpoint; no further input required.
	Bound(EndpointDescriptor),
	/// The user must supply the endpoint through a configuration template.
	#[serde(rename_all = "camelCase")]
	NeedsConfiguration {
		/// Template rendering the configuration form.
		configure_template: &'static str,
	},
}

/// One selectable powerbox option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerboxOption {
	/// Stable identifier; repeated queries for the same URL yield the same id.
	pub id: String,
	/// Endpoint binding or pending configuration.
	pub binding: OfferBinding,
	/// Template rendering the option card.
	pub card_template: &'static str,
}

/// Lists the options offered to `account` when an application requests an HTTP API session.
///
/// A hint carrying an `http`/`https` canonical URL yields an option bound to that exact URL;
/// the arbitrary-URL option is always offered last.
pub fn offer_options(account: &AccountId, tag: Option<&ApiSessionTag>) -> Vec<PowerboxOption> {
	let _ = account;
	let mut options = Vec::with_capacity(2);

	if let Some(url) = tag
		.and_then(|tag| tag.canonical_url.as_deref())
		.filter(|url| url.starts_with("https://") || url.starts_with("http://"))
	{
		options.push(PowerboxOption {
			id: format!("{URL_OPTION_PREFIX}{url}"),
			binding: OfferBinding::Bound(EndpointDescriptor::new(url, Credential::None)),
			card_template: URL_CARD_TEMPLATE,
		});
	}

	options.push(PowerboxOption {
		id: ARBITRARY_OPTION_ID.into(),
		binding: OfferBinding::NeedsConfiguration {
			configure_template: ARBITRARY_CONFIGURE_TEMPLATE,
		},
		card_template: ARBITRARY_CARD_TEMPLATE,
	});

	options
}
