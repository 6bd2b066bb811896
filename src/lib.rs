//! Capability-secured HTTP session bridge: validate endpoint grants, restore persisted
//! descriptors, and translate raw HTTP exchanges into structured session responses.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod descriptor;
pub mod error;
pub mod http;
pub mod obs;
pub mod registry;
pub mod restore;
pub mod session;
pub mod store;
pub mod view;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for unit and integration tests; enabled via
	//! `cfg(test)` or the `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::sync::atomic::{AtomicBool, Ordering};
	// self
	use crate::http::{
		HeaderSet, InboundResponse, OutboundRequest, SessionHttpClient, TransportFuture,
	};
	#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	#[cfg(feature = "reqwest")]
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Error produced by [`RecordingHttpClient`] when configured to fail.
	#[derive(Debug, ThisError)]
	#[error("Recording transport refused the connection.")]
	pub struct RecordingTransportError;

	/// Canned reply returned by [`RecordingHttpClient`].
	#[derive(Clone, Debug)]
	pub enum CannedReply {
		/// Respond with the provided status, headers, and body chunks.
		Respond {
			/// HTTP status code.
			status: u16,
			/// Lower-cased response headers.
			headers: HeaderSet,
			/// Body chunks delivered in order.
			chunks: Vec<Vec<u8>>,
		},
		/// Fail at the transport layer.
		Refuse,
		/// Never respond; the flag flips once the in-flight exchange is dropped.
		Hang(Arc<AtomicBool>),
	}

	/// In-process transport that records every outbound request and answers with a canned reply.
	#[derive(Clone, Debug)]
	pub struct RecordingHttpClient {
		reply: CannedReply,
		requests: Arc<Mutex<Vec<OutboundRequest>>>,
	}
	impl RecordingHttpClient {
		/// Creates a transport answering every request with `reply`.
		pub fn new(reply: CannedReply) -> Self {
			Self { reply, requests: Default::default() }
		}

		/// Shorthand for a reply carrying `status` and a single body chunk.
		pub fn status(status: u16, headers: &[(&str, &str)], body: &[u8]) -> Self {
			let headers =
				headers.iter().map(|(k, v)| (k.to_ascii_lowercase(), (*v).to_owned())).collect();

			Self::new(CannedReply::Respond { status, headers, chunks: vec![body.to_vec()] })
		}

		/// Returns every request observed so far.
		pub fn recorded(&self) -> Vec<OutboundRequest> {
			self.requests.lock().clone()
		}
	}
	impl SessionHttpClient for RecordingHttpClient {
		type TransportError = RecordingTransportError;

		fn send(&self, request: OutboundRequest) -> TransportFuture<'_, Self::TransportError> {
			self.requests.lock().push(request);

			let reply = self.reply.clone();

			Box::pin(async move {
				match reply {
					CannedReply::Respond { status, headers, chunks } => {
						let body = Box::pin(async move { Ok(chunks.concat()) });

						Ok(InboundResponse::new(status, headers, body))
					},
					CannedReply::Refuse => Err(RecordingTransportError),
					CannedReply::Hang(aborted) => {
						let _guard = AbortFlag(aborted);

						std::future::pending::<()>().await;

						Err(RecordingTransportError)
					},
				}
			})
		}
	}

	struct AbortFlag(Arc<AtomicBool>);
	impl Drop for AbortFlag {
		fn drop(&mut self) {
			self.0.store(true, Ordering::SeqCst);
		}
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
