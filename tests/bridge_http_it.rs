// crates.io
use httpmock::prelude::*;
// self
use http_session_bridge::{
	_preludet::*,
	auth::{Credential, Secret},
	descriptor::{API_SESSION_TYPE_ID, EndpointDescriptor},
	error::{ErrorKind, ProtocolError},
	http::ReqwestHttpClient,
	restore::{self, ExternalSession},
	session::{
		ApiSession, ClientErrorCode, Content, PostContent, ReqwestBridge, RequestContext,
		ResponseResult, SuccessCode,
	},
	store::SaveTemplate,
	view::ExternalUiView,
};

fn session(server: &MockServer, credential: Credential) -> ExternalSession<ReqwestHttpClient> {
	let descriptor = EndpointDescriptor::new(server.base_url(), credential);

	restore::restore(descriptor, SaveTemplate::default(), test_reqwest_http_client())
		.expect("Mock server descriptor should restore.")
}

#[tokio::test]
async fn content_responses_carry_body_and_metadata() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/hello").header("authorization", "Bearer abc");
			then.status(200)
				.header("content-type", "text/plain")
				.header("content-language", "en")
				.header("content-disposition", "attachment; filename=hello.txt")
				.body("hello");
		})
		.await;
	let result = session(&server, Credential::bearer("abc"))
		.get("hello", &RequestContext::default())
		.await
		.expect("GET should succeed.");

	mock.assert_async().await;

	assert_eq!(
		result,
		ResponseResult::Content(Content {
			status: SuccessCode::Ok,
			body: b"hello".to_vec(),
			encoding: None,
			language: Some("en".into()),
			content_type: Some("text/plain".into()),
			attachment_filename: Some("hello.txt".into()),
		})
	);
}

#[tokio::test]
async fn large_bodies_are_accumulated_in_order() {
	let server = MockServer::start_async().await;
	let payload = (0..200_000).map(|i| (i % 251) as u8).collect::<Vec<_>>();
	let expected = payload.clone();

	server
		.mock_async(move |when, then| {
			when.method(GET).path("/blob");
			then.status(200).header("content-type", "application/octet-stream").body(payload);
		})
		.await;

	let result = session(&server, Credential::None)
		.get("/blob", &RequestContext::default())
		.await
		.expect("GET should succeed.");
	let ResponseResult::Content(content) = result else {
		panic!("200 should classify as content.");
	};

	assert_eq!(content.body, expected);
}

#[tokio::test]
async fn headers_follow_the_request_context() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/submit")
				.header("authorization", "Basic dTpw")
				.header("content-type", "application/json")
				.header("accept", "text/html; 0.5, application/json; 1")
				.header("cookies", "a=1,b=2")
				.body("{\"ok\":true}");
			then.status(201).body("created");
		})
		.await;
	let context = RequestContext::default()
		.with_accept("text/html", 0.5)
		.with_accept("application/json", 1.0)
		.with_cookie("a", "1")
		.with_cookie("b", "2");
	let result = session(&server, Credential::basic("u", "p"))
		.post("/submit", PostContent::new("{\"ok\":true}", "application/json"), &context)
		.await
		.expect("POST should succeed.");

	mock.assert_async().await;

	assert!(matches!(
		result,
		ResponseResult::Content(Content { status: SuccessCode::Created, .. })
	));
}

#[tokio::test]
async fn status_table_drives_classification() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(DELETE).path("/gone");
			then.status(205);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(PUT).path("/missing");
			then.status(404).body("<h1>not here</h1>");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/broken");
			then.status(502).body("bad gateway");
		})
		.await;

	let session = session(&server, Credential::None);
	let context = RequestContext::default();

	assert_eq!(
		session.delete("gone", &context).await.expect("DELETE should succeed."),
		ResponseResult::NoContent { should_reset_form: true }
	);
	assert_eq!(
		session
			.put("missing", PostContent::new("x", "text/plain"), &context)
			.await
			.expect("PUT should succeed."),
		ResponseResult::ClientError {
			code: ClientErrorCode::NotFound,
			description_html: "Not Found"
		}
	);
	assert_eq!(
		session.get("broken", &context).await.expect("GET should succeed."),
		ResponseResult::ServerError
	);
}

#[tokio::test]
async fn redirects_are_reported_not_followed() {
	let server = MockServer::start_async().await;
	let redirect = server
		.mock_async(|when, then| {
			when.method(GET).path("/old");
			then.status(308).header("location", "/new");
		})
		.await;
	let target = server
		.mock_async(|when, then| {
			when.method(GET).path("/new");
			then.status(200).body("moved");
		})
		.await;
	let result = session(&server, Credential::None)
		.get("/old", &RequestContext::default())
		.await
		.expect("GET should succeed.");

	assert_eq!(
		result,
		ResponseResult::Redirect {
			is_permanent: true,
			switch_to_get: false,
			location: Some("/new".into()),
		}
	);

	redirect.assert_async().await;
	target.assert_calls_async(0).await;
}

#[tokio::test]
async fn unmapped_statuses_fail_the_call() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/partial");
			then.status(206).body("par");
		})
		.await;

	let err = session(&server, Credential::None)
		.get("/partial", &RequestContext::default())
		.await
		.expect_err("206 has no session representation.");

	assert!(matches!(err, Error::Protocol(ProtocolError::UnexpectedStatus { status: 206 })));
	assert_eq!(err.to_string(), "Invalid status code 206 received in response.");
	assert_eq!(err.kind(), ErrorKind::Failed);
}

#[tokio::test]
async fn unreachable_hosts_fail_as_transport_errors() {
	let err = restore::restore::<ReqwestHttpClient>(
		EndpointDescriptor::new("http://127.0.0.1:1", Credential::None),
		SaveTemplate::default(),
		test_reqwest_http_client(),
	)
	.expect("Descriptor should restore.")
	.get("/", &RequestContext::default())
	.await
	.expect_err("A closed port should refuse the connection.");

	assert!(matches!(err, Error::Transport(_)));
	assert!(!err.is_retryable());
}

#[tokio::test]
async fn ui_views_open_bearer_sessions() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/me").header("authorization", "Bearer view-token");
			then.status(204);
		})
		.await;
	let bridge: ReqwestBridge =
		ExternalUiView::new(server.base_url(), Some(Secret::new("view-token")))
			.new_session(API_SESSION_TYPE_ID, test_reqwest_http_client())
			.expect("API sessions should open.");
	let result =
		bridge.get("me", &RequestContext::default()).await.expect("GET should succeed.");

	mock.assert_async().await;

	assert_eq!(result, ResponseResult::NoContent { should_reset_form: false });
}

#[tokio::test]
async fn production_client_never_follows_redirects() {
	let server = MockServer::start_async().await;
	let redirect = server
		.mock_async(|when, then| {
			when.method(GET).path("/login");
			then.status(302).header("location", "/dashboard");
		})
		.await;
	let target = server
		.mock_async(|when, then| {
			when.method(GET).path("/dashboard");
			then.status(200).body("dashboard");
		})
		.await;
	let client = ReqwestHttpClient::new().expect("Production client should build.");
	let session = restore::restore::<ReqwestHttpClient>(
		EndpointDescriptor::new(server.base_url(), Credential::None),
		SaveTemplate::default(),
		client,
	)
	.expect("Mock server descriptor should restore.");
	let context = RequestContext::default();

	for _ in 0..2 {
		let result = session.get("login", &context).await.expect("GET should succeed.");

		assert_eq!(
			result,
			ResponseResult::Redirect {
				is_permanent: false,
				switch_to_get: true,
				location: Some("/dashboard".into()),
			}
		);
	}

	redirect.assert_calls_async(2).await;
	target.assert_calls_async(0).await;
}
