mod common;

// std
use std::sync::Arc;
// crates.io
use serde_json::json;
// self
use booklite_client::{
	auth::{AccessToken, RefreshFailure, RefreshOutcome},
	client::{ApiClient, ApiRequest, RetryPolicy},
	error::{Error, ErrorKind},
	http::{FileUpload, MultipartForm},
	http_types::{HeaderValue, Method, StatusCode, header},
	store::{MemoryStore, SessionStore, StoreError, StoreFuture},
};
use common::*;

/// Session store that keeps its token but refuses to drop it.
struct ClearRefusingStore(MemoryStore);
impl SessionStore for ClearRefusingStore {
	fn load(&self) -> StoreFuture<'_, Option<AccessToken>> {
		self.0.load()
	}

	fn save(&self, token: AccessToken) -> StoreFuture<'_, ()> {
		self.0.save(token)
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		Box::pin(async { Err(StoreError::Backend { message: "read-only volume".into() }) })
	}
}

fn orders_request() -> ApiRequest {
	ApiRequest::get(config().endpoint(["orders"]))
}

#[tokio::test]
async fn non_401_responses_cost_one_call() {
	let transport = FakeTransport::new();

	transport.respond(500, json!({ "message": "Database unavailable" }));

	let (client, store) = client(&transport, Some("T1"));
	let response = client.send(orders_request()).await.expect("Transport should succeed.");

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(transport.paths(), ["/api/orders"]);
	assert_eq!(stored(&store).as_deref(), Some("T1"));
	assert_eq!(client.metrics.refresh_attempts(), 0);
}

#[tokio::test]
async fn expired_token_is_refreshed_and_request_resent_once() {
	let transport = FakeTransport::new();

	transport
		.respond(401, json!({ "message": "Token expiré" }))
		.respond(200, json!({ "accessToken": "T2" }))
		.respond(200, json!([]));

	let (client, store) = client(&transport, Some("T1"));
	let response = client.send(orders_request()).await.expect("Transport should succeed.");
	let requests = transport.requests();

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(transport.paths(), ["/api/orders", "/api/auth/refresh-token", "/api/orders"]);
	assert_eq!(requests[0].authorization(), Some("Bearer T1"));
	assert_eq!(requests[1].authorization(), None);
	assert_eq!(requests[1].method, Method::POST);
	assert_eq!(requests[2].authorization(), Some("Bearer T2"));
	assert_eq!(stored(&store).as_deref(), Some("T2"));
	assert_eq!(client.metrics.refresh_successes(), 1);
	assert_eq!(client.metrics.retries(), 1);
}

#[tokio::test]
async fn never_policy_returns_401_without_further_calls() {
	let transport = FakeTransport::new();

	transport.respond(401, json!({ "message": "Token expiré" }));

	let (client, store) = client(&transport, Some("T1"));
	let request = orders_request().with_retry(RetryPolicy::Never);
	let response = client.send(request).await.expect("Transport should succeed.");

	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
	assert_eq!(transport.paths(), ["/api/orders"]);
	assert_eq!(stored(&store).as_deref(), Some("T1"));

	transport.respond(401, json!({}));

	let response = client.send_once(orders_request()).await.expect("Transport should succeed.");

	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
	assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn refresh_failure_clears_token_and_returns_original_401() {
	let transport = FakeTransport::new();

	transport
		.respond(401, json!({ "message": "Token expiré" }))
		.respond(403, json!({ "message": "Refresh token missing" }));

	let (client, store) = client(&transport, Some("T1"));
	let response = client.send(orders_request()).await.expect("Transport should succeed.");

	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
	assert!(String::from_utf8_lossy(response.body()).contains("Token expiré"));
	assert_eq!(transport.requests().len(), 2);
	assert_eq!(stored(&store), None);
	assert_eq!(client.metrics.refresh_failures(), 1);
	assert_eq!(client.metrics.retries(), 0);
}

#[tokio::test]
async fn refresh_reports_failure_kinds_without_erroring() {
	let transport = FakeTransport::new();

	transport.respond(401, json!({})).respond(200, json!({ "token": "wrong-field" })).fail();

	let (client, store) = client(&transport, Some("T1"));

	assert_eq!(
		client.refresh().await,
		RefreshOutcome::Failed(RefreshFailure::Rejected { status: 401 })
	);

	store.save(AccessToken::new("T1")).await.expect("Store should accept the token.");

	let outcome = client.refresh().await;

	assert!(matches!(outcome, RefreshOutcome::Failed(RefreshFailure::Unavailable { .. })));
	assert_eq!(stored(&store), None);

	store.save(AccessToken::new("T1")).await.expect("Store should accept the token.");

	let outcome = client.refresh().await;

	assert!(matches!(outcome, RefreshOutcome::Failed(RefreshFailure::Unavailable { .. })));
	assert_eq!(stored(&store), None);
	assert_eq!(client.metrics.refresh_attempts(), 3);
}

#[tokio::test]
async fn retry_that_is_also_rejected_is_returned_and_keeps_new_token() {
	let transport = FakeTransport::new();

	transport
		.respond(401, json!({ "message": "Token expiré" }))
		.respond(200, json!({ "accessToken": "T2" }))
		.respond(401, json!({ "message": "Still unauthorized" }));

	let (client, store) = client(&transport, Some("T1"));
	let response = client.send(orders_request()).await.expect("Transport should succeed.");

	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
	assert_eq!(transport.requests().len(), 3);
	assert_eq!(stored(&store).as_deref(), Some("T2"));
}

#[tokio::test]
async fn missing_token_sends_no_authorization_header() {
	let transport = FakeTransport::new();

	transport.respond(200, json!([]));

	let (client, _store) = client(&transport, None);
	let request = orders_request()
		.header(header::AUTHORIZATION, HeaderValue::from_static("Bearer forged"));

	client.send(request).await.expect("Transport should succeed.");

	assert_eq!(transport.requests()[0].authorization(), None);
}

#[tokio::test]
async fn multipart_bodies_never_carry_a_content_type() {
	let transport = FakeTransport::new();

	transport.respond(201, json!({ "success": true, "data": { "path": "/uploads/c.png" } }));

	let (client, _store) = client(&transport, Some("T1"));
	let url = client
		.upload_image(FileUpload::new("c.png", vec![1, 2]))
		.await
		.expect("Upload should succeed.");
	let requests = transport.requests();
	let request = &requests[0];

	assert_eq!(url.as_str(), "https://shop.example.com/uploads/c.png");
	assert!(request.multipart);
	assert_eq!(request.content_type(), None);
	assert_eq!(request.authorization(), Some("Bearer T1"));

	transport.respond(200, json!({}));

	let request = ApiRequest::post(config().endpoint(["products"]))
		.header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))
		.body(MultipartForm::new().text("title", "Dune"));

	client.send(request).await.expect("Transport should succeed.");

	assert_eq!(transport.requests()[1].content_type(), None);
}

#[tokio::test]
async fn json_requests_always_carry_json_content_type() {
	let transport = FakeTransport::new();

	transport.respond(200, user_json("u1"));

	let (client, _store) = client(&transport, Some("T1"));
	let request = ApiRequest::put(config().endpoint(["users", "u1", "role"]))
		.header(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"))
		.json(&json!({ "role": "admin" }))
		.expect("Body should serialize.");

	client.send(request).await.expect("Transport should succeed.");

	let requests = transport.requests();
	let recorded = &requests[0];

	assert_eq!(recorded.content_type(), Some("application/json"));
	assert_eq!(recorded.json, Some(json!({ "role": "admin" })));
}

#[tokio::test]
async fn transport_failures_are_wrapped() {
	let transport = FakeTransport::new();

	transport.fail();

	let (client, store) = client(&transport, Some("T1"));
	let err = client.orders().await.expect_err("Transport failure must surface.");

	assert_eq!(err.kind(), ErrorKind::Transport);
	assert!(matches!(err, Error::Transport(_)));
	assert_eq!(stored(&store).as_deref(), Some("T1"));
}

#[tokio::test]
async fn separate_clients_keep_separate_sessions() {
	let transport = FakeTransport::new();

	transport.respond(200, json!([])).respond(200, json!([])).respond(200, json!({}));

	let (first, first_store) = client(&transport, Some("A"));
	let (second, second_store) = client(&transport, Some("B"));

	first.send(orders_request()).await.expect("Transport should succeed.");
	second.send(orders_request()).await.expect("Transport should succeed.");
	first.logout().await.expect("Logout should clear the session.");

	let requests = transport.requests();

	assert_eq!(requests[0].authorization(), Some("Bearer A"));
	assert_eq!(requests[1].authorization(), Some("Bearer B"));
	assert_eq!(stored(&first_store), None);
	assert_eq!(stored(&second_store).as_deref(), Some("B"));
	assert!(second.has_session().await.expect("Store should load."));
}

#[tokio::test]
async fn refresh_failure_with_an_uncleared_token_is_reported() {
	let transport = FakeTransport::new();

	transport
		.respond(401, json!({ "message": "Token expiré" }))
		.respond(403, json!({ "message": "Refresh token missing" }));

	let memory = MemoryStore::with_token(AccessToken::new("T1"));
	let store: Arc<dyn SessionStore> = Arc::new(ClearRefusingStore(memory.clone()));
	let client: FakeClient = ApiClient::with_http_client(config(), store, transport.clone());
	let err = client.send(orders_request()).await.expect_err("Stale token must be reported.");

	assert_eq!(err.kind(), ErrorKind::Storage);
	assert!(err.message().contains("read-only volume"));
	assert_eq!(transport.requests().len(), 2);
	assert_eq!(stored(&memory).as_deref(), Some("T1"));

	transport.respond(500, json!({}));

	match client.refresh().await {
		RefreshOutcome::Failed(failure @ RefreshFailure::NotCleared { .. }) => {
			assert_eq!(
				failure.store_error(),
				Some(&StoreError::Backend { message: "read-only volume".into() })
			);
			assert!(matches!(
				failure,
				RefreshFailure::NotCleared { cause, .. }
					if *cause == RefreshFailure::Rejected { status: 500 }
			));
		},
		other => panic!("Unexpected refresh outcome: {other:?}."),
	}
}

#[tokio::test]
async fn resend_repeats_the_original_json_request() {
	let transport = FakeTransport::new();

	transport
		.respond(401, json!({ "message": "Token expiré" }))
		.respond(200, json!({ "accessToken": "T2" }))
		.respond(201, json!({}));

	let (client, _store) = client(&transport, Some("T1"));
	let body = json!({ "items": [{ "productId": "p1", "quantity": 2 }] });
	let request = ApiRequest::post(config().endpoint(["orders"]))
		.json(&body)
		.expect("Body should serialize.");
	let response = client.send(request).await.expect("Transport should succeed.");
	let requests = transport.requests();

	assert_eq!(response.status(), StatusCode::CREATED);
	assert_eq!(transport.paths(), ["/api/orders", "/api/auth/refresh-token", "/api/orders"]);
	assert_eq!(requests[2].method, Method::POST);
	assert_eq!(requests[2].method, requests[0].method);
	assert_eq!(requests[2].json, Some(body));
	assert_eq!(requests[2].json, requests[0].json);
	assert_eq!(requests[2].content_type(), Some("application/json"));
	assert_eq!(requests[2].authorization(), Some("Bearer T2"));
}

#[tokio::test]
async fn resend_repeats_the_original_multipart_upload() {
	let transport = FakeTransport::new();

	transport
		.respond(401, json!({ "message": "Token expiré" }))
		.respond(200, json!({ "accessToken": "T2" }))
		.respond(201, json!({ "success": true, "data": { "path": "/uploads/c.png" } }));

	let (client, _store) = client(&transport, Some("T1"));
	let url = client
		.upload_image(FileUpload::new("c.png", vec![1, 2]))
		.await
		.expect("Upload should succeed after a refresh.");
	let requests = transport.requests();

	assert_eq!(url.as_str(), "https://shop.example.com/uploads/c.png");
	assert_eq!(
		transport.paths(),
		["/api/local-files", "/api/auth/refresh-token", "/api/local-files"]
	);
	assert_eq!(requests[2].method, Method::POST);
	assert!(requests[0].multipart);
	assert!(requests[2].multipart);
	assert_eq!(requests[2].content_type(), None);
	assert_eq!(requests[2].authorization(), Some("Bearer T2"));
}
