#![cfg(feature = "reqwest")]

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use booklite_client::{
	client::ReqwestApiClient,
	config::ClientConfig,
	error::ErrorKind,
	http::{FileUpload, ReqwestHttpClient},
	model::{Credentials, ProductInput},
	reqwest::Client,
	store::{MemoryStore, SessionStore},
};

/// Cookie-aware reqwest transport that accepts the self-signed certificates `httpmock` serves.
fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = Client::builder()
		.cookie_store(true)
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

fn build_client(server: &MockServer) -> (ReqwestApiClient, MemoryStore) {
	let config = ClientConfig::new(&server.base_url()).expect("Mock base URL should be valid.");
	let store = MemoryStore::default();
	let session: Arc<dyn SessionStore> = Arc::new(store.clone());
	let client =
		ReqwestApiClient::with_http_client(config, session, test_reqwest_http_client());

	(client, store)
}

fn user_body() -> String {
	json!({ "_id": "u1", "name": "Ada", "email": "ada@example.com", "role": "user" }).to_string()
}

#[tokio::test]
async fn refresh_uses_the_login_cookie() {
	let server = MockServer::start_async().await;
	let login = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/login").header("content-type", "application/json");
			then.status(200)
				.header("content-type", "application/json")
				.header("set-cookie", "refreshToken=r1; Path=/; HttpOnly")
				.body(json!({ "accessToken": "T1", "user": json!({
					"_id": "u1",
					"name": "Ada",
					"email": "ada@example.com",
					"role": "user"
				}) }).to_string());
		})
		.await;
	let expired = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/auth/me").header("authorization", "Bearer T1");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"message":"Token expiré"}"#);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh-token").header("cookie", "refreshToken=r1");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"accessToken":"T2"}"#);
		})
		.await;
	let profile = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/auth/me").header("authorization", "Bearer T2");
			then.status(200).header("content-type", "application/json").body(user_body());
		})
		.await;
	let (client, store) = build_client(&server);

	client
		.login(&Credentials::new("ada@example.com", "hunter2"))
		.await
		.expect("Login should succeed.");

	let user = client.me().await.expect("Profile should load after a silent refresh.");

	assert_eq!(user.name, "Ada");
	assert_eq!(store.snapshot().map(|token| token.expose().to_owned()).as_deref(), Some("T2"));

	login.assert_async().await;
	expired.assert_calls_async(1).await;
	refresh.assert_calls_async(1).await;
	profile.assert_calls_async(1).await;
}

#[tokio::test]
async fn multipart_upload_reaches_the_backend_with_a_boundary() {
	let server = MockServer::start_async().await;
	let upload = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/local-files")
				.header_includes("content-type", "multipart/form-data; boundary=")
				.body_includes("filename=\"cover.png\"");
			then.status(201).header("content-type", "application/json").body(
				json!({ "success": true, "data": { "path": "uploads/cover.png" } }).to_string(),
			);
		})
		.await;
	let (client, _store) = build_client(&server);
	let url = client
		.upload_image(FileUpload::new("cover.png", vec![0x89, 0x50]).with_content_type("image/png"))
		.await
		.expect("Upload should succeed.");

	assert_eq!(url.as_str(), server.url("/uploads/cover.png"));

	upload.assert_async().await;
}

#[tokio::test]
async fn server_errors_are_not_retried() {
	let server = MockServer::start_async().await;
	let failing = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/products");
			then.status(503)
				.header("content-type", "text/html")
				.body("<html>Service Unavailable</html>");
		})
		.await;
	let (client, _store) = build_client(&server);
	let input = ProductInput { title: Some("Dune".into()), ..Default::default() };
	let err = client.create_product(&input).await.expect_err("503 must fail.");

	assert_eq!(err.kind(), ErrorKind::Server);
	assert_eq!(err.status(), Some(503));
	assert_eq!(err.message(), "Failed to create the product.");

	failing.assert_calls_async(1).await;
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
	let config = ClientConfig::new("http://127.0.0.1:9").expect("Base URL should be valid.");
	let client = ReqwestApiClient::new(config, Arc::new(MemoryStore::default()))
		.expect("Reqwest client should build.");
	let err = client.products().await.expect_err("Closed port must fail.");

	assert_eq!(err.kind(), ErrorKind::Transport);
}
