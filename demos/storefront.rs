//! Walks a mocked storefront through login, a public catalog read, and a profile fetch that
//! silently refreshes an expired access token.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use booklite_client::{
	client::ReqwestApiClient,
	config::ClientConfig,
	http::ReqwestHttpClient,
	model::Credentials,
	reqwest::Client,
	store::{MemoryStore, SessionStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let user = r#"{"_id":"u1","name":"Ada","email":"ada@example.com","role":"user"}"#;
	let login = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/login");
			then.status(200)
				.header("content-type", "application/json")
				.header("set-cookie", "refreshToken=demo-refresh; Path=/; HttpOnly")
				.body(format!("{{\"accessToken\":\"demo-expired\",\"user\":{user}}}"));
		})
		.await;
	let products = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/products");
			then.status(200).header("content-type", "application/json").body(
				r#"[{"_id":"p1","title":"Dune","author":"Frank Herbert","price":9.5,"stock":3}]"#,
			);
		})
		.await;
	let expired = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/auth/me").header("authorization", "Bearer demo-expired");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"message":"Token expiré"}"#);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh-token");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"accessToken":"demo-fresh"}"#);
		})
		.await;
	let profile = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/auth/me").header("authorization", "Bearer demo-fresh");
			then.status(200).header("content-type", "application/json").body(user);
		})
		.await;
	let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::default());
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.cookie_store(true)
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let client = ReqwestApiClient::with_http_client(
		ClientConfig::new(&server.base_url())?,
		store,
		http_client,
	);
	let session = client.login(&Credentials::new("ada@example.com", "hunter2")).await?;

	println!("Signed in as {} ({}).", session.user.name, session.user.role);

	for product in client.products().await? {
		println!("Catalog: {} by {} at {:.2}.", product.title, product.author, product.price);
	}

	let me = client.me().await?;

	println!("Profile after silent refresh: {}.", me.email);
	println!("Refresh attempts: {}.", client.metrics.refresh_attempts());

	login.assert_async().await;
	products.assert_async().await;
	expired.assert_async().await;
	refresh.assert_async().await;
	profile.assert_async().await;

	Ok(())
}
