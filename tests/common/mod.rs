#![allow(dead_code)]

// std
use std::{
	collections::VecDeque,
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::Arc,
};
// crates.io
use parking_lot::Mutex;
// self
use booklite_client::{
	auth::AccessToken,
	client::ApiClient,
	config::ClientConfig,
	http::{ApiHttpClient, HttpFuture, HttpRequest, HttpResponse, RequestBody},
	http_types::{HeaderMap, HeaderValue, Method, StatusCode, header},
	store::{MemoryStore, SessionStore},
};

pub const BASE_URL: &str = "https://shop.example.com";

pub type FakeClient = ApiClient<FakeTransport>;

#[derive(Debug)]
pub struct FakeTransportError;
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Connection refused.")
	}
}
impl StdError for FakeTransportError {}

/// What the fake transport saw for one call.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
	pub method: Method,
	pub path: String,
	pub headers: HeaderMap,
	pub multipart: bool,
	pub json: Option<serde_json::Value>,
}
impl RecordedRequest {
	pub fn authorization(&self) -> Option<&str> {
		self.headers.get(header::AUTHORIZATION).and_then(|value| value.to_str().ok())
	}

	pub fn content_type(&self) -> Option<&str> {
		self.headers.get(header::CONTENT_TYPE).and_then(|value| value.to_str().ok())
	}
}

enum Scripted {
	Respond(HttpResponse),
	Fail,
}

/// Transport that replays scripted responses in order and records every call.
///
/// Calls beyond the script fail with [`FakeTransportError`].
#[derive(Default)]
pub struct FakeTransport {
	script: Mutex<VecDeque<Scripted>>,
	recorded: Mutex<Vec<RecordedRequest>>,
}
impl FakeTransport {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn respond(&self, status: u16, body: serde_json::Value) -> &Self {
		self.respond_with(json_response(status, &body))
	}

	pub fn respond_with(&self, response: HttpResponse) -> &Self {
		self.script.lock().push_back(Scripted::Respond(response));

		self
	}

	pub fn fail(&self) -> &Self {
		self.script.lock().push_back(Scripted::Fail);

		self
	}

	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.recorded.lock().clone()
	}

	pub fn paths(&self) -> Vec<String> {
		self.recorded.lock().iter().map(|request| request.path.clone()).collect()
	}
}
impl ApiHttpClient for FakeTransport {
	type TransportError = FakeTransportError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		let (parts, body) = request.into_parts();
		let json = match &body {
			RequestBody::Json(bytes) => serde_json::from_slice(bytes).ok(),
			_ => None,
		};

		self.recorded.lock().push(RecordedRequest {
			method: parts.method,
			path: parts.uri.path().to_owned(),
			headers: parts.headers,
			multipart: body.is_multipart(),
			json,
		});

		let next = self.script.lock().pop_front();

		Box::pin(async move {
			match next {
				Some(Scripted::Respond(response)) => Ok(response),
				Some(Scripted::Fail) | None => Err(FakeTransportError),
			}
		})
	}
}

pub fn json_response(status: u16, body: &serde_json::Value) -> HttpResponse {
	let bytes = serde_json::to_vec(body).expect("Fixture body should serialize.");

	raw_response(status, "application/json", bytes)
}

pub fn raw_response(status: u16, content_type: &'static str, body: Vec<u8>) -> HttpResponse {
	let mut response = HttpResponse::new(body);

	*response.status_mut() = StatusCode::from_u16(status).expect("Fixture status should be valid.");
	response.headers_mut().insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));

	response
}

pub fn config() -> ClientConfig {
	ClientConfig::new(BASE_URL).expect("Fixture base URL should be valid.")
}

/// Builds a client over `transport` with its own in-memory session.
pub fn client(transport: &Arc<FakeTransport>, token: Option<&str>) -> (FakeClient, MemoryStore) {
	client_with_config(transport, token, config())
}

pub fn client_with_config(
	transport: &Arc<FakeTransport>,
	token: Option<&str>,
	config: ClientConfig,
) -> (FakeClient, MemoryStore) {
	let store = match token {
		Some(token) => MemoryStore::with_token(AccessToken::new(token)),
		None => MemoryStore::default(),
	};
	let session: Arc<dyn SessionStore> = Arc::new(store.clone());
	let client = ApiClient::with_http_client(config, session, transport.clone());

	(client, store)
}

pub fn stored(store: &MemoryStore) -> Option<String> {
	store.snapshot().map(|token| token.expose().to_owned())
}

pub fn user_json(id: &str) -> serde_json::Value {
	serde_json::json!({
		"_id": id,
		"name": "Ada",
		"email": "ada@example.com",
		"role": "user",
		"isVerified": true
	})
}
