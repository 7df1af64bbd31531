//! Request descriptions consumed by the authenticated pipeline.

// self
use crate::{_prelude::*, http::RequestBody};

/// Whether a request may be recovered from a 401 by refreshing the session once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RetryPolicy {
	/// Refresh once and resend once on 401.
	#[default]
	Once,
	/// Return a 401 unchanged.
	Never,
}

/// Whether the stored bearer token is attached to a request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
	/// Attach `Authorization: Bearer <token>` when a token is stored.
	#[default]
	Bearer,
	/// Never attach credentials.
	Public,
}

/// Outbound API call: target, method, body, extra headers, and recovery policy.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute target URL.
	pub url: Url,
	/// Caller-supplied headers; client defaults override them.
	pub headers: HeaderMap,
	/// Request payload.
	pub body: RequestBody,
	/// Credential attachment mode.
	pub auth: AuthMode,
	/// 401 recovery policy.
	pub retry: RetryPolicy,
}
impl ApiRequest {
	/// Creates a protected request with an empty body.
	pub fn new(method: Method, url: Url) -> Self {
		Self {
			method,
			url,
			headers: HeaderMap::new(),
			body: RequestBody::Empty,
			auth: AuthMode::Bearer,
			retry: RetryPolicy::Once,
		}
	}

	/// Creates a protected `GET` request.
	pub fn get(url: Url) -> Self {
		Self::new(Method::GET, url)
	}

	/// Creates a protected `POST` request.
	pub fn post(url: Url) -> Self {
		Self::new(Method::POST, url)
	}

	/// Creates a protected `PUT` request.
	pub fn put(url: Url) -> Self {
		Self::new(Method::PUT, url)
	}

	/// Creates a protected `DELETE` request.
	pub fn delete(url: Url) -> Self {
		Self::new(Method::DELETE, url)
	}

	/// Marks the request as public: no bearer token and no 401 recovery.
	pub fn public(mut self) -> Self {
		self.auth = AuthMode::Public;
		self.retry = RetryPolicy::Never;

		self
	}

	/// Disables the single refresh-and-retry for this request.
	pub fn without_retry(mut self) -> Self {
		self.retry = RetryPolicy::Never;

		self
	}

	/// Overrides the retry policy.
	pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
		self.retry = retry;

		self
	}

	/// Adds a caller header.
	pub fn header(mut self, name: header::HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);

		self
	}

	/// Replaces the body.
	pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
		self.body = body.into();

		self
	}

	/// Serializes `value` as the JSON body.
	pub fn json<T>(mut self, value: &T) -> Result<Self>
	where
		T: ?Sized + Serialize,
	{
		self.body = RequestBody::json(value)?;

		Ok(self)
	}
}
