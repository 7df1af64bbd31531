//! Authenticated request client and its session-recovery pipeline.
//!
//! [`ApiClient`] owns the transport, the session store, and the configuration. Every protected
//! call flows through [`ApiClient::send`]:
//!
//! 1. `dispatch` attaches the stored bearer token and issues exactly one request.
//! 2. A non-401 response (or a 401 under [`RetryPolicy::Never`]) is returned unchanged.
//! 3. Otherwise `recover` performs one [`ApiClient::refresh`] and, if it produced a token, one
//!    more `dispatch` carrying that token. `recover` never loops back into `send`, so a request
//!    costs at most one refresh and one resend.
//!
//! There is no shared "refreshing" state: concurrent 401s each refresh on their own and the
//! last token written to the store wins.

pub mod metrics;
pub mod request;
pub mod response;

pub use metrics::SessionMetrics;
pub use request::*;
pub use response::{Download, Envelope, ErrorBody};

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, RefreshFailure, RefreshOutcome},
	config::ClientConfig,
	error::{ConfigError, TransportError},
	http::{ApiHttpClient, HttpRequest, HttpResponse},
	obs::{self, CallKind, CallOutcome, CallSpan, ClearReason},
	store::SessionStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestHttpClient>;

/// Storefront API client bound to one session.
///
/// The session lives in the injected [`SessionStore`]; two clients built with different stores
/// are fully independent, which keeps tests isolated from each other.
pub struct ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// HTTP client used for every outbound call.
	pub http_client: Arc<C>,
	/// Store holding the session access token.
	pub store: Arc<dyn SessionStore>,
	/// Backend location and behavior knobs.
	pub config: ClientConfig,
	/// Shared counters for refresh and retry activity.
	pub metrics: Arc<SessionMetrics>,
}
impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(
		config: ClientConfig,
		store: Arc<dyn SessionStore>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self { http_client: http_client.into(), store, config, metrics: Default::default() }
	}

	/// Returns the stored access token, if any.
	pub async fn token(&self) -> Result<Option<AccessToken>> {
		Ok(self.store.load().await?)
	}

	/// Returns `true` when a token is stored.
	pub async fn has_session(&self) -> Result<bool> {
		Ok(self.token().await?.is_some())
	}

	/// Sends a request through the single refresh-and-retry pipeline.
	///
	/// Non-401 responses, including other errors, are returned unchanged for the caller to
	/// interpret. Only transport and local failures surface as `Err`.
	pub async fn send(&self, request: ApiRequest) -> Result<HttpResponse> {
		const KIND: CallKind = CallKind::Request;

		let span = CallSpan::new(KIND, "send");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.send_recovering(&request)).await;

		record_result(KIND, &result);

		result
	}

	/// Sends a request exactly once; a 401 is returned as-is.
	pub async fn send_once(&self, request: ApiRequest) -> Result<HttpResponse> {
		self.send(request.without_retry()).await
	}

	/// Exchanges the ambient session credential for a new access token.
	///
	/// The call never fails: on any failure the stored token is cleared and
	/// [`RefreshOutcome::Failed`] is returned so the caller can decide whether the user is
	/// logged out. If the store refuses the clear, the failure is reported as
	/// [`RefreshFailure::NotCleared`].
	pub async fn refresh(&self) -> RefreshOutcome {
		const KIND: CallKind = CallKind::Refresh;

		let span = CallSpan::new(KIND, "refresh");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);
		self.metrics.record_refresh_attempt();

		let outcome = span.instrument(self.request_token()).await;

		match outcome {
			Ok(token) => {
				self.metrics.record_refresh_success();
				obs::record_call_outcome(KIND, CallOutcome::Success);

				RefreshOutcome::Refreshed(token)
			},
			Err(failure) => {
				#[cfg(feature = "tracing")]
				tracing::warn!(%failure, "Silent refresh failed.");

				self.metrics.record_refresh_failure();
				obs::record_call_outcome(KIND, CallOutcome::Failure);

				match self.store.clear().await {
					Ok(()) => {
						obs::record_session_cleared(ClearReason::RefreshFailed);

						RefreshOutcome::Failed(failure)
					},
					Err(error) => {
						#[cfg(feature = "tracing")]
						tracing::warn!(
							%error,
							"Stale token could not be cleared after a failed refresh."
						);

						RefreshOutcome::Failed(RefreshFailure::NotCleared {
							cause: Box::new(failure),
							error,
						})
					},
				}
			},
		}
	}

	async fn send_recovering(&self, request: &ApiRequest) -> Result<HttpResponse> {
		let first = self.dispatch(request).await?;

		if first.status() != StatusCode::UNAUTHORIZED {
			return Ok(first);
		}

		match request.retry {
			RetryPolicy::Never => Ok(first),
			RetryPolicy::Once => self.recover(request, first).await,
		}
	}

	async fn request_token(&self) -> Result<AccessToken, RefreshFailure> {
		#[derive(Deserialize)]
		#[serde(rename_all = "camelCase")]
		struct RefreshBody {
			access_token: Option<String>,
		}

		let request = ApiRequest::post(self.config.endpoint(["auth", "refresh-token"])).public();
		let response = self
			.dispatch(&request)
			.await
			.map_err(|e| RefreshFailure::Unavailable { reason: e.to_string() })?;

		if !response.status().is_success() {
			return Err(RefreshFailure::Rejected { status: response.status().as_u16() });
		}

		let token = response::parse_json::<RefreshBody>(&response)
			.map_err(|e| RefreshFailure::Unavailable { reason: e.to_string() })?
			.access_token
			.filter(|token| !token.is_empty())
			.map(AccessToken::new)
			.ok_or_else(|| RefreshFailure::Unavailable {
				reason: "refresh response is missing accessToken".into(),
			})?;

		self.store
			.save(token.clone())
			.await
			.map_err(|e| RefreshFailure::Unavailable { reason: e.to_string() })?;

		Ok(token)
	}

	/// Issues `request` once with the stored token.
	pub(crate) async fn dispatch(&self, request: &ApiRequest) -> Result<HttpResponse> {
		let token = match request.auth {
			AuthMode::Bearer => self.store.load().await?,
			AuthMode::Public => None,
		};

		self.dispatch_with(request, token.as_ref()).await
	}

	/// Refreshes once and, on success, resends `request` once with the new token.
	///
	/// Returns `rejected` when no token could be obtained, or the store error when the stale
	/// token could not be dropped either. The resend is a plain dispatch and is returned
	/// whatever its status.
	pub(crate) async fn recover(
		&self,
		request: &ApiRequest,
		rejected: HttpResponse,
	) -> Result<HttpResponse> {
		const KIND: CallKind = CallKind::Retry;

		let token = match self.refresh().await {
			RefreshOutcome::Refreshed(token) => token,
			RefreshOutcome::Failed(RefreshFailure::NotCleared { error, .. }) =>
				return Err(error.into()),
			RefreshOutcome::Failed(_) => return Ok(rejected),
		};

		self.metrics.record_retry();
		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = CallSpan::new(KIND, "recover")
			.instrument(self.dispatch_with(request, Some(&token)))
			.await;

		record_result(KIND, &result);

		result
	}

	pub(crate) async fn clear_session(&self, reason: ClearReason) -> Result<()> {
		self.store.clear().await?;
		obs::record_session_cleared(reason);

		Ok(())
	}

	async fn dispatch_with(
		&self,
		request: &ApiRequest,
		token: Option<&AccessToken>,
	) -> Result<HttpResponse> {
		let outbound = build_http_request(request, token)?;

		self.http_client
			.execute(outbound)
			.await
			.map_err(|e| Error::from(TransportError::network(e)))
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestHttpClient> {
	/// Creates a client backed by a cookie-aware reqwest transport.
	pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
		Ok(Self::with_http_client(config, store, ReqwestHttpClient::new()?))
	}
}
impl<C> Clone for ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			store: self.store.clone(),
			config: self.config.clone(),
			metrics: self.metrics.clone(),
		}
	}
}
impl<C> Debug for ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("base_url", &self.config.base_url.as_str())
			.field("metrics", &self.metrics)
			.finish()
	}
}

/// Builds the outbound request: caller headers first, then the client defaults on top.
///
/// `Content-Type: application/json` is set for every non-multipart body and removed for
/// multipart ones, so the transport can write the boundary. `Authorization` is set only when
/// a token is supplied.
pub(crate) fn build_http_request(
	request: &ApiRequest,
	token: Option<&AccessToken>,
) -> Result<HttpRequest> {
	let mut headers = request.headers.clone();

	if request.body.is_multipart() {
		headers.remove(header::CONTENT_TYPE);
	} else {
		headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
	}

	match token {
		Some(token) => {
			headers.insert(header::AUTHORIZATION, token.bearer_header()?);
		},
		None => {
			headers.remove(header::AUTHORIZATION);
		},
	}

	let mut outbound = ::http::Request::builder()
		.method(request.method.clone())
		.uri(request.url.as_str())
		.body(request.body.clone())
		.map_err(ConfigError::from)?;

	*outbound.headers_mut() = headers;

	Ok(outbound)
}

fn record_result<T>(kind: CallKind, result: &Result<T>) {
	match result {
		Ok(_) => obs::record_call_outcome(kind, CallOutcome::Success),
		Err(_) => obs::record_call_outcome(kind, CallOutcome::Failure),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::http::{FileUpload, MultipartForm, RequestBody};

	fn url() -> Url {
		Url::parse("https://shop.example.com/api/products").expect("Fixture URL should parse.")
	}

	#[test]
	fn defaults_override_caller_headers() {
		let request = ApiRequest::post(url())
			.header(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"))
			.header(header::AUTHORIZATION, HeaderValue::from_static("Bearer forged"))
			.header(header::ACCEPT_LANGUAGE, HeaderValue::from_static("fr"));
		let token = AccessToken::new("T1");
		let outbound =
			build_http_request(&request, Some(&token)).expect("Request should build.");
		let headers = outbound.headers();

		assert_eq!(headers[header::CONTENT_TYPE], "application/json");
		assert_eq!(headers[header::AUTHORIZATION], "Bearer T1");
		assert_eq!(headers[header::ACCEPT_LANGUAGE], "fr");
		assert_eq!(outbound.method(), Method::POST);
		assert_eq!(outbound.uri(), "https://shop.example.com/api/products");
	}

	#[test]
	fn multipart_drops_content_type_and_missing_token_drops_auth() {
		let form = MultipartForm::new().file("file", FileUpload::new("cover.png", vec![1]));
		let request = ApiRequest::post(url())
			.header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))
			.header(header::AUTHORIZATION, HeaderValue::from_static("Bearer stale"))
			.body(form);
		let outbound = build_http_request(&request, None).expect("Request should build.");

		assert!(outbound.headers().get(header::CONTENT_TYPE).is_none());
		assert!(outbound.headers().get(header::AUTHORIZATION).is_none());
		assert!(outbound.body().is_multipart());
	}

	#[test]
	fn public_requests_never_retry() {
		let request = ApiRequest::get(url()).public();

		assert_eq!(request.auth, AuthMode::Public);
		assert_eq!(request.retry, RetryPolicy::Never);
		assert!(matches!(request.body, RequestBody::Empty));
	}
}
