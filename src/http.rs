//! Transport primitives for storefront API calls.
//!
//! The module exposes [`ApiHttpClient`] alongside the [`HttpRequest`]/[`HttpResponse`] aliases
//! so downstream crates can plug in custom HTTP stacks. Requests carry a [`RequestBody`] rather
//! than raw bytes: multipart forms stay structured until the transport encodes them, which lets
//! the transport choose the boundary and write the matching `Content-Type` header itself.

// self
use crate::_prelude::*;

/// Outbound request handed to an [`ApiHttpClient`].
pub type HttpRequest = ::http::Request<RequestBody>;
/// Fully buffered response returned by an [`ApiHttpClient`].
pub type HttpResponse = ::http::Response<Vec<u8>>;
/// Boxed future returned by [`ApiHttpClient::execute`].
pub type HttpFuture<'a, E> = Pin<Box<dyn Future<Output = Result<HttpResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing storefront API calls.
///
/// The trait is the client's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so a single transport can be shared by clones of the client and by
/// background tasks such as the version watcher. Implementations must not follow the
/// refresh-and-retry policy themselves; every call to [`execute`](ApiHttpClient::execute) is
/// exactly one network round trip.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Issues `request` and buffers the response body.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError>;
}

/// Body attached to an [`HttpRequest`].
#[derive(Clone, Debug, Default)]
pub enum RequestBody {
	/// No body.
	#[default]
	Empty,
	/// Serialized JSON document.
	Json(Vec<u8>),
	/// Multipart form; the transport owns the boundary and `Content-Type` header.
	Multipart(MultipartForm),
}
impl RequestBody {
	/// Serializes `value` into a JSON body.
	pub fn json<T>(value: &T) -> Result<Self>
	where
		T: ?Sized + Serialize,
	{
		let bytes = serde_json::to_vec(value).map_err(crate::error::ConfigError::from)?;

		Ok(Self::Json(bytes))
	}

	/// Returns `true` for multipart payloads.
	pub fn is_multipart(&self) -> bool {
		matches!(self, Self::Multipart(_))
	}
}
impl From<MultipartForm> for RequestBody {
	fn from(form: MultipartForm) -> Self {
		Self::Multipart(form)
	}
}

/// Transport-agnostic multipart form.
#[derive(Clone, Debug, Default)]
pub struct MultipartForm {
	/// Ordered form parts.
	pub parts: Vec<MultipartPart>,
}
impl MultipartForm {
	/// Creates an empty form.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a plain text field.
	pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.parts.push(MultipartPart {
			name: name.into(),
			file_name: None,
			content_type: None,
			data: value.into().into_bytes(),
		});

		self
	}

	/// Appends a file field.
	pub fn file(mut self, name: impl Into<String>, upload: FileUpload) -> Self {
		self.parts.push(MultipartPart {
			name: name.into(),
			file_name: Some(upload.file_name),
			content_type: upload.content_type,
			data: upload.data,
		});

		self
	}
}

/// Single multipart field.
#[derive(Clone, Debug)]
pub struct MultipartPart {
	/// Form field name.
	pub name: String,
	/// File name reported to the backend, for file fields.
	pub file_name: Option<String>,
	/// MIME type of the part, when known.
	pub content_type: Option<String>,
	/// Raw part payload.
	pub data: Vec<u8>,
}

/// File payload uploaded through multipart endpoints.
#[derive(Clone)]
pub struct FileUpload {
	/// File name reported to the backend.
	pub file_name: String,
	/// MIME type, when known.
	pub content_type: Option<String>,
	/// Raw file bytes.
	pub data: Vec<u8>,
}
impl FileUpload {
	/// Creates an upload without a declared MIME type.
	pub fn new(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
		Self { file_name: file_name.into(), content_type: None, data: data.into() }
	}

	/// Declares the MIME type of the upload.
	pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
		self.content_type = Some(content_type.into());

		self
	}
}
impl Debug for FileUpload {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("FileUpload")
			.field("file_name", &self.file_name)
			.field("content_type", &self.content_type)
			.field("len", &self.data.len())
			.finish()
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// [`ReqwestHttpClient::new`] enables reqwest's cookie store: the refresh endpoint authenticates
/// through the session cookie set at login, independent of the bearer token. Configure any
/// custom [`ReqwestClient`] passed to [`ReqwestHttpClient::with_client`] the same way.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a cookie-aware reqwest client.
	pub fn new() -> Result<Self, crate::error::ConfigError> {
		let client = ReqwestClient::builder().cookie_store(true).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	fn build_request(&self, request: HttpRequest) -> Result<reqwest::Request, ReqwestError> {
		let (parts, body) = request.into_parts();
		let builder =
			self.0.request(parts.method, parts.uri.to_string()).headers(parts.headers);
		let builder = match body {
			RequestBody::Empty => builder,
			RequestBody::Json(bytes) => builder.body(bytes),
			RequestBody::Multipart(form) => builder.multipart(into_reqwest_form(form)?),
		};

		builder.build()
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		Box::pin(async move {
			let request = self.build_request(request)?;
			let response = self.0.execute(request).await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new = HttpResponse::new(response.bytes().await?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

#[cfg(feature = "reqwest")]
fn into_reqwest_form(form: MultipartForm) -> Result<reqwest::multipart::Form, ReqwestError> {
	let mut out = reqwest::multipart::Form::new();

	for part in form.parts {
		let mut field = reqwest::multipart::Part::bytes(part.data);

		if let Some(file_name) = part.file_name {
			field = field.file_name(file_name);
		}
		if let Some(content_type) = part.content_type {
			field = field.mime_str(&content_type)?;
		}

		out = out.part(part.name, field);
	}

	Ok(out)
}
