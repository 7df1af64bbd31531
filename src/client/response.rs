//! Response normalization: status classification, error bodies, and typed decoding.

// self
use crate::{_prelude::*, config::ClientConfig, http::HttpResponse, model::Acknowledgement};

/// Error document returned by the backend on failures.
///
/// Every field is optional; unparsable bodies produce an empty value so the caller's
/// fallback message is used instead.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
	/// Human-readable message.
	#[serde(default)]
	pub message: Option<String>,
	/// Alternate message or machine code some endpoints emit.
	#[serde(default)]
	pub error: Option<String>,
	/// Machine-readable error code.
	#[serde(default)]
	pub code: Option<String>,
}
impl ErrorBody {
	/// Machine code the backend uses for revoked sessions.
	pub const REVOKED_CODE: &'static str = "token_revoked";

	/// Parses an error document leniently.
	pub fn parse(bytes: &[u8]) -> Self {
		serde_json::from_slice(bytes).unwrap_or_default()
	}

	/// Returns the message to surface, if the backend supplied one.
	pub fn message(&self) -> Option<&str> {
		self.message
			.as_deref()
			.or(self.error.as_deref())
			.map(str::trim)
			.filter(|message| !message.is_empty())
	}

	/// Returns `true` when the body marks the session as revoked.
	pub fn is_revoked(&self, config: &ClientConfig) -> bool {
		let coded = [self.code.as_deref(), self.error.as_deref()]
			.into_iter()
			.flatten()
			.any(|code| code == Self::REVOKED_CODE);
		let marked =
			self.message.as_deref().is_some_and(|message| config.is_revocation_message(message));

		coded || marked
	}
}

/// Envelope used by the file endpoints: `{ success, data, message }`.
#[derive(Clone, Debug, Deserialize)]
pub struct Envelope<T> {
	/// Backend-reported success flag.
	#[serde(default)]
	pub success: bool,
	/// Payload, present on success.
	#[serde(default = "Option::default")]
	pub data: Option<T>,
	/// Optional message.
	#[serde(default)]
	pub message: Option<String>,
}

/// Binary payload returned by download and receipt endpoints.
#[derive(Clone, PartialEq, Eq)]
pub struct Download {
	/// File name from `Content-Disposition`, or a generic default.
	pub file_name: String,
	/// `Content-Type` reported by the backend, when present.
	pub content_type: Option<String>,
	/// Raw payload.
	pub bytes: Vec<u8>,
}
impl Download {
	/// File name used when the backend does not supply one.
	pub const DEFAULT_FILE_NAME: &'static str = "downloaded_file";

	pub(crate) fn from_response(response: HttpResponse) -> Self {
		let headers = response.headers();
		let file_name = headers
			.get(header::CONTENT_DISPOSITION)
			.and_then(|value| value.to_str().ok())
			.and_then(disposition_file_name)
			.unwrap_or_else(|| Self::DEFAULT_FILE_NAME.to_owned());
		let content_type = headers
			.get(header::CONTENT_TYPE)
			.and_then(|value| value.to_str().ok())
			.map(str::to_owned);

		Self { file_name, content_type, bytes: response.into_body() }
	}
}
impl Debug for Download {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Download")
			.field("file_name", &self.file_name)
			.field("content_type", &self.content_type)
			.field("len", &self.bytes.len())
			.finish()
	}
}

/// Maps a non-success response into the client error taxonomy.
pub(crate) fn failure(response: &HttpResponse, fallback: &str) -> Error {
	let status = response.status();
	let body = ErrorBody::parse(response.body());
	let message = body.message().unwrap_or(fallback).to_owned();

	if status == StatusCode::UNAUTHORIZED {
		Error::Unauthorized { message }
	} else if status.is_server_error() {
		Error::Server { status: status.as_u16(), message }
	} else {
		Error::Api { status: status.as_u16(), message }
	}
}

/// Fails unless the response status is 2xx.
pub(crate) fn ensure_success(response: &HttpResponse, fallback: &str) -> Result<()> {
	if response.status().is_success() { Ok(()) } else { Err(failure(response, fallback)) }
}

/// Decodes a 2xx JSON body, normalizing failures.
pub(crate) fn decode<T>(response: &HttpResponse, fallback: &str) -> Result<T>
where
	T: DeserializeOwned,
{
	ensure_success(response, fallback)?;

	parse_json(response)
}

/// Decodes a `{ success, data }` envelope, treating `success: false` as a failure.
pub(crate) fn decode_envelope<T>(response: &HttpResponse, fallback: &str) -> Result<T>
where
	T: DeserializeOwned,
{
	ensure_success(response, fallback)?;

	let envelope = parse_json::<Envelope<T>>(response)?;

	match envelope {
		Envelope { success: true, data: Some(data), .. } => Ok(data),
		Envelope { message, .. } => Err(rejected_envelope(response, message, fallback)),
	}
}

/// Accepts a `{ success, message }` envelope without a payload, failing when `success` is
/// false.
pub(crate) fn acknowledge_envelope(
	response: &HttpResponse,
	fallback: &str,
) -> Result<Acknowledgement> {
	ensure_success(response, fallback)?;

	match parse_json::<Envelope<serde_json::Value>>(response)? {
		Envelope { success: true, message, .. } => Ok(Acknowledgement { message }),
		Envelope { message, .. } => Err(rejected_envelope(response, message, fallback)),
	}
}

/// Accepts any 2xx response, reading an optional `{ message }` body leniently.
pub(crate) fn acknowledge(response: &HttpResponse, fallback: &str) -> Result<Acknowledgement> {
	ensure_success(response, fallback)?;

	Ok(serde_json::from_slice(response.body()).unwrap_or_default())
}

fn rejected_envelope(response: &HttpResponse, message: Option<String>, fallback: &str) -> Error {
	Error::Api {
		status: response.status().as_u16(),
		message: message
			.filter(|message| !message.trim().is_empty())
			.unwrap_or_else(|| fallback.to_owned()),
	}
}

pub(crate) fn parse_json<T>(response: &HttpResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(response.body());

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::Decode { source, status: response.status().as_u16() })
}

pub(crate) fn is_json(response: &HttpResponse) -> bool {
	response
		.headers()
		.get(header::CONTENT_TYPE)
		.and_then(|value| value.to_str().ok())
		.is_some_and(|value| value.to_ascii_lowercase().contains("json"))
}

fn disposition_file_name(disposition: &str) -> Option<String> {
	let (_, rest) = disposition.split_once("filename=")?;
	let name = rest.split(';').next()?.trim().trim_matches('"');

	(!name.is_empty()).then(|| name.to_owned())
}
