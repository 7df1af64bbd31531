//! Uploaded files, Drive files, and signed download links.

// self
use crate::_prelude::*;

/// File uploaded to the backend's local storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalFile {
	/// Document id.
	#[serde(rename = "_id")]
	pub id: String,
	/// Storage-side file id, used when attaching to products.
	pub file_id: String,
	/// Original file name.
	pub name: String,
	/// Backend-relative path, e.g. `/uploads/cover.png`.
	pub path: String,
}

/// File stored on the backend's Google Drive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
	/// Drive file id.
	pub id: String,
	/// File name.
	pub name: String,
	/// MIME type.
	#[serde(default)]
	pub mime_type: String,
	/// Size as reported by Drive.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub size: Option<String>,
	/// Drive creation time, passed through verbatim.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created_time: Option<String>,
	/// Drive modification time, passed through verbatim.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub modified_time: Option<String>,
	/// Owners, returned by the accessibility check.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub owners: Vec<DriveOwner>,
}

/// Owner entry of a [`DriveFile`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveOwner {
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	/// Email address.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email_address: Option<String>,
}

/// Options for a generated download link; unset fields use backend defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkOptions {
	/// Lifetime of the link in days.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub expiry_days: Option<u32>,
	/// Download cap.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_downloads: Option<u32>,
}

/// Freshly generated signed download link.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedLink {
	/// Link token.
	pub token: String,
	/// Public download URL.
	pub download_url: String,
	/// Expiry instant.
	#[serde(with = "time::serde::rfc3339")]
	pub expires: OffsetDateTime,
	/// Download cap.
	pub max_downloads: u32,
}

/// Signed download link listed by the admin endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveLink {
	/// Link token.
	pub token: String,
	/// Linked Drive file id.
	pub file_id: String,
	/// Linked file name.
	pub file_name: String,
	/// Expiry instant.
	#[serde(with = "time::serde::rfc3339")]
	pub expires: OffsetDateTime,
	/// Download cap.
	pub max_downloads: u32,
	/// Downloads used so far.
	#[serde(default)]
	pub current_downloads: u32,
	/// Creation timestamp.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
}
impl DriveLink {
	/// Returns `true` when the link can still serve a download at `now`.
	pub fn is_usable_at(&self, now: OffsetDateTime) -> bool {
		now < self.expires && self.current_downloads < self.max_downloads
	}
}
