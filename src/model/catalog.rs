//! Products and their file attachments.

// self
use crate::_prelude::*;

/// Catalog product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
	/// Document id.
	#[serde(rename = "_id")]
	pub id: String,
	/// Title.
	pub title: String,
	/// Author.
	#[serde(default)]
	pub author: String,
	/// Long description.
	#[serde(default)]
	pub description: String,
	/// Unit price.
	pub price: f64,
	/// Category label.
	#[serde(default)]
	pub category: String,
	/// Cover image URL or backend-relative path.
	#[serde(default)]
	pub image: String,
	/// Legacy single attachment id.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub file_id: Option<String>,
	/// Legacy single attachment name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub file_name: Option<String>,
	/// Attached deliverables.
	#[serde(default)]
	pub files: Vec<ProductFile>,
	/// Units in stock.
	#[serde(default)]
	pub stock: i64,
	/// Whether the product is listed.
	#[serde(default)]
	pub is_active: bool,
	/// Creation timestamp.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
	/// Last update timestamp.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub updated_at: Option<OffsetDateTime>,
}
impl Product {
	/// Returns the attachment ids, including the legacy single-file field.
	pub fn file_ids(&self) -> Vec<&str> {
		let mut ids = self.files.iter().map(|file| file.file_id.as_str()).collect::<Vec<_>>();

		if let Some(legacy) = self.file_id.as_deref()
			&& !ids.contains(&legacy)
		{
			ids.push(legacy);
		}

		ids
	}
}

/// File attached to a product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFile {
	/// Storage-side file id.
	pub file_id: String,
	/// Original file name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub file_name: Option<String>,
	/// MIME type.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mime_type: Option<String>,
	/// Size as reported by the storage backend.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub size: Option<String>,
	/// Attachment timestamp.
	#[serde(
		default,
		with = "time::serde::rfc3339::option",
		skip_serializing_if = "Option::is_none"
	)]
	pub added_at: Option<OffsetDateTime>,
}

/// Product fields for creation and partial updates; unset fields are omitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
	/// Title.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Author.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub author: Option<String>,
	/// Long description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Unit price.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub price: Option<f64>,
	/// Category label.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
	/// Cover image URL.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub image: Option<String>,
	/// Units in stock.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub stock: Option<i64>,
	/// Whether the product is listed.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub is_active: Option<bool>,
}
