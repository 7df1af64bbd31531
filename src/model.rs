//! Wire documents exchanged with the storefront backend.
//!
//! JSON is camelCase, document ids arrive as `_id`, and timestamps are RFC 3339. Fields the
//! backend omits on some endpoints are optional or defaulted so partial documents still decode.

pub mod account;
pub mod catalog;
pub mod files;
pub mod order;
pub mod system;

pub use account::*;
pub use catalog::*;
pub use files::*;
pub use order::*;
pub use system::*;

// self
use crate::_prelude::*;

/// Field that is either a document id or the expanded document.
///
/// Order documents reference users and products by id unless the backend populated them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<T> {
	/// Bare document id.
	Id(String),
	/// Populated document.
	Expanded(Box<T>),
}
impl<T> Reference<T> {
	/// Returns the populated document, if present.
	pub fn expanded(&self) -> Option<&T> {
		match self {
			Self::Id(_) => None,
			Self::Expanded(document) => Some(document),
		}
	}
}

/// Generic `{ message }` acknowledgement returned by command endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
	/// Backend confirmation message, when supplied.
	#[serde(default)]
	pub message: Option<String>,
}
