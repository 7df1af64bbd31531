//! Dashboard, contact, notification, and version documents.

// self
use crate::_prelude::*;

/// Aggregates shown on the admin dashboard.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
	/// Units sold.
	#[serde(default)]
	pub total_sales: u64,
	/// Revenue.
	#[serde(default)]
	pub total_revenue: f64,
	/// Orders placed.
	#[serde(default)]
	pub total_orders: u64,
	/// Products in the catalog.
	#[serde(default)]
	pub total_products: u64,
}

/// Public contact form submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
	/// Sender name.
	pub name: String,
	/// Reply-to address.
	pub email: String,
	/// Subject line.
	pub subject: String,
	/// Message body.
	pub message: String,
}

/// Notification template exercised by the admin test email.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
	/// Purchase confirmation sent to the buyer.
	PurchaseConfirmation,
	/// Sale notice sent to the vendor.
	VendorSaleNotification,
	/// Download-ready notice with the buyer's links.
	DownloadReady,
}

/// Backend build identity polled by the version watcher.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendVersion {
	/// Release version.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub version: Option<String>,
	/// Build identifier, typically a timestamp.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub built_at: Option<String>,
}
impl BackendVersion {
	/// Returns `true` when `other` reports a different, non-empty version or build.
	///
	/// Missing fields on `other` never count as a change.
	pub fn differs_from(&self, other: &Self) -> bool {
		fn changed(current: Option<&str>, next: Option<&str>) -> bool {
			match next {
				Some(next) if !next.is_empty() => current != Some(next),
				_ => false,
			}
		}

		changed(self.version.as_deref(), other.version.as_deref())
			|| changed(self.built_at.as_deref(), other.built_at.as_deref())
	}
}
