//! Orders, checkout payloads, and order downloads.

// self
use crate::{
	_prelude::*,
	client::Download,
	model::{Product, Reference, User},
};

/// Order lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
	/// Created, awaiting payment.
	Pending,
	/// Payment captured.
	Paid,
	/// Handed to the carrier.
	Shipped,
	/// Delivered to the customer.
	Delivered,
	/// Cancelled.
	Cancelled,
}
impl OrderStatus {
	/// Returns the wire name of the status.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Pending => "pending",
			Self::Paid => "paid",
			Self::Shipped => "shipped",
			Self::Delivered => "delivered",
			Self::Cancelled => "cancelled",
		}
	}
}
impl Display for OrderStatus {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Customer order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
	/// Document id.
	#[serde(rename = "_id")]
	pub id: String,
	/// Buyer, by id or populated.
	pub user: Reference<User>,
	/// Ordered lines.
	#[serde(default)]
	pub items: Vec<OrderItem>,
	/// Order total.
	pub total_amount: f64,
	/// Lifecycle state.
	pub status: OrderStatus,
	/// Payment provider reference.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub stripe_payment_id: Option<String>,
	/// Delivery address for physical goods.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub shipping_address: Option<ShippingAddress>,
	/// Creation timestamp.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
	/// Last update timestamp.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub updated_at: Option<OffsetDateTime>,
}

/// Line of an [`Order`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
	/// Product, by id or populated.
	pub product: Reference<Product>,
	/// Ordered quantity.
	pub quantity: u32,
	/// Unit price at checkout time.
	pub price: f64,
}

/// Postal delivery address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
	/// Street line.
	pub street: String,
	/// City.
	pub city: String,
	/// Postal code.
	pub postal_code: String,
	/// Country.
	pub country: String,
}

/// Line submitted at checkout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
	/// Product id.
	pub product_id: String,
	/// Quantity to buy.
	pub quantity: u32,
}
impl OrderLine {
	/// Creates a checkout line.
	pub fn new(product: impl Into<String>, quantity: u32) -> Self {
		Self { product_id: product.into(), quantity }
	}
}

/// Result of [`download_product`](crate::client::ApiClient::download_product).
///
/// The download endpoint either streams the file or answers with a JSON link to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProductDownload {
	/// File streamed by the backend.
	File(Download),
	/// Link to fetch the file from.
	Link(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DownloadLinks {
	#[serde(default)]
	downloads: Vec<DownloadEntry>,
	#[serde(default)]
	download_url: Option<String>,
}
impl DownloadLinks {
	/// Picks the first multi-file link, falling back to the legacy single-file field.
	pub(crate) fn into_first(self) -> Option<String> {
		self.downloads
			.into_iter()
			.next()
			.and_then(|entry| entry.download_url)
			.filter(|url| !url.is_empty())
			.or(self.download_url.filter(|url| !url.is_empty()))
	}
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DownloadEntry {
	#[serde(default)]
	download_url: Option<String>,
}
