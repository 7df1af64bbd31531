// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest, Download, response},
	http::ApiHttpClient,
	model::{
		Acknowledgement, DownloadLinks, Order, OrderLine, OrderStatus, ProductDownload,
		ShippingAddress,
	},
};

const NO_DOWNLOAD_LINK: &str = "No download link is available.";

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Places an order.
	pub async fn create_order(
		&self,
		items: &[OrderLine],
		shipping_address: Option<&ShippingAddress>,
	) -> Result<Order> {
		#[derive(Serialize)]
		#[serde(rename_all = "camelCase")]
		struct Body<'a> {
			items: &'a [OrderLine],
			#[serde(skip_serializing_if = "Option::is_none")]
			shipping_address: Option<&'a ShippingAddress>,
		}

		let request = ApiRequest::post(self.config.endpoint(["orders"]))
			.json(&Body { items, shipping_address })?;

		self.fetch(request, "Failed to create the order.").await
	}

	/// Submits payment details for an order; the payload is provider specific.
	pub async fn process_payment(
		&self,
		order_id: &str,
		payment: &serde_json::Value,
	) -> Result<serde_json::Value> {
		let request =
			ApiRequest::post(self.config.endpoint(["orders", order_id, "payment"])).json(payment)?;

		self.fetch(request, "Payment failed.").await
	}

	/// Lists the signed-in account's orders (all orders for administrators).
	pub async fn orders(&self) -> Result<Vec<Order>> {
		let request = ApiRequest::get(self.config.endpoint(["orders"]));

		self.fetch(request, "Failed to load orders.").await
	}

	/// Fetches one order.
	pub async fn order(&self, id: &str) -> Result<Order> {
		let request = ApiRequest::get(self.config.endpoint(["orders", id]));

		self.fetch(request, "Failed to load the order.").await
	}

	/// Moves an order to `status`.
	pub async fn update_order_status(&self, id: &str, status: OrderStatus) -> Result<Order> {
		#[derive(Serialize)]
		struct Body {
			status: OrderStatus,
		}

		let request =
			ApiRequest::put(self.config.endpoint(["orders", id, "status"])).json(&Body { status })?;

		self.fetch(request, "Failed to update the order status.").await
	}

	/// Emails the buyer their download links.
	pub async fn send_delivery_email(&self, order_id: &str) -> Result<Acknowledgement> {
		let request = ApiRequest::post(self.config.endpoint(["orders", order_id, "delivery"]));

		self.acknowledge(request, "Failed to send the delivery email.").await
	}

	/// Deletes an order.
	pub async fn delete_order(&self, id: &str) -> Result<()> {
		let request = ApiRequest::delete(self.config.endpoint(["orders", id]));

		self.execute(request, "Failed to delete the order.").await
	}

	/// Returns the download URL for a purchased product.
	///
	/// Multi-file responses (`downloads[0].downloadUrl`) win over the legacy `downloadUrl`.
	pub async fn download_link(&self, order_id: &str, product_id: &str) -> Result<String> {
		let request = self.download_request(order_id, product_id);
		let response = self.send(request).await?;
		let links = response::decode::<DownloadLinks>(&response, "Download failed.")?;

		links.into_first().ok_or_else(|| Error::Api {
			status: response.status().as_u16(),
			message: NO_DOWNLOAD_LINK.into(),
		})
	}

	/// Downloads a purchased product, or returns the link when the backend answers with one.
	///
	/// Fails without calling the backend when no session is stored.
	pub async fn download_product(
		&self,
		order_id: &str,
		product_id: &str,
	) -> Result<ProductDownload> {
		if !self.has_session().await? {
			return Err(Error::Unauthorized {
				message: "Not signed in: no access token is stored.".into(),
			});
		}

		let request = self.download_request(order_id, product_id);
		let response = self.send(request).await?;

		response::ensure_success(&response, "Download failed.")?;

		if response::is_json(&response) {
			let links = response::parse_json::<DownloadLinks>(&response)?;

			return links.into_first().map(ProductDownload::Link).ok_or_else(|| Error::Api {
				status: response.status().as_u16(),
				message: NO_DOWNLOAD_LINK.into(),
			});
		}

		Ok(ProductDownload::File(Download::from_response(response)))
	}

	/// Exports the order receipt as a file.
	pub async fn export_receipt(&self, order_id: &str) -> Result<Download> {
		let request = ApiRequest::get(self.config.endpoint(["orders", order_id, "receipt"]));
		let response = self.send(request).await?;

		response::ensure_success(&response, "Failed to export the receipt.")?;

		Ok(Download::from_response(response))
	}

	/// Emails the order receipt to the buyer.
	pub async fn email_receipt(&self, order_id: &str) -> Result<Acknowledgement> {
		let request = ApiRequest::post(self.config.endpoint(["orders", order_id, "email-receipt"]));

		self.acknowledge(request, "Failed to email the receipt.").await
	}

	fn download_request(&self, order_id: &str, product_id: &str) -> ApiRequest {
		ApiRequest::get(self.config.endpoint(["orders", order_id, "download", product_id]))
	}
}
