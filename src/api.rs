//! Typed storefront endpoints layered on [`ApiClient`].
//!
//! Public endpoints are dispatched once without credentials. Protected endpoints go through
//! [`ApiClient::send`], so each of them costs at most one refresh and one resend on 401.
//! Every endpoint maps failures through the same normalization: the server's `message` (or
//! `error`) when present, otherwise the endpoint's fallback text.

mod account;
mod admin;
mod catalog;
mod files;
mod orders;

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest, response},
	http::ApiHttpClient,
	model::{Acknowledgement, BackendVersion, ContactMessage},
};

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Submits the public contact form.
	pub async fn send_contact_form(&self, message: &ContactMessage) -> Result<Acknowledgement> {
		let request = ApiRequest::post(self.config.endpoint(["contact"])).public().json(message)?;

		self.acknowledge(request, "Failed to send the message.").await
	}

	/// Fetches the backend build identity.
	pub async fn backend_version(&self) -> Result<BackendVersion> {
		let request = ApiRequest::get(self.config.endpoint(["version"])).public();

		self.fetch(request, "Failed to fetch the backend version.").await
	}

	async fn fetch<T>(&self, request: ApiRequest, fallback: &str) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let response = self.send(request).await?;

		response::decode(&response, fallback)
	}

	async fn fetch_envelope<T>(&self, request: ApiRequest, fallback: &str) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let response = self.send(request).await?;

		response::decode_envelope(&response, fallback)
	}

	async fn execute(&self, request: ApiRequest, fallback: &str) -> Result<()> {
		let response = self.send(request).await?;

		response::ensure_success(&response, fallback)
	}

	async fn acknowledge(&self, request: ApiRequest, fallback: &str) -> Result<Acknowledgement> {
		let response = self.send(request).await?;

		response::acknowledge(&response, fallback)
	}

	async fn acknowledge_envelope(
		&self,
		request: ApiRequest,
		fallback: &str,
	) -> Result<Acknowledgement> {
		let response = self.send(request).await?;

		response::acknowledge_envelope(&response, fallback)
	}
}
