// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	http::{ApiHttpClient, FileUpload, MultipartForm},
	model::{Product, ProductInput},
};

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Lists the catalog.
	pub async fn products(&self) -> Result<Vec<Product>> {
		let request = ApiRequest::get(self.config.endpoint(["products"])).public();

		self.fetch(request, "Failed to load products.").await
	}

	/// Fetches one product.
	pub async fn product(&self, id: &str) -> Result<Product> {
		let request = ApiRequest::get(self.config.endpoint(["products", id])).public();

		self.fetch(request, "Failed to load the product.").await
	}

	/// Creates a product from JSON fields.
	pub async fn create_product(&self, input: &ProductInput) -> Result<Product> {
		let request = ApiRequest::post(self.config.endpoint(["products"])).json(input)?;

		self.fetch(request, "Failed to create the product.").await
	}

	/// Creates a product from a multipart form, e.g. fields plus a cover image.
	pub async fn create_product_multipart(&self, form: MultipartForm) -> Result<Product> {
		let request = ApiRequest::post(self.config.endpoint(["products"])).body(form);

		self.fetch(request, "Failed to create the product.").await
	}

	/// Applies a partial update to a product.
	pub async fn update_product(&self, id: &str, input: &ProductInput) -> Result<Product> {
		let request = ApiRequest::put(self.config.endpoint(["products", id])).json(input)?;

		self.fetch(request, "Failed to update the product.").await
	}

	/// Deletes a product.
	pub async fn delete_product(&self, id: &str) -> Result<()> {
		let request = ApiRequest::delete(self.config.endpoint(["products", id]));

		self.execute(request, "Failed to delete the product.").await
	}

	/// Uploads an image and returns its absolute URL on the backend.
	pub async fn upload_image(&self, image: FileUpload) -> Result<Url> {
		#[derive(Deserialize)]
		struct Stored {
			path: String,
		}

		let request = ApiRequest::post(self.config.endpoint(["local-files"]))
			.body(MultipartForm::new().file("file", image));
		let stored = self.fetch_envelope::<Stored>(request, "Image upload failed.").await?;

		Ok(self.config.asset_url(&stored.path))
	}

	/// Attaches uploaded files to a product.
	pub async fn attach_product_files<I>(&self, product_id: &str, file_ids: I) -> Result<Product>
	where
		I: IntoIterator,
		I::Item: Into<String>,
	{
		#[derive(Serialize)]
		#[serde(rename_all = "camelCase")]
		struct Body {
			file_ids: Vec<String>,
		}

		let body = Body { file_ids: file_ids.into_iter().map(Into::into).collect() };
		let request =
			ApiRequest::post(self.config.endpoint(["products", product_id, "files"])).json(&body)?;

		self.fetch(request, "Failed to attach the files.").await
	}

	/// Detaches one file from a product.
	pub async fn detach_product_file(&self, product_id: &str, file_id: &str) -> Result<Product> {
		let request =
			ApiRequest::delete(self.config.endpoint(["products", product_id, "files", file_id]));

		self.fetch(request, "Failed to detach the file.").await
	}
}
