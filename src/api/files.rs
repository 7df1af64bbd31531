// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	http::{ApiHttpClient, FileUpload, MultipartForm},
	model::{Acknowledgement, DriveFile, DriveLink, GeneratedLink, LinkOptions, LocalFile},
};

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Uploads a file to the backend's local storage.
	pub async fn upload_local_file(&self, file: FileUpload) -> Result<LocalFile> {
		let request = ApiRequest::post(self.config.endpoint(["local-files"]))
			.body(MultipartForm::new().file("file", file));

		self.fetch_envelope(request, "File upload failed.").await
	}

	/// Lists files in the backend's local storage.
	pub async fn local_files(&self) -> Result<Vec<LocalFile>> {
		let request = ApiRequest::get(self.config.endpoint(["local-files"]));

		self.fetch_envelope(request, "Failed to load files.").await
	}

	/// Lists files on the backend's Drive.
	pub async fn drive_files(&self) -> Result<Vec<DriveFile>> {
		let request = ApiRequest::get(self.config.endpoint(["files"]));

		self.fetch_envelope(request, "Failed to load Drive files.").await
	}

	/// Checks that a Drive file exists and is accessible to the backend.
	pub async fn check_drive_file(&self, file_id: &str) -> Result<DriveFile> {
		let request = ApiRequest::get(self.config.endpoint(["files", file_id, "check"]));

		self.fetch_envelope(request, "File not found or not accessible.").await
	}

	/// Generates a signed download link for a Drive file.
	pub async fn generate_drive_link(
		&self,
		file_id: &str,
		options: &LinkOptions,
	) -> Result<GeneratedLink> {
		let request =
			ApiRequest::post(self.config.endpoint(["generate-link", file_id])).json(options)?;

		self.fetch_envelope(request, "Failed to generate the link.").await
	}

	/// Lists signed download links.
	pub async fn drive_links(&self) -> Result<Vec<DriveLink>> {
		let request = ApiRequest::get(self.config.endpoint(["links"]));

		self.fetch_envelope(request, "Failed to load links.").await
	}

	/// Resets the download counter of a link.
	pub async fn reset_drive_link(&self, token: &str) -> Result<Acknowledgement> {
		let request = ApiRequest::post(self.config.endpoint(["links", token, "reset"]));

		self.acknowledge_envelope(request, "Failed to reset the link.").await
	}

	/// Revokes a link.
	pub async fn revoke_drive_link(&self, token: &str) -> Result<Acknowledgement> {
		let request = ApiRequest::delete(self.config.endpoint(["revoke-link", token]));

		self.acknowledge(request, "Failed to revoke the link.").await
	}
}
