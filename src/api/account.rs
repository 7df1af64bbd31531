// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest, ErrorBody, response},
	http::ApiHttpClient,
	model::{
		Acknowledgement, AuthSession, Credentials, NewAccount, PasswordChange, PasswordReset,
		ProfileUpdate, User,
	},
	obs::{self, CallKind, CallOutcome, CallSpan, ClearReason},
};

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates an account and stores the issued access token.
	pub async fn register(&self, account: &NewAccount) -> Result<AuthSession> {
		let request =
			ApiRequest::post(self.config.endpoint(["auth", "register"])).public().json(account)?;

		self.open_session(request, "Registration failed.").await
	}

	/// Signs in and stores the issued access token.
	///
	/// The backend also sets the session cookie used by [`ApiClient::refresh`]; the default
	/// reqwest transport keeps it in its cookie jar.
	pub async fn login(&self, credentials: &Credentials) -> Result<AuthSession> {
		let request =
			ApiRequest::post(self.config.endpoint(["auth", "login"])).public().json(credentials)?;

		self.open_session(request, "Login failed.").await
	}

	/// Invalidates the session on the backend and drops the stored token.
	///
	/// The backend call is best effort: its failure is logged and the local token is cleared
	/// regardless. Only a store failure is reported.
	pub async fn logout(&self) -> Result<()> {
		let request = ApiRequest::post(self.config.endpoint(["auth", "logout"])).without_retry();

		match self.send(request).await {
			Ok(response) if !response.status().is_success() => {
				#[cfg(feature = "tracing")]
				tracing::debug!(status = %response.status(), "Backend logout was rejected.");
			},
			Err(_e) => {
				#[cfg(feature = "tracing")]
				tracing::debug!(error = %_e, "Backend logout failed.");
			},
			Ok(_) => (),
		}

		self.clear_session(ClearReason::Logout).await
	}

	/// Fetches the signed-in account.
	///
	/// A 401 whose body reports the session as revoked clears the stored token and yields
	/// [`Error::Revoked`] without attempting a refresh. Any other 401 gets the usual single
	/// refresh-and-retry.
	pub async fn me(&self) -> Result<User> {
		const KIND: CallKind = CallKind::Profile;
		const FALLBACK: &str = "Failed to load the profile.";

		let span = CallSpan::new(KIND, "me");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.fetch_profile(FALLBACK)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// Updates the signed-in account's profile.
	pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
		let request = ApiRequest::put(self.config.endpoint(["auth", "profile"])).json(update)?;

		self.fetch(request, "Failed to update the profile.").await
	}

	/// Deletes the signed-in account and, on success, drops the stored token.
	pub async fn delete_account(&self) -> Result<()> {
		let request = ApiRequest::delete(self.config.endpoint(["auth", "account"]));

		self.execute(request, "Failed to delete the account.").await?;
		self.clear_session(ClearReason::AccountDeleted).await
	}

	/// Changes the signed-in account's password.
	pub async fn change_password(&self, change: &PasswordChange) -> Result<()> {
		let request =
			ApiRequest::put(self.config.endpoint(["users", "change-password"])).json(change)?;

		self.execute(request, "Failed to change the password.").await
	}

	/// Requests a password reset email for `email`.
	pub async fn forgot_password(&self, email: &str) -> Result<Acknowledgement> {
		#[derive(Serialize)]
		struct Body<'a> {
			email: &'a str,
		}

		let request = ApiRequest::post(self.config.endpoint(["auth", "forgot-password"]))
			.public()
			.json(&Body { email })?;

		self.acknowledge(request, "Failed to request a password reset.").await
	}

	/// Sets a new password using the token from the reset email.
	pub async fn reset_password(&self, reset: &PasswordReset) -> Result<Acknowledgement> {
		let request = ApiRequest::post(self.config.endpoint(["auth", "reset-password"]))
			.public()
			.json(reset)?;

		self.acknowledge(request, "Failed to reset the password.").await
	}

	async fn open_session(&self, request: ApiRequest, fallback: &str) -> Result<AuthSession> {
		let session = self.fetch::<AuthSession>(request, fallback).await?;

		self.store.save(session.access_token.clone()).await?;

		Ok(session)
	}

	async fn fetch_profile(&self, fallback: &str) -> Result<User> {
		let request = ApiRequest::get(self.config.endpoint(["auth", "me"]));
		let first = self.dispatch(&request).await?;
		let response = if first.status() == StatusCode::UNAUTHORIZED {
			if ErrorBody::parse(first.body()).is_revoked(&self.config) {
				self.metrics.record_revocation();
				self.clear_session(ClearReason::Revoked).await?;

				return Err(Error::Revoked);
			}

			self.recover(&request, first).await?
		} else {
			first
		};

		response::decode(&response, fallback)
	}
}
