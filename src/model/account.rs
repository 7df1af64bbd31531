//! Accounts, sessions, and the payloads of the account endpoints.

// self
use crate::{_prelude::*, auth::AccessToken};

/// Account role.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	/// Regular customer.
	#[default]
	User,
	/// Back-office administrator.
	Admin,
}
impl Role {
	/// Returns the wire name of the role.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::User => "user",
			Self::Admin => "admin",
		}
	}
}
impl Display for Role {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Storefront account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	/// Document id.
	#[serde(rename = "_id")]
	pub id: String,
	/// Display name.
	pub name: String,
	/// Login email.
	pub email: String,
	/// Account role.
	#[serde(default)]
	pub role: Role,
	/// Whether the email address has been confirmed.
	#[serde(default)]
	pub is_verified: bool,
	/// Creation timestamp.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
	/// Last update timestamp.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub updated_at: Option<OffsetDateTime>,
}
impl User {
	/// Returns `true` for administrators.
	pub fn is_admin(&self) -> bool {
		self.role == Role::Admin
	}
}

/// Result of a successful login or registration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
	/// Bearer token; already persisted by the client when returned.
	pub access_token: AccessToken,
	/// Authenticated account.
	pub user: User,
}

/// Login credentials.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
	/// Login email.
	pub email: String,
	/// Plain-text password.
	pub password: String,
}
impl Credentials {
	/// Creates credentials for `email`.
	pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
		Self { email: email.into(), password: password.into() }
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// Registration payload.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct NewAccount {
	/// Display name.
	pub name: String,
	/// Login email.
	pub email: String,
	/// Plain-text password.
	pub password: String,
}
impl Debug for NewAccount {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("NewAccount")
			.field("name", &self.name)
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// Partial profile update; unset fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
	/// New display name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// New login email.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
}

/// Password change for the signed-in account.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
	/// Current password.
	pub current_password: String,
	/// Replacement password.
	pub new_password: String,
}
impl Debug for PasswordChange {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("PasswordChange { .. }")
	}
}

/// Password reset using the token mailed by `forgot-password`.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordReset {
	/// Reset token from the email link.
	pub token: String,
	/// Replacement password.
	pub new_password: String,
}
impl Debug for PasswordReset {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("PasswordReset { .. }")
	}
}
