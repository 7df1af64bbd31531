//! Optional observability helpers for client calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `booklite_client.call` with the `call` and
//!   `stage` (call site) fields, plus info events whenever the session token is cleared.
//! - Enable `metrics` to increment the `booklite_client_call_total` counter for every
//!   attempt/success/failure, labeled by `call` + `outcome`, and the
//!   `booklite_client_session_cleared_total` counter labeled by `reason`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Call kinds observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// First dispatch of an API request.
	Request,
	/// Silent refresh of the access token.
	Refresh,
	/// Single resend after a successful refresh.
	Retry,
	/// Revocation-aware profile fetch.
	Profile,
	/// Background backend version check.
	VersionCheck,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Request => "request",
			CallKind::Refresh => "refresh",
			CallKind::Retry => "retry",
			CallKind::Profile => "profile",
			CallKind::VersionCheck => "version_check",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Reasons the client drops the stored session token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClearReason {
	/// Explicit logout.
	Logout,
	/// Account deletion succeeded.
	AccountDeleted,
	/// Silent refresh failed.
	RefreshFailed,
	/// Backend reported the session as revoked.
	Revoked,
}
impl ClearReason {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ClearReason::Logout => "logout",
			ClearReason::AccountDeleted => "account_deleted",
			ClearReason::RefreshFailed => "refresh_failed",
			ClearReason::Revoked => "revoked",
		}
	}
}
impl Display for ClearReason {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
