//! Outcome of a silent refresh attempt.

// self
use crate::{_prelude::*, auth::AccessToken, store::StoreError};

/// Result of exchanging the ambient session credential for a new access token.
///
/// A failure is an expected condition, not an error: the stored token has already been
/// cleared and the caller decides whether the user is logged out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
	/// The backend issued a new access token, which is now stored.
	Refreshed(AccessToken),
	/// The refresh did not yield a token; the stored token was cleared.
	Failed(RefreshFailure),
}
impl RefreshOutcome {
	/// Returns the new token, if any.
	pub fn token(&self) -> Option<&AccessToken> {
		match self {
			Self::Refreshed(token) => Some(token),
			Self::Failed(_) => None,
		}
	}

	/// Consumes the outcome and returns the new token, if any.
	pub fn into_token(self) -> Option<AccessToken> {
		match self {
			Self::Refreshed(token) => Some(token),
			Self::Failed(_) => None,
		}
	}
}

/// Why a refresh attempt failed.
///
/// Malformed bodies and network failures share [`RefreshFailure::Unavailable`]. When the
/// stored token could not be dropped afterwards the failure is wrapped in
/// [`RefreshFailure::NotCleared`], since the next request would still carry that token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshFailure {
	/// The refresh endpoint answered with a non-2xx status.
	Rejected {
		/// HTTP status code returned by the refresh endpoint.
		status: u16,
	},
	/// No usable token could be obtained (network failure, malformed body, store failure).
	Unavailable {
		/// Diagnostic reason; safe to log.
		reason: String,
	},
	/// The refresh failed and the session store then refused to drop the stale token.
	NotCleared {
		/// Why the refresh itself failed.
		cause: Box<RefreshFailure>,
		/// Store failure raised while clearing the token.
		error: StoreError,
	},
}
impl RefreshFailure {
	/// Returns the store failure when the stale token is still stored.
	pub fn store_error(&self) -> Option<&StoreError> {
		match self {
			Self::NotCleared { error, .. } => Some(error),
			_ => None,
		}
	}
}
impl Display for RefreshFailure {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Rejected { status } => write!(f, "refresh rejected with status {status}"),
			Self::Unavailable { reason } => write!(f, "refresh unavailable: {reason}"),
			Self::NotCleared { cause, error } =>
				write!(f, "{cause}; the stale token could not be cleared: {error}"),
		}
	}
}
