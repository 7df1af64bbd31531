//! Session store contracts and built-in implementations for the access token.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{_prelude::*, auth::AccessToken};

/// Boxed future returned by [`SessionStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Persistence contract for the single session access token.
///
/// A store holds at most one token. Writes replace the previous value wholesale, so concurrent
/// refreshes resolve to whichever token was saved last.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Returns the stored token, if any.
	fn load(&self) -> StoreFuture<'_, Option<AccessToken>>;

	/// Persists or replaces the stored token.
	fn save(&self, token: AccessToken) -> StoreFuture<'_, ()>;

	/// Deletes the stored token; succeeds when nothing is stored.
	fn clear(&self) -> StoreFuture<'_, ()>;
}

/// Error type produced by [`SessionStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
