//! Thread-safe in-memory [`SessionStore`] for tests and short-lived processes.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	store::{SessionStore, StoreFuture},
};

/// Keeps the session token in-process; each instance is an independent session.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Arc<RwLock<Option<AccessToken>>>);
impl MemoryStore {
	/// Creates a store that already holds `token`.
	pub fn with_token(token: AccessToken) -> Self {
		Self(Arc::new(RwLock::new(Some(token))))
	}

	/// Returns the current token without going through the async contract.
	pub fn snapshot(&self) -> Option<AccessToken> {
		self.0.read().clone()
	}
}
impl SessionStore for MemoryStore {
	fn load(&self) -> StoreFuture<'_, Option<AccessToken>> {
		let slot = self.0.clone();

		Box::pin(async move { Ok(slot.read().clone()) })
	}

	fn save(&self, token: AccessToken) -> StoreFuture<'_, ()> {
		let slot = self.0.clone();

		Box::pin(async move {
			*slot.write() = Some(token);

			Ok(())
		})
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		let slot = self.0.clone();

		Box::pin(async move {
			slot.write().take();

			Ok(())
		})
	}
}
