//! Best-effort detection of backend redeployments.
//!
//! [`VersionTracker`] holds the pure comparison logic; [`VersionWatcher`] runs it on a Tokio
//! interval against `GET /api/version`. Polling failures are logged and skipped, never
//! surfaced, and the background task stops when the watcher is dropped.

// crates.io
use tokio::{
	sync::watch,
	task::JoinHandle,
	time::{self, MissedTickBehavior},
};
// self
use crate::{
	_prelude::*,
	client::ApiClient,
	http::ApiHttpClient,
	model::BackendVersion,
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Notice that the backend now reports a different build than the first one observed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateNotice {
	/// Build observed when tracking started.
	pub current: BackendVersion,
	/// Build the backend reports now.
	pub available: BackendVersion,
}

/// Compares polled backend versions against the first one observed.
#[derive(Clone, Debug, Default)]
pub struct VersionTracker {
	baseline: Option<BackendVersion>,
}
impl VersionTracker {
	/// Creates a tracker with no baseline.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the first version observed, if any.
	pub fn baseline(&self) -> Option<&BackendVersion> {
		self.baseline.as_ref()
	}

	/// Records a polled version.
	///
	/// The first observation becomes the baseline and never produces a notice. Later
	/// observations produce a notice when they report a different, non-empty `version` or
	/// `builtAt`. The baseline is kept, so a changed backend keeps producing notices.
	pub fn observe(&mut self, version: BackendVersion) -> Option<UpdateNotice> {
		let Some(current) = self.baseline.as_ref() else {
			self.baseline = Some(version);

			return None;
		};

		current
			.differs_from(&version)
			.then(|| UpdateNotice { current: current.clone(), available: version })
	}
}

/// Handle to a background version poller.
///
/// Dropping the handle aborts the task.
#[derive(Debug)]
pub struct VersionWatcher {
	notices: watch::Receiver<Option<UpdateNotice>>,
	task: JoinHandle<()>,
}
impl VersionWatcher {
	/// Returns the latest update notice, if a redeployment has been detected.
	pub fn update(&self) -> Option<UpdateNotice> {
		self.notices.borrow().clone()
	}

	/// Waits until a new update notice is published.
	///
	/// Returns `None` once the poller has stopped.
	pub async fn changed(&mut self) -> Option<UpdateNotice> {
		self.notices.changed().await.ok()?;

		self.notices.borrow_and_update().clone()
	}
}
impl Drop for VersionWatcher {
	fn drop(&mut self) {
		self.task.abort();
	}
}

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Starts polling the backend version every
	/// [`version_poll_interval`](crate::config::ClientConfig::version_poll_interval).
	///
	/// The first poll runs immediately and sets the baseline. Must be called from within a
	/// Tokio runtime.
	pub fn watch_version(&self) -> VersionWatcher {
		let (sender, notices) = watch::channel(None);
		let client = self.clone();
		let task = tokio::spawn(async move {
			let mut interval = time::interval(client.config.version_poll_interval);
			let mut tracker = VersionTracker::new();

			interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

			loop {
				interval.tick().await;

				let Some(version) = client.check_version().await else { continue };

				if let Some(notice) = tracker.observe(version) {
					sender.send_if_modified(|latest| {
						if latest.as_ref() == Some(&notice) {
							return false;
						}

						#[cfg(feature = "tracing")]
						tracing::info!(
							available = ?notice.available.version,
							"Backend redeployment detected."
						);

						*latest = Some(notice);

						true
					});
				}
			}
		});

		VersionWatcher { notices, task }
	}

	async fn check_version(&self) -> Option<BackendVersion> {
		const KIND: CallKind = CallKind::VersionCheck;

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		match CallSpan::new(KIND, "watch_version").instrument(self.backend_version()).await {
			Ok(version) => {
				obs::record_call_outcome(KIND, CallOutcome::Success);

				Some(version)
			},
			Err(_e) => {
				#[cfg(feature = "tracing")]
				tracing::debug!(error = %_e, "Version check failed.");

				obs::record_call_outcome(KIND, CallOutcome::Failure);

				None
			},
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn version(version: &str, built_at: &str) -> BackendVersion {
		BackendVersion { version: Some(version.into()), built_at: Some(built_at.into()) }
	}

	#[test]
	fn first_observation_sets_the_baseline() {
		let mut tracker = VersionTracker::new();

		assert_eq!(tracker.observe(version("1.0.0", "a")), None);
		assert_eq!(tracker.baseline(), Some(&version("1.0.0", "a")));
		assert_eq!(tracker.observe(version("1.0.0", "a")), None);
	}

	#[test]
	fn rebuild_with_same_version_is_reported() {
		let mut tracker = VersionTracker::new();

		tracker.observe(version("1.0.0", "a"));

		let notice = tracker.observe(version("1.0.0", "b")).expect("Rebuild should be reported.");

		assert_eq!(notice.current, version("1.0.0", "a"));
		assert_eq!(notice.available, version("1.0.0", "b"));
		// Baseline stays put so the notice persists.
		assert!(tracker.observe(version("1.0.0", "b")).is_some());
	}

	#[test]
	fn empty_fields_are_not_a_change() {
		let mut tracker = VersionTracker::new();

		tracker.observe(version("1.0.0", "a"));

		assert_eq!(tracker.observe(BackendVersion::default()), None);
	}
}
