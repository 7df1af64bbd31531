// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	http::ApiHttpClient,
	model::{Acknowledgement, DashboardStats, NotificationKind, Order, Role, User},
};

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Lists every account.
	pub async fn users(&self) -> Result<Vec<User>> {
		let request = ApiRequest::get(self.config.endpoint(["users"]));

		self.fetch(request, "Failed to load users.").await
	}

	/// Deletes an account.
	pub async fn delete_user(&self, id: &str) -> Result<()> {
		let request = ApiRequest::delete(self.config.endpoint(["users", id]));

		self.execute(request, "Failed to delete the user.").await
	}

	/// Changes an account's role.
	pub async fn update_user_role(&self, id: &str, role: Role) -> Result<User> {
		#[derive(Serialize)]
		struct Body {
			role: Role,
		}

		let request =
			ApiRequest::put(self.config.endpoint(["users", id, "role"])).json(&Body { role })?;

		self.fetch(request, "Failed to update the user role.").await
	}

	/// Fetches the dashboard aggregates.
	pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
		let request = ApiRequest::get(self.config.endpoint(["dashboard", "stats"]));

		self.fetch(request, "Failed to load dashboard statistics.").await
	}

	/// Lists orders as shown on the dashboard.
	pub async fn dashboard_orders(&self) -> Result<Vec<Order>> {
		let request = ApiRequest::get(self.config.endpoint(["dashboard", "orders"]));

		self.fetch(request, "Failed to load dashboard orders.").await
	}

	/// Sends a test notification email, optionally rendered against a real order.
	pub async fn send_test_email(
		&self,
		kind: NotificationKind,
		order_id: Option<&str>,
	) -> Result<Acknowledgement> {
		#[derive(Serialize)]
		#[serde(rename_all = "camelCase")]
		struct Body<'a> {
			r#type: NotificationKind,
			#[serde(skip_serializing_if = "Option::is_none")]
			order_id: Option<&'a str>,
		}

		let request = ApiRequest::post(self.config.endpoint(["notifications", "test"]))
			.json(&Body { r#type: kind, order_id })?;

		self.acknowledge(request, "Failed to send the test email.").await
	}
}
