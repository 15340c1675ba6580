//! Store traits consumed by the service layer.

use async_trait::async_trait;

use helphub_core::result::AppResult;
use helphub_core::types::{NotificationId, RequestId, UserId};
use helphub_entity::notification::Notification;
use helphub_entity::request::{HelpRequest, RequestStatus};
use helphub_entity::user::UserIdentity;

/// Durable collection of help requests.
///
/// Writes go through the `*_if_version` methods, which compare the stored
/// `version` with `expected_version` and write in one atomic step. They
/// return `false` when the record is gone or was written since it was read.
#[async_trait]
pub trait RequestStore: Send + Sync + 'static {
    /// Find a request by id.
    async fn find_by_id(&self, id: RequestId) -> AppResult<Option<HelpRequest>>;

    /// List requests, newest first, optionally restricted to one status.
    async fn find_all(&self, status: Option<RequestStatus>) -> AppResult<Vec<HelpRequest>>;

    /// Persist a new request.
    async fn create(&self, request: &HelpRequest) -> AppResult<HelpRequest>;

    /// Replace the stored request with `request` if the stored version is
    /// still `expected_version`. `request.version` is written as given.
    async fn update_if_version(
        &self,
        request: &HelpRequest,
        expected_version: i64,
    ) -> AppResult<bool>;

    /// Delete the request if the stored version is still `expected_version`.
    async fn delete_if_version(&self, id: RequestId, expected_version: i64) -> AppResult<bool>;
}

/// Append-only notification log with read flags.
#[async_trait]
pub trait NotificationStore: Send + Sync + 'static {
    /// Append a notification.
    async fn insert(&self, notification: &Notification) -> AppResult<()>;

    /// Find a notification by id.
    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>>;

    /// All notifications for a recipient, newest first.
    async fn find_by_recipient(&self, recipient_id: UserId) -> AppResult<Vec<Notification>>;

    /// Flag one notification as read. Returns `false` if it does not exist.
    async fn mark_read(&self, id: NotificationId) -> AppResult<bool>;

    /// Flag every unread notification of a recipient as read. Returns how
    /// many flipped.
    async fn mark_all_read(&self, recipient_id: UserId) -> AppResult<u64>;

    /// Whether the recipient has at least one unread notification.
    async fn has_unread(&self, recipient_id: UserId) -> AppResult<bool>;

    /// Number of unread notifications for the recipient.
    async fn count_unread(&self, recipient_id: UserId) -> AppResult<u64>;
}

/// Lookup of user identities by id.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Resolve a user id. Fails with `NotFound` when it does not exist.
    async fn get_by_id(&self, id: UserId) -> AppResult<UserIdentity>;
}
