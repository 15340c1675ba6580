//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use helphub_core::types::{NotificationId, RequestId, UserId};

use super::kind::NotificationKind;
use crate::user::UserIdentity;

/// An append-only record telling a user about a request transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The user who should see this notification.
    pub recipient_id: UserId,
    /// The other party of the transition.
    pub related_user_id: UserId,
    /// Username of the other party, captured when the notification was
    /// recorded.
    pub related_username: String,
    /// The request the transition happened on.
    pub request_id: RequestId,
    /// What happened.
    pub kind: NotificationKind,
    /// Rendered summary text.
    pub content: String,
    /// When the notification was recorded.
    pub created_at: DateTime<Utc>,
    /// Whether the recipient has read it. Only ever flips to `true`.
    pub is_read: bool,
}

impl Notification {
    /// Build an unread notification for `recipient_id` about `related`.
    pub fn new(
        recipient_id: UserId,
        related: &UserIdentity,
        request_id: RequestId,
        kind: NotificationKind,
        request_title: &str,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            recipient_id,
            related_user_id: related.id,
            related_username: related.username.clone(),
            request_id,
            kind,
            content: kind.describe(&related.username, request_title),
            created_at: Utc::now(),
            is_read: false,
        }
    }

    /// Check if the notification has not been read yet.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::UserRole;

    #[test]
    fn test_username_is_copied_at_creation() {
        let mut volunteer = UserIdentity::new(UserId::new(), "maria", UserRole::Member);
        let poster = UserId::new();
        let notification = Notification::new(
            poster,
            &volunteer,
            RequestId::new(),
            NotificationKind::Volunteering,
            "Need groceries",
        );

        volunteer.username = "maria_k".to_string();

        assert_eq!(notification.related_username, "maria");
        assert_eq!(
            notification.content,
            "maria is applying to help with \"Need groceries\""
        );
        assert!(notification.is_unread());
        assert_eq!(notification.recipient_id, poster);
    }
}
