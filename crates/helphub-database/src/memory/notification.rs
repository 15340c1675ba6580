//! In-memory notification store.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use helphub_core::result::AppResult;
use helphub_core::types::{NotificationId, UserId};
use helphub_entity::notification::Notification;

use crate::store::NotificationStore;

/// `NotificationStore` keyed by recipient, each log kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotificationStore {
    by_recipient: Arc<DashMap<UserId, Vec<Notification>>>,
    recipient_of: Arc<DashMap<NotificationId, UserId>>,
}

impl MemoryNotificationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn insert(&self, notification: &Notification) -> AppResult<()> {
        self.by_recipient
            .entry(notification.recipient_id)
            .or_default()
            .push(notification.clone());
        self.recipient_of
            .insert(notification.id, notification.recipient_id);
        Ok(())
    }

    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        let Some(recipient) = self.recipient_of.get(&id).map(|r| *r.value()) else {
            return Ok(None);
        };
        Ok(self
            .by_recipient
            .get(&recipient)
            .and_then(|log| log.iter().find(|n| n.id == id).cloned()))
    }

    async fn find_by_recipient(&self, recipient_id: UserId) -> AppResult<Vec<Notification>> {
        Ok(self
            .by_recipient
            .get(&recipient_id)
            .map(|log| log.iter().rev().cloned().collect())
            .unwrap_or_default())
    }

    async fn mark_read(&self, id: NotificationId) -> AppResult<bool> {
        let Some(recipient) = self.recipient_of.get(&id).map(|r| *r.value()) else {
            return Ok(false);
        };
        let Some(mut log) = self.by_recipient.get_mut(&recipient) else {
            return Ok(false);
        };
        match log.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_read(&self, recipient_id: UserId) -> AppResult<u64> {
        let Some(mut log) = self.by_recipient.get_mut(&recipient_id) else {
            return Ok(0);
        };
        let mut flipped = 0;
        for notification in log.iter_mut().filter(|n| !n.is_read) {
            notification.is_read = true;
            flipped += 1;
        }
        Ok(flipped)
    }

    async fn has_unread(&self, recipient_id: UserId) -> AppResult<bool> {
        Ok(self
            .by_recipient
            .get(&recipient_id)
            .is_some_and(|log| log.iter().any(Notification::is_unread)))
    }

    async fn count_unread(&self, recipient_id: UserId) -> AppResult<u64> {
        Ok(self
            .by_recipient
            .get(&recipient_id)
            .map(|log| log.iter().filter(|n| n.is_unread()).count() as u64)
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helphub_core::types::RequestId;
    use helphub_entity::notification::NotificationKind;
    use helphub_entity::user::{UserIdentity, UserRole};

    fn notification(recipient: UserId, kind: NotificationKind) -> Notification {
        let other = UserIdentity::new(UserId::new(), "sam", UserRole::Member);
        Notification::new(recipient, &other, RequestId::new(), kind, "Walk the dog")
    }

    #[tokio::test]
    async fn test_lists_newest_first_per_recipient() {
        let store = MemoryNotificationStore::new();
        let alice = UserId::new();
        let first = notification(alice, NotificationKind::Volunteering);
        let second = notification(alice, NotificationKind::Accepting);
        store.insert(&first).await.unwrap();
        store.insert(&second).await.unwrap();
        store
            .insert(&notification(UserId::new(), NotificationKind::Accepted))
            .await
            .unwrap();

        let listed = store.find_by_recipient(alice).await.unwrap();
        assert_eq!(
            listed.iter().map(|n| n.id).collect::<Vec<_>>(),
            vec![second.id, first.id]
        );
    }

    #[tokio::test]
    async fn test_read_flags() {
        let store = MemoryNotificationStore::new();
        let alice = UserId::new();
        let first = notification(alice, NotificationKind::Volunteering);
        store.insert(&first).await.unwrap();
        store
            .insert(&notification(alice, NotificationKind::Completed))
            .await
            .unwrap();

        assert_eq!(store.count_unread(alice).await.unwrap(), 2);
        assert!(store.mark_read(first.id).await.unwrap());
        assert!(store.mark_read(first.id).await.unwrap());
        assert_eq!(store.count_unread(alice).await.unwrap(), 1);

        assert_eq!(store.mark_all_read(alice).await.unwrap(), 1);
        assert_eq!(store.mark_all_read(alice).await.unwrap(), 0);
        assert!(!store.has_unread(alice).await.unwrap());
        assert!(!store.mark_read(NotificationId::new()).await.unwrap());
    }
}
