//! Notification dispatch and read-state management.

use std::sync::Arc;

use tracing::{debug, info};

use helphub_auth::rbac::{Capability, RbacEnforcer};
use helphub_core::error::AppError;
use helphub_core::result::AppResult;
use helphub_core::types::{NotificationId, UserId};
use helphub_database::store::NotificationStore;
use helphub_entity::notification::{Notification, NotificationKind};
use helphub_entity::request::HelpRequest;
use helphub_entity::user::UserIdentity;

use crate::context::RequestContext;

/// Records notifications for committed request transitions and serves
/// them back to their recipients.
///
/// The `record_*` methods take parties the caller already resolved, so
/// usernames are captured as they were when the transition ran.
#[derive(Clone)]
pub struct NotificationService {
    /// Notification store.
    store: Arc<dyn NotificationStore>,
    /// Capability checks.
    rbac: RbacEnforcer,
}

impl std::fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationService").finish_non_exhaustive()
    }
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(store: Arc<dyn NotificationStore>, rbac: RbacEnforcer) -> Self {
        Self { store, rbac }
    }

    /// `volunteer` offered to help: tells the poster someone is applying and
    /// confirms the offer to the volunteer.
    pub async fn record_volunteered(
        &self,
        request: &HelpRequest,
        poster: &UserIdentity,
        volunteer: &UserIdentity,
    ) -> AppResult<()> {
        self.append_pair(
            Notification::new(
                poster.id,
                volunteer,
                request.id,
                NotificationKind::Volunteering,
                &request.title,
            ),
            Notification::new(
                volunteer.id,
                poster,
                request.id,
                NotificationKind::Volunteered,
                &request.title,
            ),
        )
        .await
    }

    /// `volunteer` was accepted on `request`.
    pub async fn record_accepted(
        &self,
        request: &HelpRequest,
        poster: &UserIdentity,
        volunteer: &UserIdentity,
    ) -> AppResult<()> {
        self.append_pair(
            Notification::new(
                poster.id,
                volunteer,
                request.id,
                NotificationKind::Accepting,
                &request.title,
            ),
            Notification::new(
                volunteer.id,
                poster,
                request.id,
                NotificationKind::Accepted,
                &request.title,
            ),
        )
        .await
    }

    /// `applicant` offered help on `request` but someone else was accepted.
    pub async fn record_declined(
        &self,
        request: &HelpRequest,
        poster: &UserIdentity,
        applicant: UserId,
    ) -> AppResult<()> {
        self.append(Notification::new(
            applicant,
            poster,
            request.id,
            NotificationKind::Declined,
            &request.title,
        ))
        .await
    }

    /// `request` was completed; the poster is told which volunteer helped.
    pub async fn record_completed(
        &self,
        request: &HelpRequest,
        volunteer: &UserIdentity,
    ) -> AppResult<()> {
        self.append(Notification::new(
            request.poster_id,
            volunteer,
            request.id,
            NotificationKind::Completed,
            &request.title,
        ))
        .await
    }

    /// `actor` cancelled their side of `request`; `recipient` is the other
    /// party.
    pub async fn record_cancelled(
        &self,
        request: &HelpRequest,
        actor: &UserIdentity,
        recipient: UserId,
    ) -> AppResult<()> {
        let kind = if request.is_poster(actor.id) {
            NotificationKind::CancelledByPoster
        } else {
            NotificationKind::CancelledByVolunteer
        };

        self.append(Notification::new(
            recipient,
            actor,
            request.id,
            kind,
            &request.title,
        ))
        .await
    }

    /// Lists notifications for the current user, newest first.
    pub async fn list_for_user(&self, ctx: &RequestContext) -> AppResult<Vec<Notification>> {
        self.store.find_by_recipient(ctx.user_id).await
    }

    /// Marks every unread notification of the current user as read.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> AppResult<u64> {
        let flipped = self.store.mark_all_read(ctx.user_id).await?;
        debug!(user_id = %ctx.user_id, count = flipped, "Marked notifications read");
        Ok(flipped)
    }

    /// Marks one notification as read. Re-marking is a no-op.
    ///
    /// Another user's notification is reported as missing unless the caller
    /// may manage any notification.
    pub async fn mark_read(&self, ctx: &RequestContext, id: NotificationId) -> AppResult<()> {
        let notification = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))?;

        if notification.recipient_id != ctx.user_id
            && !self
                .rbac
                .has_capability(&ctx.role, Capability::ManageAnyNotification)
        {
            return Err(AppError::not_found(format!("Notification {id} not found")));
        }

        if !self.store.mark_read(id).await? {
            return Err(AppError::not_found(format!("Notification {id} not found")));
        }
        Ok(())
    }

    /// Whether the current user has any unread notification.
    pub async fn has_unread(&self, ctx: &RequestContext) -> AppResult<bool> {
        self.store.has_unread(ctx.user_id).await
    }

    /// Number of unread notifications for the current user.
    pub async fn unread_count(&self, ctx: &RequestContext) -> AppResult<u64> {
        self.store.count_unread(ctx.user_id).await
    }

    async fn append(&self, notification: Notification) -> AppResult<()> {
        self.store.insert(&notification).await?;
        info!(
            notification_id = %notification.id,
            recipient_id = %notification.recipient_id,
            request_id = %notification.request_id,
            kind = %notification.kind,
            "Notification recorded"
        );
        Ok(())
    }

    async fn append_pair(&self, to_poster: Notification, to_volunteer: Notification) -> AppResult<()> {
        self.append(to_poster).await?;
        self.append(to_volunteer).await
    }
}
