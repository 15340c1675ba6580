//! Help request lifecycle: creation, guarded transitions, and ownership checks.

use std::sync::Arc;

use tracing::{info, warn};

use helphub_auth::rbac::{Capability, RbacEnforcer};
use helphub_core::error::{AppError, ErrorKind};
use helphub_core::result::AppResult;
use helphub_core::types::{RequestId, UserId};
use helphub_database::store::{RequestStore, UserDirectory};
use helphub_entity::request::{CreateHelpRequest, HelpRequest, RequestStatus, UpdateHelpRequest};
use helphub_entity::user::UserIdentity;

use crate::context::RequestContext;
use crate::notification::NotificationService;

/// Drives help requests through their lifecycle.
///
/// Every write is a compare-and-swap on the `version` read at the start of
/// the operation. Everyone a transition notifies is resolved before that
/// write; the notifications are recorded after it and their errors are
/// returned to the caller.
#[derive(Clone)]
pub struct RequestService {
    /// Request store.
    requests: Arc<dyn RequestStore>,
    /// User directory for poster and volunteer lookups.
    users: Arc<dyn UserDirectory>,
    /// Notification dispatcher.
    notifications: NotificationService,
    /// Ownership and capability checks.
    rbac: RbacEnforcer,
}

impl std::fmt::Debug for RequestService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestService")
            .field("notifications", &self.notifications)
            .field("rbac", &self.rbac)
            .finish_non_exhaustive()
    }
}

impl RequestService {
    /// Creates a new request service.
    pub fn new(
        requests: Arc<dyn RequestStore>,
        users: Arc<dyn UserDirectory>,
        notifications: NotificationService,
        rbac: RbacEnforcer,
    ) -> Self {
        Self {
            requests,
            users,
            notifications,
            rbac,
        }
    }

    /// Posts a new `WAITING` request on behalf of `poster_id`.
    pub async fn create_request(
        &self,
        poster_id: UserId,
        data: CreateHelpRequest,
    ) -> AppResult<HelpRequest> {
        if data.title.trim().is_empty() {
            return Err(AppError::validation("Request title cannot be empty"));
        }
        if data.description.trim().is_empty() {
            return Err(AppError::validation("Request description cannot be empty"));
        }

        let poster = self.users.get_by_id(poster_id).await?;
        let request = self
            .requests
            .create(&HelpRequest::new(poster.id, data))
            .await?;

        info!(
            request_id = %request.id,
            poster_id = %poster.id,
            emergency_level = %request.emergency_level,
            "Help request created"
        );
        Ok(request)
    }

    /// Gets a request by ID.
    pub async fn get_request(&self, id: RequestId) -> AppResult<HelpRequest> {
        self.load(id).await
    }

    /// Lists requests, newest first, optionally restricted to one status.
    ///
    /// Open to any authenticated user so volunteers can browse.
    pub async fn list_requests(
        &self,
        _ctx: &RequestContext,
        status: Option<RequestStatus>,
    ) -> AppResult<Vec<HelpRequest>> {
        self.requests.find_all(status).await
    }

    /// Merges the present fields of `patch` into the request.
    ///
    /// An empty patch returns the stored request without writing.
    pub async fn update_request(
        &self,
        ctx: &RequestContext,
        id: RequestId,
        patch: UpdateHelpRequest,
    ) -> AppResult<HelpRequest> {
        let current = self.load(id).await?;
        self.require_manager(ctx, &current)?;

        if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(AppError::validation("Request title cannot be empty"));
        }
        if patch
            .description
            .as_deref()
            .is_some_and(|d| d.trim().is_empty())
        {
            return Err(AppError::validation("Request description cannot be empty"));
        }
        if patch.is_empty() {
            return Ok(current);
        }
        if let Some(target) = patch.status
            && !current.status.can_set_manually(target)
        {
            return Err(AppError::invalid_state(format!(
                "Cannot move request from {} to {} by update",
                current.status, target
            )));
        }

        let mut updated = current.next_revision();
        updated.apply_update(patch);
        self.commit(&current, &updated).await?;

        info!(
            request_id = %id,
            user_id = %ctx.user_id,
            status = %updated.status,
            "Help request updated"
        );
        Ok(updated)
    }

    /// Deletes a request. Allowed from any status except `DONE`.
    pub async fn delete_request(&self, ctx: &RequestContext, id: RequestId) -> AppResult<()> {
        let current = self.load(id).await?;
        self.require_manager(ctx, &current)?;

        if !current.status.is_deletable() {
            return Err(AppError::invalid_state(format!(
                "Request {id} is {} and cannot be deleted",
                current.status
            )));
        }

        if !self.requests.delete_if_version(id, current.version).await? {
            return Err(self.explain_miss(&current).await);
        }

        info!(request_id = %id, user_id = %ctx.user_id, "Help request deleted");
        Ok(())
    }

    /// The caller offers to help: `WAITING` → `VOLUNTEERED`, with the caller
    /// recorded as the applicant.
    pub async fn volunteer_for_request(
        &self,
        ctx: &RequestContext,
        id: RequestId,
    ) -> AppResult<HelpRequest> {
        let current = self.load(id).await?;
        if current.is_poster(ctx.user_id) {
            return Err(AppError::validation(
                "Posters cannot volunteer for their own request",
            ));
        }
        require_status(&current, RequestStatus::Waiting)?;

        let poster = self.resolve_party(current.poster_id).await?;
        let volunteer = ctx.identity();

        let mut updated = current.next_revision();
        updated.status = RequestStatus::Volunteered;
        updated.applicant_id = Some(volunteer.id);
        self.commit(&current, &updated).await?;

        info!(request_id = %id, volunteer_id = %volunteer.id, "Volunteer applied");

        self.notifications
            .record_volunteered(&updated, &poster, &volunteer)
            .await?;
        Ok(updated)
    }

    /// Attaches `volunteer_id` to an open request: → `ACCEPTING`.
    ///
    /// A pending applicant other than `volunteer_id` is told they were
    /// passed over.
    pub async fn accept_request(
        &self,
        ctx: &RequestContext,
        id: RequestId,
        volunteer_id: UserId,
    ) -> AppResult<HelpRequest> {
        let current = self.load(id).await?;
        if !current.status.is_open() {
            return Err(AppError::invalid_state(format!(
                "Request {id} is {} and cannot accept a volunteer",
                current.status
            )));
        }

        let volunteer = self.users.get_by_id(volunteer_id).await?;
        if current.is_poster(volunteer.id) {
            return Err(AppError::validation(
                "The poster cannot be the volunteer of their own request",
            ));
        }
        let poster = self.resolve_party(current.poster_id).await?;
        let passed_over = current.applicant_id.filter(|applicant| *applicant != volunteer.id);

        let mut updated = current.next_revision();
        updated.status = RequestStatus::Accepting;
        updated.volunteer_id = Some(volunteer.id);
        updated.applicant_id = None;
        self.commit(&current, &updated).await?;

        info!(
            request_id = %id,
            volunteer_id = %volunteer.id,
            accepted_by = %ctx.user_id,
            "Volunteer accepted"
        );

        self.notifications
            .record_accepted(&updated, &poster, &volunteer)
            .await?;
        if let Some(applicant) = passed_over {
            self.notifications
                .record_declined(&updated, &poster, applicant)
                .await?;
        }
        Ok(updated)
    }

    /// The poster confirms the help was given: `ACCEPTING` → `COMPLETED`.
    pub async fn complete_request(
        &self,
        ctx: &RequestContext,
        id: RequestId,
    ) -> AppResult<HelpRequest> {
        let current = self.load(id).await?;
        self.require_poster(ctx, &current)?;
        require_status(&current, RequestStatus::Accepting)?;

        let volunteer_id = current.volunteer_id.ok_or_else(|| {
            AppError::internal(format!("Accepted request {id} has no volunteer"))
        })?;
        let volunteer = self.resolve_party(volunteer_id).await?;

        let mut updated = current.next_revision();
        updated.status = RequestStatus::Completed;
        self.commit(&current, &updated).await?;

        info!(request_id = %id, poster_id = %ctx.user_id, "Help request completed");

        self.notifications
            .record_completed(&updated, &volunteer)
            .await?;
        Ok(updated)
    }

    /// The poster calls off an accepted request: `ACCEPTING` → `CANCELLED`.
    pub async fn cancel_request(
        &self,
        ctx: &RequestContext,
        id: RequestId,
    ) -> AppResult<HelpRequest> {
        let current = self.load(id).await?;
        self.require_poster(ctx, &current)?;
        require_status(&current, RequestStatus::Accepting)?;

        let mut updated = current.next_revision();
        updated.status = RequestStatus::Cancelled;
        updated.volunteer_id = None;
        self.commit(&current, &updated).await?;

        info!(request_id = %id, poster_id = %ctx.user_id, "Help request cancelled");

        if let Some(volunteer_id) = current.volunteer_id {
            self.notifications
                .record_cancelled(&updated, &ctx.identity(), volunteer_id)
                .await?;
        }
        Ok(updated)
    }

    /// The accepted volunteer backs out: `ACCEPTING` → `WAITING`.
    pub async fn withdraw_from_request(
        &self,
        ctx: &RequestContext,
        id: RequestId,
    ) -> AppResult<HelpRequest> {
        let current = self.load(id).await?;
        require_status(&current, RequestStatus::Accepting)?;
        if current.volunteer_id != Some(ctx.user_id) {
            warn!(request_id = %id, user_id = %ctx.user_id, "Withdraw by non-volunteer rejected");
            return Err(AppError::authorization(
                "Only the accepted volunteer can withdraw",
            ));
        }

        let mut updated = current.next_revision();
        updated.status = RequestStatus::Waiting;
        updated.volunteer_id = None;
        self.commit(&current, &updated).await?;

        info!(request_id = %id, volunteer_id = %ctx.user_id, "Volunteer withdrew");

        self.notifications
            .record_cancelled(&updated, &ctx.identity(), current.poster_id)
            .await?;
        Ok(updated)
    }

    async fn load(&self, id: RequestId) -> AppResult<HelpRequest> {
        self.requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Request {id} not found")))
    }

    /// A party the transition will notify. A user missing from the directory
    /// fails authentication.
    async fn resolve_party(&self, user_id: UserId) -> AppResult<UserIdentity> {
        self.users.get_by_id(user_id).await.map_err(|e| {
            if e.kind == ErrorKind::NotFound {
                warn!(user_id = %user_id, "Party of a transition no longer resolves");
                AppError::authentication(format!("User {user_id} no longer resolves"))
            } else {
                e
            }
        })
    }

    /// Writes `updated` if the stored version is still `current.version`.
    async fn commit(&self, current: &HelpRequest, updated: &HelpRequest) -> AppResult<()> {
        if self
            .requests
            .update_if_version(updated, current.version)
            .await?
        {
            Ok(())
        } else {
            Err(self.explain_miss(current).await)
        }
    }

    /// Classifies a lost compare-and-swap by re-reading the record.
    async fn explain_miss(&self, snapshot: &HelpRequest) -> AppError {
        let id = snapshot.id;
        match self.requests.find_by_id(id).await {
            Ok(None) => AppError::not_found(format!("Request {id} not found")),
            Ok(Some(stored)) if stored.status != snapshot.status => {
                AppError::invalid_state(format!(
                    "Request {id} moved from {} to {}",
                    snapshot.status, stored.status
                ))
            }
            Ok(Some(_)) => AppError::conflict(format!("Request {id} was modified concurrently")),
            Err(e) => e,
        }
    }

    /// Poster or a user allowed to manage any request.
    fn require_manager(&self, ctx: &RequestContext, request: &HelpRequest) -> AppResult<()> {
        self.rbac
            .require_owner_or(
                ctx.user_id,
                &ctx.role,
                request.poster_id,
                Capability::ManageAnyRequest,
            )
            .inspect_err(|_| {
                warn!(request_id = %request.id, user_id = %ctx.user_id, "Ownership check failed");
            })
    }

    fn require_poster(&self, ctx: &RequestContext, request: &HelpRequest) -> AppResult<()> {
        if request.is_poster(ctx.user_id) {
            Ok(())
        } else {
            warn!(request_id = %request.id, user_id = %ctx.user_id, "Poster check failed");
            Err(AppError::authorization("Only the poster can do this"))
        }
    }
}

fn require_status(request: &HelpRequest, expected: RequestStatus) -> AppResult<()> {
    if request.status == expected {
        Ok(())
    } else {
        Err(AppError::invalid_state(format!(
            "Request {} is {}, expected {}",
            request.id, request.status, expected
        )))
    }
}
