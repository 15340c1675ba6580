//! Help request entity model.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use helphub_core::types::{RequestId, UserId};

use super::emergency::EmergencyLevel;
use super::status::RequestStatus;

/// A help request posted by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct HelpRequest {
    /// Unique request identifier.
    pub id: RequestId,
    /// Short summary of what is needed.
    pub title: String,
    /// Full description.
    pub description: String,
    /// How to reach the poster.
    pub contact_info: Option<String>,
    /// Where help is needed.
    pub location: Option<String>,
    /// Poster feedback once help was given.
    pub feedback: Option<String>,
    /// Severity chosen by the poster.
    pub emergency_level: EmergencyLevel,
    /// Lifecycle status.
    pub status: RequestStatus,
    /// Day the request was posted (UTC).
    pub creation_date: NaiveDate,
    /// The user who posted the request.
    pub poster_id: UserId,
    /// The accepted volunteer, if any.
    pub volunteer_id: Option<UserId>,
    /// Who offered help while the request is `VOLUNTEERED`.
    pub applicant_id: Option<UserId>,
    /// Write counter. Every stored change bumps it by one; writers swap on it.
    pub version: i64,
}

impl HelpRequest {
    /// Build a new `WAITING` request owned by `poster_id`.
    pub fn new(poster_id: UserId, data: CreateHelpRequest) -> Self {
        Self {
            id: RequestId::new(),
            title: data.title,
            description: data.description,
            contact_info: data.contact_info,
            location: data.location,
            feedback: None,
            emergency_level: data.emergency_level,
            status: RequestStatus::Waiting,
            creation_date: Utc::now().date_naive(),
            poster_id,
            volunteer_id: None,
            applicant_id: None,
            version: 0,
        }
    }

    /// Check whether `user_id` posted this request.
    pub fn is_poster(&self, user_id: UserId) -> bool {
        self.poster_id == user_id
    }

    /// Check the volunteer/status and applicant/status invariants.
    pub fn is_consistent(&self) -> bool {
        self.volunteer_id.is_some() == self.status.requires_volunteer()
            && self.applicant_id.is_some() == (self.status == RequestStatus::Volunteered)
    }

    /// The copy that replaces this revision in the store.
    pub fn next_revision(&self) -> Self {
        Self {
            version: self.version + 1,
            ..self.clone()
        }
    }

    /// Merge every present field of `patch` into this request.
    ///
    /// Absent fields keep their current value. A status that does not carry
    /// a volunteer clears `volunteer_id`; leaving `VOLUNTEERED` clears
    /// `applicant_id`. Callers validate the status change before merging.
    pub fn apply_update(&mut self, patch: UpdateHelpRequest) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(contact_info) = patch.contact_info {
            self.contact_info = Some(contact_info);
        }
        if let Some(location) = patch.location {
            self.location = Some(location);
        }
        if let Some(feedback) = patch.feedback {
            self.feedback = Some(feedback);
        }
        if let Some(level) = patch.emergency_level {
            self.emergency_level = level;
        }
        if let Some(status) = patch.status {
            self.status = status;
            if !status.requires_volunteer() {
                self.volunteer_id = None;
            }
            if status != RequestStatus::Volunteered {
                self.applicant_id = None;
            }
        }
    }
}

/// Data required to post a new request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHelpRequest {
    pub title: String,
    pub description: String,
    pub emergency_level: EmergencyLevel,
    pub contact_info: Option<String>,
    pub location: Option<String>,
}

/// Partial update of a request. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateHelpRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub contact_info: Option<String>,
    pub location: Option<String>,
    pub feedback: Option<String>,
    pub emergency_level: Option<EmergencyLevel>,
    pub status: Option<RequestStatus>,
}

impl UpdateHelpRequest {
    /// Whether the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.contact_info.is_none()
            && self.location.is_none()
            && self.feedback.is_none()
            && self.emergency_level.is_none()
            && self.status.is_none()
    }
}
