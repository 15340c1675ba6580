//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use helphub_core::types::UserId;
use helphub_entity::request::{
    CreateHelpRequest, EmergencyLevel, RequestStatus, UpdateHelpRequest,
};

/// Body of `POST /requests`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRequestBody {
    /// Short summary.
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    /// Full description.
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    /// Severity.
    pub emergency_level: EmergencyLevel,
    /// How to reach the poster.
    pub contact_info: Option<String>,
    /// Where help is needed.
    pub location: Option<String>,
}

impl From<CreateRequestBody> for CreateHelpRequest {
    fn from(body: CreateRequestBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            emergency_level: body.emergency_level,
            contact_info: body.contact_info,
            location: body.location,
        }
    }
}

/// Body of `PUT /requests/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateRequestBody {
    #[validate(length(max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub contact_info: Option<String>,
    pub location: Option<String>,
    pub feedback: Option<String>,
    pub emergency_level: Option<EmergencyLevel>,
    pub status: Option<RequestStatus>,
}

impl From<UpdateRequestBody> for UpdateHelpRequest {
    fn from(body: UpdateRequestBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            contact_info: body.contact_info,
            location: body.location,
            feedback: body.feedback,
            emergency_level: body.emergency_level,
            status: body.status,
        }
    }
}

/// Body of `POST /requests/{id}/accept`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AcceptRequestBody {
    /// The volunteer to attach.
    pub volunteer_id: UserId,
}

/// Query string of `GET /requests`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRequestsQuery {
    /// Only return requests in this status.
    pub status: Option<RequestStatus>,
}
