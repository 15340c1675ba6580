//! Help request handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use helphub_core::types::RequestId;
use helphub_entity::request::HelpRequest;

use crate::dto::request::{
    AcceptRequestBody, CreateRequestBody, ListRequestsQuery, UpdateRequestBody,
};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::state::AppState;

type RequestResponse = Result<Json<ApiResponse<HelpRequest>>, ApiError>;

/// POST /api/requests
pub async fn create_request(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<CreateRequestBody>,
) -> Result<(StatusCode, Json<ApiResponse<HelpRequest>>), ApiError> {
    let request = state
        .request_service
        .create_request(auth.user_id, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(request))))
}

/// GET /api/requests
pub async fn list_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListRequestsQuery>,
) -> Result<Json<ApiResponse<Vec<HelpRequest>>>, ApiError> {
    let requests = state
        .request_service
        .list_requests(&auth, query.status)
        .await?;
    Ok(Json(ApiResponse::ok(requests)))
}

/// GET /api/requests/{id}
pub async fn get_request(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(id): IdPath<RequestId>,
) -> RequestResponse {
    let request = state.request_service.get_request(id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// PUT /api/requests/{id}
pub async fn update_request(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<RequestId>,
    ValidatedJson(body): ValidatedJson<UpdateRequestBody>,
) -> RequestResponse {
    let request = state
        .request_service
        .update_request(&auth, id, body.into())
        .await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// DELETE /api/requests/{id}
pub async fn delete_request(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<RequestId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.request_service.delete_request(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Request deleted"))))
}

/// POST /api/requests/{id}/volunteer
pub async fn volunteer(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<RequestId>,
) -> RequestResponse {
    let request = state
        .request_service
        .volunteer_for_request(&auth, id)
        .await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// POST /api/requests/{id}/accept
pub async fn accept(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<RequestId>,
    ValidatedJson(body): ValidatedJson<AcceptRequestBody>,
) -> RequestResponse {
    let request = state
        .request_service
        .accept_request(&auth, id, body.volunteer_id)
        .await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// POST /api/requests/{id}/complete
pub async fn complete(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<RequestId>,
) -> RequestResponse {
    let request = state.request_service.complete_request(&auth, id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// POST /api/requests/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<RequestId>,
) -> RequestResponse {
    let request = state.request_service.cancel_request(&auth, id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// POST /api/requests/{id}/withdraw
pub async fn withdraw(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<RequestId>,
) -> RequestResponse {
    let request = state
        .request_service
        .withdraw_from_request(&auth, id)
        .await?;
    Ok(Json(ApiResponse::ok(request)))
}
