//! Member API endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        member::{Member, MemberFields},
        Entity,
    },
};

use super::DeleteResponse;

/// List all members
#[utoipa::path(
    get,
    path = "/members",
    tag = "members",
    responses(
        (status = 200, description = "Member list", body = Vec<Member>)
    )
)]
pub async fn list_members(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Member>>> {
    let members = state.services.members.list().await?;
    Ok(Json(members))
}

/// Get member by ID
#[utoipa::path(
    get,
    path = "/members/{id}",
    tag = "members",
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member details", body = Member),
        (status = 404, description = "Member not found or id out of range")
    )
)]
pub async fn get_member(
    State(state): State<crate::AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<Member>> {
    let Path(id) = id?;
    let member = state.services.members.get(id).await?;
    Ok(Json(member))
}

/// Register a member
#[utoipa::path(
    post,
    path = "/members",
    tag = "members",
    request_body = MemberFields,
    responses(
        (status = 201, description = "Member created", body = Member),
        (status = 422, description = "Invalid member fields")
    )
)]
pub async fn create_member(
    State(state): State<crate::AppState>,
    payload: Result<Json<MemberFields>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Member>)> {
    let Json(fields) = payload?;
    let member = state.services.members.create(&fields).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// Replace a member
#[utoipa::path(
    put,
    path = "/members/{id}",
    tag = "members",
    params(("id" = i32, Path, description = "Member ID")),
    request_body = MemberFields,
    responses(
        (status = 200, description = "Member updated", body = Member),
        (status = 404, description = "Member not found"),
        (status = 422, description = "Invalid member fields")
    )
)]
pub async fn update_member(
    State(state): State<crate::AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<MemberFields>, JsonRejection>,
) -> AppResult<Json<Member>> {
    let Path(id) = id?;
    let Json(fields) = payload?;
    let member = state.services.members.update(id, &fields).await?;
    Ok(Json(member))
}

/// Delete a member
#[utoipa::path(
    delete,
    path = "/members/{id}",
    tag = "members",
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member deleted", body = DeleteResponse),
        (status = 404, description = "Member not found")
    )
)]
pub async fn delete_member(
    State(state): State<crate::AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<DeleteResponse>> {
    let Path(id) = id?;
    state.services.members.delete(id).await?;
    Ok(Json(DeleteResponse::for_kind(Member::KIND)))
}
