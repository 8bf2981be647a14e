//! Loan API endpoints

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
        loan::{Loan, LoanFields},
        Entity,
    },
};

use super::DeleteResponse;

/// List all loans, open and returned
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    responses(
        (status = 200, description = "Loan list", body = Vec<Loan>)
    )
)]
pub async fn list_loans(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Loan>>> {
    let loans = state.services.loans.list().await?;
    Ok(Json(loans))
}

/// Get loan by ID
#[utoipa::path(
    get,
    path = "/loans/{id}",
    tag = "loans",
    params(("id" = i32, Path, description = "Loan ID")),
    responses(
        (status = 200, description = "Loan details", body = Loan),
        (status = 404, description = "Loan not found or id out of range")
    )
)]
pub async fn get_loan(
    State(state): State<crate::AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<Loan>> {
    let Path(id) = id?;
    let loan = state.services.loans.get(id).await?;
    Ok(Json(loan))
}

/// Record a new loan
///
/// The referenced book and member must exist.
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    request_body = LoanFields,
    responses(
        (status = 201, description = "Loan created", body = Loan),
        (status = 422, description = "Invalid dates or unknown book/member")
    )
)]
pub async fn create_loan(
    State(state): State<crate::AppState>,
    payload: Result<Json<LoanFields>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Loan>)> {
    let Json(fields) = payload?;
    let loan = state.services.loans.create(&fields).await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// Replace a loan (e.g. to set its return date)
#[utoipa::path(
    put,
    path = "/loans/{id}",
    tag = "loans",
    params(("id" = i32, Path, description = "Loan ID")),
    request_body = LoanFields,
    responses(
        (status = 200, description = "Loan updated", body = Loan),
        (status = 404, description = "Loan not found"),
        (status = 422, description = "Invalid dates or unknown book/member")
    )
)]
pub async fn update_loan(
    State(state): State<crate::AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<LoanFields>, JsonRejection>,
) -> AppResult<Json<Loan>> {
    let Path(id) = id?;
    let Json(fields) = payload?;
    let loan = state.services.loans.update(id, &fields).await?;
    Ok(Json(loan))
}

/// Delete a loan
#[utoipa::path(
    delete,
    path = "/loans/{id}",
    tag = "loans",
    params(("id" = i32, Path, description = "Loan ID")),
    responses(
        (status = 200, description = "Loan deleted", body = DeleteResponse),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn delete_loan(
    State(state): State<crate::AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<DeleteResponse>> {
    let Path(id) = id?;
    state.services.loans.delete(id).await?;
    Ok(Json(DeleteResponse::for_kind(Loan::KIND)))
}
