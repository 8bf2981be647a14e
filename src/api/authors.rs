//! Author API endpoints

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
        author::{Author, AuthorFields},
        Entity,
    },
};

use super::DeleteResponse;

/// List all authors
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, description = "Author list", body = Vec<Author>)
    )
)]
pub async fn list_authors(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.authors.list().await?;
    Ok(Json(authors))
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = Author),
        (status = 404, description = "Author not found or id out of range")
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<Author>> {
    let Path(id) = id?;
    let author = state.services.authors.get(id).await?;
    Ok(Json(author))
}

/// Create an author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = AuthorFields,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 422, description = "Invalid author fields")
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    payload: Result<Json<AuthorFields>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let Json(fields) = payload?;
    let author = state.services.authors.create(&fields).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

/// Replace an author
#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    request_body = AuthorFields,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 404, description = "Author not found"),
        (status = 422, description = "Invalid author fields")
    )
)]
pub async fn update_author(
    State(state): State<crate::AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<AuthorFields>, JsonRejection>,
) -> AppResult<Json<Author>> {
    let Path(id) = id?;
    let Json(fields) = payload?;
    let author = state.services.authors.update(id, &fields).await?;
    Ok(Json(author))
}

/// Delete an author
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author deleted", body = DeleteResponse),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<DeleteResponse>> {
    let Path(id) = id?;
    state.services.authors.delete(id).await?;
    Ok(Json(DeleteResponse::for_kind(Author::KIND)))
}
