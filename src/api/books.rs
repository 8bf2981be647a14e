//! Book API endpoints

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
        book::{Book, BookFields},
        Entity,
    },
};

use super::DeleteResponse;

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Book list", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list().await?;
    Ok(Json(books))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found or id out of range")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<Book>> {
    let Path(id) = id?;
    let book = state.services.books.get(id).await?;
    Ok(Json(book))
}

/// Create a book
///
/// `author_id` must name an existing author.
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookFields,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 422, description = "Invalid book fields or unknown author")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    payload: Result<Json<BookFields>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let Json(fields) = payload?;
    let book = state.services.books.create(&fields).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Replace a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = BookFields,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found"),
        (status = 422, description = "Invalid book fields or unknown author")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<BookFields>, JsonRejection>,
) -> AppResult<Json<Book>> {
    let Path(id) = id?;
    let Json(fields) = payload?;
    let book = state.services.books.update(id, &fields).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = DeleteResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<DeleteResponse>> {
    let Path(id) = id?;
    state.services.books.delete(id).await?;
    Ok(Json(DeleteResponse::for_kind(Book::KIND)))
}
