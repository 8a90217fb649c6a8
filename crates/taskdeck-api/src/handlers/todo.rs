use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::ApiState;
use taskdeck_core::task::{validate_description, validate_title};
use taskdeck_db::{NewTodo, TodoRecord};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub title: String,
    pub details: String,
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_done: bool,
}

/// PUT body carries the row id; it must match the path id.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub id: i64,
    pub title: String,
    pub details: String,
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_done: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn not_found(id: i64) -> HandlerError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Todo not found: {}", id),
        }),
    )
}

fn internal_error(err: taskdeck_db::Error) -> HandlerError {
    tracing::error!("Database operation failed: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

fn validate_payload(title: &str, details: &str) -> Result<(), HandlerError> {
    validate_title(title).map_err(|e| bad_request(e.to_string()))?;
    validate_description(details).map_err(|e| bad_request(e.to_string()))?;
    Ok(())
}

/// List every stored todo
pub async fn list_todos(
    State(state): State<ApiState>,
) -> Result<Json<Vec<TodoRecord>>, HandlerError> {
    match state.db.list_todos().await {
        Ok(records) => Ok(Json(records)),
        Err(e) => Err(internal_error(e)),
    }
}

/// Get a single todo
pub async fn get_todo(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<TodoRecord>, HandlerError> {
    match state.db.get_todo(id).await {
        Ok(Some(record)) => Ok(Json(record)),
        Ok(None) => Err(not_found(id)),
        Err(e) => Err(internal_error(e)),
    }
}

/// Create a todo; the database assigns the id.
pub async fn create_todo(
    State(state): State<ApiState>,
    Json(payload): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<TodoRecord>), HandlerError> {
    validate_payload(&payload.title, &payload.details)?;

    let todo = NewTodo {
        title: payload.title,
        details: payload.details,
        date: payload.date,
        is_done: payload.is_done,
    };

    match state.db.insert_todo(&todo).await {
        Ok(record) => {
            tracing::info!("Created todo: {} ({})", record.title, record.id);
            Ok((StatusCode::CREATED, Json(record)))
        }
        Err(e) => Err(internal_error(e)),
    }
}

/// Full-row replace of a todo's mutable fields
pub async fn update_todo(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTodoRequest>,
) -> Result<StatusCode, HandlerError> {
    if payload.id != id {
        return Err(bad_request("body id does not match path id"));
    }
    validate_payload(&payload.title, &payload.details)?;

    let todo = NewTodo {
        title: payload.title,
        details: payload.details,
        date: payload.date,
        is_done: payload.is_done,
    };

    match state.db.update_todo(id, &todo).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(taskdeck_db::Error::TodoNotFound(_)) => Err(not_found(id)),
        Err(e) => Err(internal_error(e)),
    }
}

/// Delete a todo
pub async fn delete_todo(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, HandlerError> {
    match state.db.delete_todo(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(taskdeck_db::Error::TodoNotFound(_)) => Err(not_found(id)),
        Err(e) => Err(internal_error(e)),
    }
}

/// Flip a todo's done flag and return the updated row
pub async fn toggle_todo(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<TodoRecord>, HandlerError> {
    match state.db.toggle_todo(id).await {
        Ok(record) => Ok(Json(record)),
        Err(taskdeck_db::Error::TodoNotFound(_)) => Err(not_found(id)),
        Err(e) => Err(internal_error(e)),
    }
}
