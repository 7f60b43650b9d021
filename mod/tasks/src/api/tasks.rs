use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use taskboard_core::ServiceError;

use crate::api::AppState;
use crate::model::{CreateTask, Task, TaskListQuery};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task)
                .put(update_task)
                .patch(update_task)
                .delete(delete_task),
        )
}

async fn list_tasks(
    State(svc): State<AppState>,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let result = svc.list_tasks(&query)?;
    Ok(Json(serde_json::json!({
        "items": result.items,
        "total": result.total,
    })))
}

async fn create_task(
    State(svc): State<AppState>,
    Json(input): Json<CreateTask>,
) -> Result<(StatusCode, Json<Task>), ServiceError> {
    let task = svc.create_task(input)?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn get_task(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ServiceError> {
    Ok(Json(svc.get_task(&id)?))
}

/// PUT and PATCH both land here: the body is a flat field-level merge,
/// so a full replacement body and a partial one go through the same path.
async fn update_task(
    State(svc): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<serde_json::Value>,
) -> Result<Json<Task>, ServiceError> {
    Ok(Json(svc.update_task(&id, patch)?))
}

async fn delete_task(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    svc.delete_task(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
