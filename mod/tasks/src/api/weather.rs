use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use taskboard_core::ServiceError;

use crate::api::AppState;
use crate::model::TaskWeather;

pub fn routes() -> Router<AppState> {
    Router::new().route("/tasks/{id}/weather", get(task_weather))
}

async fn task_weather(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TaskWeather>, ServiceError> {
    Ok(Json(svc.task_weather(&id).await?))
}
