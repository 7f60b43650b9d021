use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use taskboard_core::ServiceError;

use crate::api::AppState;
use crate::model::TaskReport;

pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/tasks", get(task_report))
}

async fn task_report(State(svc): State<AppState>) -> Result<Json<TaskReport>, ServiceError> {
    Ok(Json(svc.report()?))
}
