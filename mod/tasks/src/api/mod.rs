mod reports;
mod tasks;
mod weather;

use std::sync::Arc;

use axum::Router;

use crate::service::TasksService;

/// Shared handler state.
pub(crate) type AppState = Arc<TasksService>;

/// Build the tasks API router.
///
/// All routes are relative — the server nests them under `/api`.
pub fn router(service: Arc<TasksService>) -> Router {
    Router::new()
        .merge(tasks::routes())
        .merge(weather::routes())
        .merge(reports::routes())
        .with_state(service)
}
