//! Tasks module — CRUD over the task collection, the weather lookup,
//! the report aggregation, and the demo seed data.

pub mod api;
pub mod model;
pub mod seed;
pub mod service;
pub mod store;
pub mod weather;

use std::sync::Arc;

use axum::Router;

use taskboard_core::{Module, ServiceError};
use taskboard_sql::SQLStore;

use service::TasksService;

/// The tasks module. Owns the service and contributes the API routes.
pub struct TasksModule {
    service: Arc<TasksService>,
}

impl TasksModule {
    /// Create the module, initialising the task schema.
    pub fn new(db: Arc<dyn SQLStore>) -> Result<Self, ServiceError> {
        Ok(Self {
            service: TasksService::new(db)?,
        })
    }

    /// Access the service directly (the seed binary and tests use this).
    pub fn service(&self) -> &Arc<TasksService> {
        &self.service
    }
}

impl Module for TasksModule {
    fn name(&self) -> &str {
        "tasks"
    }

    fn routes(&self) -> Router {
        api::router(Arc::clone(&self.service))
    }
}
