use std::sync::Arc;

use taskboard_core::{ListResult, ServiceError, new_id, now_rfc3339};
use taskboard_sql::SQLStore;

use crate::model::{
    CreateTask, DEFAULT_PRIORITY, Task, TaskListQuery, TaskReport, TaskStatus, TaskWeather,
    UpdateTask,
};
use crate::store::TaskStore;
use crate::weather::WeatherClient;

/// The tasks service: validation and defaults on top of the store, plus
/// the two-call weather lookup.
pub struct TasksService {
    store: TaskStore,
    weather: WeatherClient,
}

impl TasksService {
    /// Create the service, initialising the schema.
    pub fn new(db: Arc<dyn SQLStore>) -> Result<Arc<Self>, ServiceError> {
        Self::with_weather(db, WeatherClient::new())
    }

    /// Create with an explicit weather client (tests use a stubbed one).
    pub fn with_weather(
        db: Arc<dyn SQLStore>,
        weather: WeatherClient,
    ) -> Result<Arc<Self>, ServiceError> {
        Ok(Arc::new(Self {
            store: TaskStore::new(db)?,
            weather,
        }))
    }

    /// Create a new task. `title` is required and must not be blank;
    /// unspecified fields take their defaults.
    pub fn create_task(&self, input: CreateTask) -> Result<Task, ServiceError> {
        let title = input.title.as_deref().map(str::trim).unwrap_or("");
        if title.is_empty() {
            return Err(ServiceError::Validation(
                "title: this field is required".into(),
            ));
        }

        let task = Task {
            id: new_id(),
            title: title.to_string(),
            description: input.description.unwrap_or_default(),
            status: input.status.unwrap_or(TaskStatus::Todo),
            priority: input.priority.unwrap_or(DEFAULT_PRIORITY),
            city: input.city.unwrap_or_default(),
            created_at: now_rfc3339(),
        };

        self.store.create(&task)?;
        Ok(task)
    }

    /// Get a task by id.
    pub fn get_task(&self, id: &str) -> Result<Task, ServiceError> {
        self.store.get(id)
    }

    /// List tasks, newest first, paginated.
    pub fn list_tasks(&self, query: &TaskListQuery) -> Result<ListResult<Task>, ServiceError> {
        self.store.list(query)
    }

    /// Update a task. Accepts partial or full field sets: fields present
    /// in the body replace the stored value, absent fields keep it, and
    /// `id`/`created_at` cannot be changed.
    pub fn update_task(
        &self,
        id: &str,
        patch: serde_json::Value,
    ) -> Result<Task, ServiceError> {
        if !patch.is_object() {
            return Err(ServiceError::Validation(
                "request body must be a JSON object".into(),
            ));
        }

        // A patch that does not fit the record shape (bad status, wrong
        // types) is client input, so it maps to a validation error.
        let patch: UpdateTask = serde_json::from_value(patch)
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        let mut task = self.store.get(id)?;
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(city) = patch.city {
            task.city = city;
        }

        if task.title.trim().is_empty() {
            return Err(ServiceError::Validation(
                "title: must not be blank".into(),
            ));
        }

        self.store.update(&task)?;
        Ok(task)
    }

    /// Delete a task by id.
    pub fn delete_task(&self, id: &str) -> Result<(), ServiceError> {
        self.store.delete(id)
    }

    /// Delete every task (the seed script clears before reseeding).
    pub fn clear_tasks(&self) -> Result<u64, ServiceError> {
        self.store.delete_all()
    }

    /// Whole-collection report.
    pub fn report(&self) -> Result<TaskReport, ServiceError> {
        self.store.report()
    }

    /// Weather for a task's city: resolve the task, geocode the city,
    /// fetch current conditions. The precondition checks run before any
    /// network call is made.
    pub async fn task_weather(&self, id: &str) -> Result<TaskWeather, ServiceError> {
        let task = self.store.get(id)?;

        if task.city.is_empty() {
            return Err(ServiceError::Validation(
                "task city is empty; add a city to the task".into(),
            ));
        }

        let Some(place) = self.weather.geocode(&task.city).await? else {
            return Err(ServiceError::NotFound(format!(
                "no location found for '{}'",
                task.city
            )));
        };

        let current = self.weather.current_conditions(&place).await?;

        Ok(TaskWeather {
            task_id: task.id,
            city: task.city,
            current,
        })
    }
}
