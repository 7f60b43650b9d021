use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Lifecycle stage of a task.
///
/// ```text
/// todo → doing → done
/// ```
///
/// There is no enforced transition order — any status can be set at any
/// time; the stages are a convention for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(Self::Todo),
            "doing" => Some(Self::Doing),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Task — the single persisted entity
// ---------------------------------------------------------------------------

/// A tracked to-do item.
///
/// `id` and `created_at` are assigned once on create and never change;
/// everything else can be updated. `city` drives the weather lookup and
/// an empty string means "not set".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,

    /// Required short text.
    pub title: String,

    /// Optional free text.
    #[serde(default)]
    pub description: String,

    pub status: TaskStatus,

    /// Urgency ranking, conventionally 1 (high) to 5 (low). Not bounded.
    pub priority: i64,

    /// City name for the weather lookup, empty when not set.
    #[serde(default)]
    pub city: String,

    /// RFC 3339 creation timestamp; default list ordering key.
    pub created_at: String,
}

/// Default priority assigned when a create request leaves it out.
pub const DEFAULT_PRIORITY: i64 = 3;

// ---------------------------------------------------------------------------
// API request types
// ---------------------------------------------------------------------------

/// Body for `POST /tasks`.
///
/// Every field is optional at the deserialization layer so that a missing
/// `title` becomes a structured validation error naming the field instead
/// of a body-parse rejection. Defaults: `status=todo`, `priority=3`,
/// `description=""`, `city=""`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTask {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub status: Option<TaskStatus>,

    #[serde(default)]
    pub priority: Option<i64>,

    #[serde(default)]
    pub city: Option<String>,
}

/// Body for `PUT`/`PATCH /tasks/{id}`.
///
/// A flat field-level merge: fields present in the body replace the
/// stored value, absent fields keep it. `id` and `created_at` are not
/// patchable; unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub status: Option<TaskStatus>,

    #[serde(default)]
    pub priority: Option<i64>,

    #[serde(default)]
    pub city: Option<String>,
}

/// Query parameters for `GET /tasks`.
#[derive(Debug, Default, Deserialize)]
pub struct TaskListQuery {
    /// Page size, default 20.
    #[serde(default)]
    pub limit: Option<usize>,

    #[serde(default)]
    pub offset: Option<usize>,

    #[serde(default)]
    pub status: Option<TaskStatus>,

    #[serde(default)]
    pub priority: Option<i64>,
}

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// One group of the by-status breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: TaskStatus,
    pub count: i64,
}

/// One group of the by-priority breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityCount {
    pub priority: i64,
    pub count: i64,
}

/// Whole-collection report: total plus counts grouped by status and by
/// priority. Only observed groups appear; `by_status` is ordered by
/// status name, `by_priority` ascending by priority.
#[derive(Debug, Clone, Serialize)]
pub struct TaskReport {
    pub total: i64,
    pub by_status: Vec<StatusCount>,
    pub by_priority: Vec<PriorityCount>,
}

// ---------------------------------------------------------------------------
// Weather lookup response
// ---------------------------------------------------------------------------

/// Response for `GET /tasks/{id}/weather`.
///
/// `current` is the forecast service's current-conditions object passed
/// through verbatim — its internal shape is not parsed or validated.
#[derive(Debug, Clone, Serialize)]
pub struct TaskWeather {
    pub task_id: String,
    pub city: String,
    pub current: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrip() {
        for s in &[TaskStatus::Todo, TaskStatus::Doing, TaskStatus::Done] {
            let json = serde_json::to_string(s).unwrap();
            let back: TaskStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(*s, back);
            assert_eq!(TaskStatus::from_str(s.as_str()), Some(*s));
        }
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TaskStatus::Todo).unwrap(), r#""todo""#);
        assert_eq!(serde_json::to_string(&TaskStatus::Doing).unwrap(), r#""doing""#);
        assert_eq!(serde_json::to_string(&TaskStatus::Done).unwrap(), r#""done""#);
    }

    #[test]
    fn status_rejects_unknown() {
        assert!(TaskStatus::from_str("archived").is_none());
        assert!(serde_json::from_str::<TaskStatus>(r#""archived""#).is_err());
    }

    #[test]
    fn task_json_roundtrip() {
        let task = Task {
            id: "abc123".into(),
            title: "Write docs".into(),
            description: "chapter one".into(),
            status: TaskStatus::Doing,
            priority: 2,
            city: "London".into(),
            created_at: "2026-01-01T00:00:00Z".into(),
        };
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, "abc123");
        assert_eq!(back.status, TaskStatus::Doing);
        assert_eq!(back.priority, 2);
        assert_eq!(back.city, "London");
    }

    #[test]
    fn task_optional_text_fields_default() {
        let json = r#"{"id":"a","title":"t","status":"todo","priority":3,"created_at":"2026-01-01T00:00:00Z"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.description, "");
        assert_eq!(task.city, "");
    }

    #[test]
    fn create_request_empty_body() {
        let req: CreateTask = serde_json::from_str("{}").unwrap();
        assert!(req.title.is_none());
        assert!(req.status.is_none());
        assert!(req.priority.is_none());
    }

    #[test]
    fn create_request_full_body() {
        let json = r#"{"title":"Deploy","status":"done","priority":1,"city":"Berlin"}"#;
        let req: CreateTask = serde_json::from_str(json).unwrap();
        assert_eq!(req.title.as_deref(), Some("Deploy"));
        assert_eq!(req.status, Some(TaskStatus::Done));
        assert_eq!(req.priority, Some(1));
        assert_eq!(req.city.as_deref(), Some("Berlin"));
    }

    #[test]
    fn update_request_partial_body() {
        let patch: UpdateTask = serde_json::from_str(r#"{"status":"doing"}"#).unwrap();
        assert_eq!(patch.status, Some(TaskStatus::Doing));
        assert!(patch.title.is_none());
        assert!(patch.priority.is_none());
    }

    #[test]
    fn update_request_ignores_unknown_keys() {
        let json = r#"{"id":"forged","created_at":"1970-01-01T00:00:00Z","priority":1}"#;
        let patch: UpdateTask = serde_json::from_str(json).unwrap();
        assert_eq!(patch.priority, Some(1));
        assert!(patch.title.is_none());
    }

    #[test]
    fn update_request_rejects_bad_status() {
        assert!(serde_json::from_str::<UpdateTask>(r#"{"status":"archived"}"#).is_err());
    }
}
