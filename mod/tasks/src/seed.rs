//! Fixed demo data set for manual testing of the dashboard and reports.

use taskboard_core::ServiceError;

use crate::model::{CreateTask, Task, TaskStatus};
use crate::service::TasksService;

/// One row of the demo set.
pub struct SeedTask {
    pub title: &'static str,
    pub description: &'static str,
    pub status: TaskStatus,
    pub priority: i64,
    pub city: &'static str,
}

/// The demo set: 5 tasks per status, priorities 1-3 (six at priority 1,
/// six at 2, three at 3). Some tasks deliberately have no city so the
/// weather precondition path can be exercised by hand.
pub const SEED_TASKS: &[SeedTask] = &[
    // To do
    SeedTask {
        title: "Design new user interface",
        description: "Create mockups and wireframes for the new UI",
        status: TaskStatus::Todo,
        priority: 1,
        city: "New York",
    },
    SeedTask {
        title: "Plan project architecture",
        description: "Document the system architecture and design patterns",
        status: TaskStatus::Todo,
        priority: 1,
        city: "London",
    },
    SeedTask {
        title: "Review code documentation",
        description: "Review and update code documentation",
        status: TaskStatus::Todo,
        priority: 2,
        city: "San Francisco",
    },
    SeedTask {
        title: "Set up development environment",
        description: "Configure local development setup",
        status: TaskStatus::Todo,
        priority: 3,
        city: "",
    },
    SeedTask {
        title: "Write unit tests",
        description: "Create comprehensive unit tests",
        status: TaskStatus::Todo,
        priority: 2,
        city: "Tokyo",
    },
    // Doing
    SeedTask {
        title: "Implement authentication system",
        description: "Build user authentication and authorization",
        status: TaskStatus::Doing,
        priority: 1,
        city: "New York",
    },
    SeedTask {
        title: "Develop REST API endpoints",
        description: "Create API endpoints for task management",
        status: TaskStatus::Doing,
        priority: 1,
        city: "London",
    },
    SeedTask {
        title: "Create database models",
        description: "Design and implement database schema",
        status: TaskStatus::Doing,
        priority: 2,
        city: "Paris",
    },
    SeedTask {
        title: "Build frontend components",
        description: "Develop React components for the dashboard",
        status: TaskStatus::Doing,
        priority: 2,
        city: "Berlin",
    },
    SeedTask {
        title: "Optimize database queries",
        description: "Improve query performance",
        status: TaskStatus::Doing,
        priority: 3,
        city: "",
    },
    // Done
    SeedTask {
        title: "Fix critical security bug",
        description: "Resolved security vulnerability in authentication",
        status: TaskStatus::Done,
        priority: 1,
        city: "New York",
    },
    SeedTask {
        title: "Deploy application to production",
        description: "Successfully deployed to production server",
        status: TaskStatus::Done,
        priority: 1,
        city: "London",
    },
    SeedTask {
        title: "Complete project documentation",
        description: "Finished writing project documentation",
        status: TaskStatus::Done,
        priority: 2,
        city: "San Francisco",
    },
    SeedTask {
        title: "Set up CI/CD pipeline",
        description: "Configured continuous integration and deployment",
        status: TaskStatus::Done,
        priority: 2,
        city: "",
    },
    SeedTask {
        title: "Code review and refactoring",
        description: "Completed code review and refactored legacy code",
        status: TaskStatus::Done,
        priority: 3,
        city: "Tokyo",
    },
];

/// Clear the store, then insert the demo set through the normal create
/// path (so ids and timestamps are assigned as usual). Returns the
/// created tasks in insertion order.
///
/// Destructive: every existing task is deleted first. Running it twice
/// leaves exactly the demo set.
pub fn run(service: &TasksService) -> Result<Vec<Task>, ServiceError> {
    service.clear_tasks()?;

    let mut created = Vec::with_capacity(SEED_TASKS.len());
    for seed in SEED_TASKS {
        created.push(service.create_task(CreateTask {
            title: Some(seed.title.to_string()),
            description: Some(seed.description.to_string()),
            status: Some(seed.status),
            priority: Some(seed.priority),
            city: Some(seed.city.to_string()),
        })?);
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use taskboard_sql::{SQLStore, SqliteStore};

    fn test_service() -> Arc<TasksService> {
        let db: Arc<dyn SQLStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        TasksService::new(db).unwrap()
    }

    #[test]
    fn seeds_fifteen_tasks() {
        let svc = test_service();
        let created = run(&svc).unwrap();
        assert_eq!(created.len(), 15);

        let report = svc.report().unwrap();
        assert_eq!(report.total, 15);
        // 5 per status, ordered by status name.
        let statuses: Vec<(TaskStatus, i64)> = report
            .by_status
            .iter()
            .map(|r| (r.status, r.count))
            .collect();
        assert_eq!(
            statuses,
            vec![
                (TaskStatus::Doing, 5),
                (TaskStatus::Done, 5),
                (TaskStatus::Todo, 5),
            ]
        );
        // Priorities from the literal list: 1 -> 6, 2 -> 6, 3 -> 3.
        let priorities: Vec<(i64, i64)> = report
            .by_priority
            .iter()
            .map(|r| (r.priority, r.count))
            .collect();
        assert_eq!(priorities, vec![(1, 6), (2, 6), (3, 3)]);
    }

    #[test]
    fn reseeding_clears_first() {
        let svc = test_service();
        run(&svc).unwrap();
        run(&svc).unwrap();
        assert_eq!(svc.report().unwrap().total, 15);
    }

    #[test]
    fn reseeding_replaces_prior_data() {
        let svc = test_service();
        let stray = svc
            .create_task(CreateTask {
                title: Some("Stray task".into()),
                ..Default::default()
            })
            .unwrap();

        run(&svc).unwrap();
        assert!(svc.get_task(&stray.id).is_err());
        assert_eq!(svc.report().unwrap().total, 15);
    }
}
