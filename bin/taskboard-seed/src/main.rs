//! `taskboard-seed` — load the demo data set.
//!
//! Clears every existing task, then inserts the fixed 15-task demo set
//! and prints a summary. Destructive by design: run it twice and you
//! still end up with exactly the demo set.
//!
//! The target database comes from the same environment variables the
//! server reads (`DB_ENGINE`, `SQLITE_PATH`, `DB_*`).

use std::sync::Arc;

use taskboard_core::{DatabaseConfig, ServerConfig};
use taskboard_sql::SQLStore;

fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();
    let sql = open_store(&config.database)?;
    let service = tasks::service::TasksService::new(sql)?;

    println!("Clearing existing tasks...");
    println!("Creating {} sample tasks...", tasks::seed::SEED_TASKS.len());
    let created = tasks::seed::run(&service)?;
    for task in &created {
        println!(
            "[+] Created: {} ({}, Priority {})",
            task.title, task.status, task.priority
        );
    }

    let report = service.report()?;
    let rule = "=".repeat(60);
    println!();
    println!("{rule}");
    println!("SUMMARY");
    println!("{rule}");
    println!("Total tasks: {}", report.total);
    for row in &report.by_status {
        println!("  - {}: {}", row.status, row.count);
    }
    println!();
    println!("Priority breakdown:");
    for row in &report.by_priority {
        println!("  - Priority {}: {} tasks", row.priority, row.count);
    }
    println!("{rule}");
    println!("Sample data created successfully.");

    Ok(())
}

/// Open the SQL backend selected by the environment toggle.
fn open_store(database: &DatabaseConfig) -> anyhow::Result<Arc<dyn SQLStore>> {
    match database {
        DatabaseConfig::Sqlite { path } => {
            println!("Using sqlite store at {}", path.display());
            Ok(Arc::new(
                taskboard_sql::SqliteStore::open(path)
                    .map_err(|e| anyhow::anyhow!("failed to open sqlite store: {}", e))?,
            ))
        }
        DatabaseConfig::Postgres {
            host,
            port,
            dbname,
            user,
            password,
        } => {
            println!("Using postgres store at {}:{}/{}", host, port, dbname);
            Ok(Arc::new(
                taskboard_sql::PostgresStore::connect(host, *port, dbname, user, password)
                    .map_err(|e| anyhow::anyhow!("failed to connect to postgres: {}", e))?,
            ))
        }
    }
}
