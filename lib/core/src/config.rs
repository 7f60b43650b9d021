use std::path::PathBuf;

/// Server configuration, read once from the environment at startup.
///
/// There is no runtime mutation: binaries call [`ServerConfig::from_env`]
/// in `main` and pass the result (or pieces of it) down by value.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Which relational backend to use and how to reach it.
    pub database: DatabaseConfig,

    /// Listen address for the HTTP server.
    pub listen: String,

    /// Secret/key material for anything that needs signing.
    pub secret_key: String,

    /// Enables verbose diagnostics. Never turn on in production.
    pub debug: bool,

    /// Origins allowed by the CORS layer. `"*"` means any origin.
    pub allowed_origins: Vec<String>,
}

/// Storage backend selection.
///
/// `DB_ENGINE=sqlite` (the default) uses an embedded SQLite file;
/// `DB_ENGINE=postgres` connects to a networked PostgreSQL server with
/// credentials taken from `DB_HOST`/`DB_PORT`/`DB_NAME`/`DB_USER`/`DB_PASSWORD`.
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseConfig {
    Sqlite {
        path: PathBuf,
    },
    Postgres {
        host: String,
        port: u16,
        dbname: String,
        user: String,
        password: String,
    },
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    ///
    /// Recognised variables (all optional):
    /// - `DB_ENGINE` — `sqlite` (default) or `postgres`
    /// - `SQLITE_PATH` — sqlite database file, default `taskboard.sqlite`
    /// - `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`, `DB_PASSWORD`
    /// - `LISTEN` — default `0.0.0.0:8080`
    /// - `SECRET_KEY`
    /// - `DEBUG` — `1`/`true`/`yes` to enable
    /// - `ALLOWED_ORIGINS` — comma-separated list, default `*`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Tests pass a closure over a map instead of touching the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database = if get("DB_ENGINE", "sqlite").to_lowercase() == "postgres" {
            DatabaseConfig::Postgres {
                host: get("DB_HOST", "localhost"),
                port: lookup("DB_PORT").and_then(|p| p.parse().ok()).unwrap_or(5432),
                dbname: get("DB_NAME", "postgres"),
                user: get("DB_USER", "postgres"),
                password: get("DB_PASSWORD", ""),
            }
        } else {
            DatabaseConfig::Sqlite {
                path: PathBuf::from(get("SQLITE_PATH", "taskboard.sqlite")),
            }
        };

        let allowed_origins = get("ALLOWED_ORIGINS", "*")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        let debug = matches!(
            get("DEBUG", "false").to_lowercase().as_str(),
            "1" | "true" | "yes"
        );

        Self {
            database,
            listen: get("LISTEN", "0.0.0.0:8080"),
            secret_key: get("SECRET_KEY", "demo-secret-key"),
            debug,
            allowed_origins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_to_sqlite() {
        let config = config_from(&[]);
        assert_eq!(
            config.database,
            DatabaseConfig::Sqlite {
                path: PathBuf::from("taskboard.sqlite")
            }
        );
        assert_eq!(config.listen, "0.0.0.0:8080");
        assert!(!config.debug);
        assert_eq!(config.allowed_origins, vec!["*".to_string()]);
    }

    #[test]
    fn postgres_toggle_reads_credentials() {
        let config = config_from(&[
            ("DB_ENGINE", "postgres"),
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "5433"),
            ("DB_NAME", "taskboard"),
            ("DB_USER", "app"),
            ("DB_PASSWORD", "hunter2"),
        ]);
        assert_eq!(
            config.database,
            DatabaseConfig::Postgres {
                host: "db.internal".into(),
                port: 5433,
                dbname: "taskboard".into(),
                user: "app".into(),
                password: "hunter2".into(),
            }
        );
    }

    #[test]
    fn postgres_port_falls_back_on_garbage() {
        let config = config_from(&[("DB_ENGINE", "postgres"), ("DB_PORT", "not-a-port")]);
        match config.database {
            DatabaseConfig::Postgres { port, .. } => assert_eq!(port, 5432),
            other => panic!("expected postgres config, got {:?}", other),
        }
    }

    #[test]
    fn origins_split_and_trimmed() {
        let config = config_from(&[(
            "ALLOWED_ORIGINS",
            "https://a.example, https://b.example ,,",
        )]);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn debug_flag_parsing() {
        assert!(config_from(&[("DEBUG", "1")]).debug);
        assert!(config_from(&[("DEBUG", "True")]).debug);
        assert!(!config_from(&[("DEBUG", "off")]).debug);
    }
}
