use serde::{Deserialize, Serialize};

/// Relational store connection settings.
///
/// A full `url` wins. Without one, a MySQL URL is assembled from `host`,
/// `port`, `username`, `password` and `name`; with neither, a local SQLite
/// file is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default = "default_database_port")]
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_database_name")]
    pub name: String,
    #[serde(default = "default_database_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_database_migration_on_startup")]
    pub migration_on_startup: bool,
}

fn default_database_port() -> u16 {
    3306
}

fn default_database_name() -> String {
    "lending".to_string()
}

fn default_sqlite_url() -> String {
    "sqlite://./data/lending_report.db?mode=rwc".to_string()
}

fn default_database_max_connections() -> u32 {
    5
}

fn default_database_migration_on_startup() -> bool {
    true
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: None,
            port: default_database_port(),
            username: None,
            password: None,
            name: default_database_name(),
            max_connections: default_database_max_connections(),
            migration_on_startup: default_database_migration_on_startup(),
        }
    }
}

impl DatabaseConfig {
    /// Resolve the URL handed to the connection pool
    pub fn connection_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        let Some(host) = &self.host else {
            return default_sqlite_url();
        };

        let credentials = match (&self.username, &self.password) {
            (Some(user), Some(password)) => format!("{}:{}@", user, password),
            (Some(user), None) => format!("{}@", user),
            _ => String::new(),
        };

        format!(
            "mysql://{}{}:{}/{}",
            credentials, host, self.port, self.name
        )
    }

    /// In-memory SQLite databases live inside a single connection
    pub fn is_in_memory(&self) -> bool {
        self.connection_url().contains(":memory:")
    }
}
