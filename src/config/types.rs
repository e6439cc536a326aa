use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub users: UsersConfig,
    #[serde(default)]
    pub todos: TodosConfig,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `FLUXSTORE_LOG` is unset (e.g. "info", "fluxstore=debug").
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Settings for the asynchronous user fetch scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsersConfig {
    /// Simulated fetch latency in milliseconds (default: 2500).
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Users delivered when the fetch completes.
    #[serde(default = "default_user_names")]
    pub names: Vec<String>,
}

/// Settings for the todo list scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodosConfig {
    /// Initial list; defaults to the built-in four items.
    #[serde(default = "crate::scenarios::todos::default_todos")]
    pub initial: Vec<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_delay_ms() -> u64 {
    2500
}

fn default_user_names() -> Vec<String> {
    vec![
        "Jeff".to_string(),
        "William".to_string(),
        "Alice".to_string(),
    ]
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            names: default_user_names(),
        }
    }
}

impl Default for TodosConfig {
    fn default() -> Self {
        Self {
            initial: crate::scenarios::todos::default_todos(),
        }
    }
}
