//! Server configuration, loaded from environment variables at startup.

/// Which persistence backend sits behind the message store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// In-memory list mirrored to a JSON file.
    File,
    /// SQLite table accessed through sqlx.
    Sqlite,
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKind::File => write!(f, "file"),
            StorageKind::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Runtime configuration for resume-board.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:9000"`).
    pub bind_address: String,

    /// Persistence backend for the message store (default: file).
    /// Set `BOARD_STORAGE=sqlite` to use the database backend instead.
    pub storage: StorageKind,

    /// JSON file path used by the file backend (default: `"messages.json"`).
    pub data_file: String,

    /// sqlx database URL used by the sqlite backend
    /// (default: `"sqlite://messages.db"`).
    pub database_url: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Comma-separated list of allowed CORS origins; `None` means wildcard.
    pub cors_allowed_origins: Option<String>,

    /// Serve Swagger UI at `/swagger-ui` (default: `true`).
    pub enable_swagger: bool,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("BOARD_BIND", "0.0.0.0:9000"),
            storage: match std::env::var("BOARD_STORAGE").as_deref() {
                Ok(v) if v.eq_ignore_ascii_case("sqlite") => StorageKind::Sqlite,
                _ => StorageKind::File,
            },
            data_file: env_or("BOARD_DATA_FILE", "messages.json"),
            database_url: env_or("BOARD_DATABASE_URL", "sqlite://messages.db"),
            log_level: env_or("BOARD_LOG", "info"),
            log_json: std::env::var("BOARD_LOG_JSON")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            cors_allowed_origins: std::env::var("BOARD_CORS_ORIGINS").ok(),
            enable_swagger: std::env::var("BOARD_ENABLE_SWAGGER")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
