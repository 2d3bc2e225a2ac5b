use std::path::PathBuf;
use std::str::FromStr;

/// Which [`ProjectStore`](relatorio_db::store::ProjectStore) implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl StoreBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        }
    }
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!(
                "unknown store backend '{other}', expected 'postgres' or 'memory'"
            )),
        }
    }
}

/// Account created (or re-keyed) at startup so the login endpoint is usable.
#[derive(Debug, Clone)]
pub struct BootstrapUser {
    pub username: String,
    pub password: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the
/// database location, which is required for the PostgreSQL backend.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub store_backend: StoreBackend,
    /// Connection string; `None` only when the memory backend is selected.
    pub database_url: Option<String>,
    /// Whether the project list cache is active (default: `true`).
    pub cache_enabled: bool,
    /// Directory served under `/app` when set.
    pub static_dir: Option<PathBuf>,
    pub bootstrap_user: Option<BootstrapUser>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `STORE_BACKEND`        | `postgres`                 |
    /// | `DATABASE_URL`         | composed from `DATABASE_*` |
    /// | `CACHE_ENABLED`        | `true`                     |
    /// | `STATIC_DIR`           | unset                      |
    /// | `BOOTSTRAP_USERNAME`   | unset                      |
    /// | `BOOTSTRAP_PASSWORD`   | unset                      |
    ///
    /// Panics on malformed values; misconfiguration should stop startup.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = var("PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let store_backend: StoreBackend = var("STORE_BACKEND")
            .unwrap_or_else(|| "postgres".into())
            .parse()
            .unwrap_or_else(|e| panic!("STORE_BACKEND: {e}"));

        let database_url = var("DATABASE_URL").or_else(|| compose_database_url(&var));
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            panic!("DATABASE_URL (or DATABASE_HOST and DATABASE_NAME) must be set");
        }

        let cache_enabled = var("CACHE_ENABLED")
            .map(|v| parse_flag(&v).expect("CACHE_ENABLED must be true or false"))
            .unwrap_or(true);

        let static_dir = var("STATIC_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let bootstrap_user = match (var("BOOTSTRAP_USERNAME"), var("BOOTSTRAP_PASSWORD")) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(BootstrapUser { username, password })
            }
            _ => None,
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store_backend,
            database_url,
            cache_enabled,
            static_dir,
            bootstrap_user,
        }
    }
}

/// Assemble a PostgreSQL URL from its parts when `DATABASE_URL` is absent.
///
/// Requires at least `DATABASE_HOST` and `DATABASE_NAME`.
fn compose_database_url(var: &impl Fn(&str) -> Option<String>) -> Option<String> {
    let host = var("DATABASE_HOST")?;
    let name = var("DATABASE_NAME")?;
    let port = var("DATABASE_PORT").unwrap_or_else(|| "5432".into());
    let user = var("DATABASE_USER").unwrap_or_else(|| "postgres".into());

    let credentials = match var("DATABASE_PASSWORD") {
        Some(password) => format!("{user}:{password}"),
        None => user,
    };
    Some(format!("postgres://{credentials}@{host}:{port}/{name}"))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
