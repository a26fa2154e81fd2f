use std::{env, fmt, str::FromStr};

use dotenvy::dotenv;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use thiserror::Error;
use validator::Validate;

const DEFAULT_BUCKET: &str = "cows-shelter";
const DEFAULT_MINIO_ENDPOINT: &str = "minio:9000";
const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },

    #[error("invalid configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Object storage backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    S3,
    Minio,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::S3 => f.write_str("s3"),
            StorageKind::Minio => f.write_str("minio"),
        }
    }
}

impl FromStr for StorageKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s3" => Ok(StorageKind::S3),
            "minio" => Ok(StorageKind::Minio),
            other => Err(ConfigError::Invalid {
                key: "STORAGE_TYPE",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub kind: StorageKind,
    pub bucket: String,
    /// Custom endpoint as `host[:port]`, without scheme.
    pub endpoint: Option<String>,
    pub region: String,
    pub use_ssl: bool,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    /// Public base URL (CDN) used instead of the endpoint when building object URLs.
    pub public_url: Option<String>,
}

impl StorageConfig {
    /// Endpoint with the scheme implied by `use_ssl`, as the SDK expects it.
    pub fn endpoint_url(&self) -> Option<String> {
        let scheme = if self.use_ssl { "https" } else { "http" };
        self.endpoint
            .as_ref()
            .map(|endpoint| format!("{}://{}", scheme, endpoint))
    }
}

#[derive(Debug, Clone, Validate)]
pub struct DatabaseConfig {
    /// Full connection string; when set, the discrete fields below are ignored.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
    #[validate(range(min = 1, max = 100))]
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url);
        }

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(PgSslMode::from_str(&self.ssl_mode)?))
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

#[derive(Debug, Clone, Validate)]
pub struct Config {
    #[validate(nested)]
    pub database: DatabaseConfig,
    pub port: u16,
    pub storage: StorageConfig,
    pub jwt: JwtConfig,
    #[validate(range(min = 1, max = 104857600))] // Max 100MB
    pub max_file_size: u64,
    pub allowed_document_extensions: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load environment variables from `.env` file (if it exists)
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let secret = var("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let allowed_document_extensions = var("ALLOWED_DOCUMENT_EXTENSIONS")
            .unwrap_or_else(|| "pdf,doc,docx".to_string())
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let config = Config {
            database: database_config(&var)?,
            port: parse_or(&var, "PORT", 8080)?,
            storage: storage_config(&var)?,
            jwt: JwtConfig {
                secret,
                expiry_hours: parse_or(&var, "JWT_EXPIRY_HOURS", 24)?,
            },
            max_file_size: parse_or(&var, "MAX_FILE_SIZE", 10_485_760)?,
            allowed_document_extensions,
        };

        // Validate configuration values (e.g. file size range)
        config.validate()?;
        Ok(config)
    }
}

/// Database settings alone, for commands that never touch storage or tokens.
pub fn database_from_env() -> Result<DatabaseConfig, ConfigError> {
    dotenv().ok();
    let var = |key: &str| env::var(key).ok().filter(|v| !v.trim().is_empty());
    let database = database_config(&var)?;
    database.validate()?;
    Ok(database)
}

fn database_config<F>(var: &F) -> Result<DatabaseConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(DatabaseConfig {
        url: var("DATABASE_URL"),
        host: var("DB_HOST").unwrap_or_else(|| "localhost".into()),
        port: parse_or(var, "DB_PORT", 5432)?,
        user: var("DB_USER").unwrap_or_else(|| "postgres".into()),
        password: var("DB_PASSWORD").unwrap_or_default(),
        name: var("DB_NAME").unwrap_or_else(|| "cows_shelter".into()),
        ssl_mode: var("DB_SSLMODE").unwrap_or_else(|| "prefer".into()),
        max_connections: parse_or(var, "DB_MAX_CONNECTIONS", 5)?,
    })
}

fn storage_config<F>(var: &F) -> Result<StorageConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let kind = match var("STORAGE_TYPE") {
        Some(kind) => kind.parse()?,
        None if var("MINIO_ENDPOINT").is_some() => StorageKind::Minio,
        None => StorageKind::S3,
    };

    let bucket = var("STORAGE_BUCKET")
        .or_else(|| var("MINIO_BUCKET"))
        .unwrap_or_else(|| DEFAULT_BUCKET.to_string());

    // STORAGE_USE_SSL wins; MINIO_USE_SSL is honoured when it is absent
    let use_ssl = var("STORAGE_USE_SSL")
        .or_else(|| var("MINIO_USE_SSL"))
        .map(|v| !v.trim().eq_ignore_ascii_case("false"))
        .unwrap_or(true);

    let public_url = var("PUBLIC_STORAGE_URL");

    let config = match kind {
        StorageKind::Minio => StorageConfig {
            kind,
            bucket,
            endpoint: Some(strip_scheme(
                &var("MINIO_ENDPOINT").unwrap_or_else(|| DEFAULT_MINIO_ENDPOINT.to_string()),
            )),
            region: var("MINIO_REGION")
                .or_else(|| var("AWS_REGION"))
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            use_ssl,
            access_key: var("MINIO_ACCESS_KEY"),
            secret_key: var("MINIO_SECRET_KEY"),
            public_url,
        },
        StorageKind::S3 => StorageConfig {
            kind,
            bucket,
            endpoint: var("S3_ENDPOINT")
                .or_else(|| var("MINIO_ENDPOINT"))
                .map(|endpoint| strip_scheme(&endpoint)),
            region: var("AWS_REGION")
                .or_else(|| var("MINIO_REGION"))
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            use_ssl,
            access_key: var("AWS_ACCESS_KEY_ID"),
            secret_key: var("AWS_SECRET_ACCESS_KEY"),
            public_url,
        },
    };

    Ok(config)
}

fn strip_scheme(endpoint: &str) -> String {
    endpoint
        .trim()
        .trim_start_matches("http://")
        .trim_start_matches("https://")
        .trim_end_matches('/')
        .to_string()
}

fn parse_or<F, T>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match var(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
