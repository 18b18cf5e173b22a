use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default identity attached to requests authenticated by the legacy token.
pub const DEFAULT_ADMIN_TOKEN_EMAIL: &str = "admin@localhost";

#[derive(Clone)]
pub struct Config {
    // Auth secrets
    pub jwt_secret: String,
    /// Legacy static token. Fallback auth is disabled when unset.
    pub admin_token: Option<String>,
    /// Identity bound to requests authenticated by the legacy token.
    pub admin_token_email: String,

    // Admin identity (login is unavailable until both are set)
    pub admin_email: Option<String>,
    pub admin_password_hash: Option<String>,

    // Server
    pub bind_addr: SocketAddr,
    pub production: bool,

    // Storage
    pub data_dir: PathBuf,

    // CORS. Empty means no allowlist configured (permissive, no credentials).
    pub allowed_origins: Vec<String>,

    // Rate limiting
    pub rate_limit_api_per_min: u32,
    pub rate_limit_login_per_15min: u32,
    pub rate_limit_admin_per_15min: u32,
    pub rate_limit_contact_per_15min: u32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("jwt_secret", &"[REDACTED]")
            .field("admin_token", &self.admin_token.as_ref().map(|_| "[REDACTED]"))
            .field("admin_token_email", &self.admin_token_email)
            .field("admin_email", &self.admin_email)
            .field("admin_password_hash", &self.admin_password_hash.as_ref().map(|_| "[REDACTED]"))
            .field("bind_addr", &self.bind_addr)
            .field("production", &self.production)
            .field("data_dir", &self.data_dir)
            .field("allowed_origins", &self.allowed_origins)
            .field("rate_limit_api_per_min", &self.rate_limit_api_per_min)
            .field("rate_limit_login_per_15min", &self.rate_limit_login_per_15min)
            .field("rate_limit_admin_per_15min", &self.rate_limit_admin_per_15min)
            .field("rate_limit_contact_per_15min", &self.rate_limit_contact_per_15min)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Failed to parse {0}: {1}")]
    ParseError(String, String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Attempt to load .env file, but don't fail if it doesn't exist
        // (env vars may be set directly in production)
        let _ = dotenvy::dotenv();

        // JWT_SECRET is required — token issuance/verification cannot work
        // without it, so startup fails here.
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| ConfigError::MissingVar("JWT_SECRET".to_string()))?;

        if jwt_secret.is_empty() {
            return Err(ConfigError::InvalidValue(
                "JWT_SECRET".to_string(),
                "cannot be empty".to_string(),
            ));
        }

        // Legacy static token, kept for callers that predate signed tokens.
        // Empty value is treated as unset.
        let admin_token = env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty());

        let admin_token_email = env::var("ADMIN_TOKEN_EMAIL")
            .ok()
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_TOKEN_EMAIL.to_string());

        // Admin login identity. Absence disables login but the server still
        // runs for read-only routes.
        let admin_email = env::var("ADMIN_EMAIL").ok().filter(|e| !e.is_empty());
        let admin_password_hash = env::var("ADMIN_PASSWORD_HASH")
            .ok()
            .filter(|h| !h.is_empty());

        // Server
        let bind_addr_str = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_addr = bind_addr_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::ParseError("BIND_ADDR".to_string(), e.to_string()))?;

        let production = env::var("APP_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);

        // Storage
        let data_dir = PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()));

        // CORS: comma-separated origins, trailing slashes stripped so they
        // match the Origin header exactly
        let allowed_origins: Vec<String> = env::var("FRONTEND_URL")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .collect();

        // Rate limiting
        let rate_limit_api_per_min = parse_env_or_default("RATE_LIMIT_API_PER_MIN", 100)?;
        let rate_limit_login_per_15min = parse_env_or_default("RATE_LIMIT_LOGIN_PER_15MIN", 5)?;
        let rate_limit_admin_per_15min = parse_env_or_default("RATE_LIMIT_ADMIN_PER_15MIN", 50)?;
        let rate_limit_contact_per_15min = parse_env_or_default("RATE_LIMIT_CONTACT_PER_15MIN", 5)?;

        Ok(Config {
            jwt_secret,
            admin_token,
            admin_token_email,
            admin_email,
            admin_password_hash,
            bind_addr,
            production,
            data_dir,
            allowed_origins,
            rate_limit_api_per_min,
            rate_limit_login_per_15min,
            rate_limit_admin_per_15min,
            rate_limit_contact_per_15min,
        })
    }

    /// True when both halves of the admin login identity are configured.
    pub fn login_configured(&self) -> bool {
        self.admin_email.is_some() && self.admin_password_hash.is_some()
    }
}

/// Helper function to parse environment variable with a default value
fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| ConfigError::ParseError(key.to_string(), format!("{}: {}", e, val))),
        Err(_) => Ok(default),
    }
}
