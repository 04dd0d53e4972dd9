/*
 * Responsibility
 * - Read environment/settings once at startup (key material, algorithm, port, timeouts)
 * - Validate values (startup fails when something required is missing)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
    Unreadable {
        key: &'static str,
        source: std::io::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
            ConfigError::Unreadable { key, source } => {
                write!(f, "unreadable configuration: {} ({})", key, source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Unreadable { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub request_timeout: Duration,

    // The only signing algorithm a token may use.
    pub key_algorithm: Algorithm,
    pub public_key_pem: String,

    pub auth_issuer: Option<String>,
    pub auth_audience: Option<String>,
    pub access_token_leeway_seconds: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("request_timeout", &self.request_timeout)
            .field("key_algorithm", &self.key_algorithm)
            .field("auth_issuer", &self.auth_issuer)
            .field("auth_audience", &self.auth_audience)
            .field("access_token_leeway_seconds", &self.access_token_leeway_seconds)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = parse_or("PORT", std::env::var("PORT").ok(), 3000)?;

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let request_timeout = Duration::from_secs(parse_or(
            "REQUEST_TIMEOUT_SECONDS",
            std::env::var("REQUEST_TIMEOUT_SECONDS").ok(),
            30,
        )?);

        let key_algorithm = std::env::var("KEY_ALGORITHM")
            .map_err(|_| ConfigError::Missing("KEY_ALGORITHM"))
            .and_then(|v| parse_key_algorithm(&v))?;

        let public_key_pem = load_public_key_pem()?;

        let auth_issuer = non_empty_var("AUTH_ISSUER");
        let auth_audience = non_empty_var("AUTH_AUDIENCE");

        let access_token_leeway_seconds = parse_or(
            "ACCESS_TOKEN_LEEWAY_SECONDS",
            std::env::var("ACCESS_TOKEN_LEEWAY_SECONDS").ok(),
            0,
        )?;

        Ok(Self {
            addr,
            app_env,
            request_timeout,
            key_algorithm,
            public_key_pem,
            auth_issuer,
            auth_audience,
            access_token_leeway_seconds,
        })
    }
}

/// Parses `KEY_ALGORITHM`. HMAC algorithms are refused: the credential is a public key.
pub fn parse_key_algorithm(value: &str) -> Result<Algorithm, ConfigError> {
    let alg = Algorithm::from_str(value.trim()).map_err(|_| ConfigError::Invalid("KEY_ALGORITHM"))?;

    match alg {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
            Err(ConfigError::Invalid("KEY_ALGORITHM"))
        }
        _ => Ok(alg),
    }
}

// Inline PEM wins; otherwise the file is read once, here, and never again.
fn load_public_key_pem() -> Result<String, ConfigError> {
    if let Some(pem) = non_empty_var("PUBLIC_KEY_PEM") {
        return Ok(pem.replace("\\n", "\n"));
    }

    let path = std::env::var("PUBLIC_KEY_PATH").unwrap_or_else(|_| "public-key.pem".to_string());

    std::fs::read_to_string(&path).map_err(|source| ConfigError::Unreadable {
        key: "PUBLIC_KEY_PATH",
        source,
    })
}

/// Unset or blank falls back to `default`; a value that does not parse is an error.
fn parse_or<T: FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid(key)),
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
