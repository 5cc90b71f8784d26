use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub http_addr: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub http_request_body_limit_bytes: usize,
    pub admin: Option<AdminBootstrap>,
}

/// Admin account seeded at startup. Present only when both `ADMIN_EMAIL`
/// and `ADMIN_PASSWORD` are set.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let database_url = get_required("DATABASE_URL").context("DATABASE_URL is required")?;

        let http_addr = std::env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let cors_origins = parse_cors_origins(
            std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:8000,http://127.0.0.1:8000".to_string()),
        );
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());
        let http_request_body_limit_bytes =
            parse_usize_env("HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;
        let admin = parse_admin_bootstrap()?;

        Ok(Self {
            database_url,
            http_addr,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
            admin,
        })
    }
}

fn parse_admin_bootstrap() -> Result<Option<AdminBootstrap>> {
    let email = std::env::var("ADMIN_EMAIL").ok().filter(|v| !v.trim().is_empty());
    let password = std::env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty());

    match (email, password) {
        (Some(email), Some(password)) => {
            let username =
                std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
            Ok(Some(AdminBootstrap {
                username,
                email: email.trim().to_string(),
                password,
            }))
        }
        (None, None) => Ok(None),
        _ => Err(anyhow!(
            "ADMIN_EMAIL and ADMIN_PASSWORD must be set together"
        )),
    }
}

fn get_required(key: &str) -> Result<String> {
    let value = std::env::var(key)?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_cors_origins(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_usize_env(key: &str, default: usize) -> Result<usize> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
