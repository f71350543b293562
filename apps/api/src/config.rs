use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if any required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Privileged Postgres connection string of the hosted backend.
    pub database_url: String,
    /// Public base URL of the hosted backend; public object URLs hang off it.
    pub supabase_url: String,
    pub storage_endpoint: String,
    pub storage_access_key_id: String,
    pub storage_secret_access_key: String,
    pub storage_bucket: String,
    pub storage_region: String,
    pub identity_userinfo_url: String,
    pub identity_sign_in_url: String,
    pub sign_out_redirect_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            supabase_url: require_env("SUPABASE_URL")?,
            storage_endpoint: require_env("STORAGE_ENDPOINT")?,
            storage_access_key_id: require_env("STORAGE_ACCESS_KEY_ID")?,
            storage_secret_access_key: require_env("STORAGE_SECRET_ACCESS_KEY")?,
            storage_bucket: optional_env("STORAGE_BUCKET", "resumes"),
            storage_region: optional_env("STORAGE_REGION", "us-east-1"),
            identity_userinfo_url: require_env("IDENTITY_USERINFO_URL")?,
            identity_sign_in_url: require_env("IDENTITY_SIGN_IN_URL")?,
            sign_out_redirect_url: optional_env("SIGN_OUT_REDIRECT_URL", "/"),
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        anyhow::bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
