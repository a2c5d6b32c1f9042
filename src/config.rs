use std::env;
use anyhow::{Context, Result};

/// The application's configuration.
#[derive(Clone)]
pub struct Config {
    /// The port the HTTP server binds to.
    pub port: u16,
    /// The deployment environment (`development` or `production`).
    pub app_env: String,
    /// The duration of a session in days.
    pub session_duration_days: i64,
    /// The key the local provider signs session cookies with.
    pub session_signing_key: Vec<u8>,
    /// The frontend origin allowed by CORS.
    pub frontend_origin: String,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        let session_signing_key = hex::decode(
            env::var("SESSION_SIGNING_KEY")
                .context("SESSION_SIGNING_KEY must be set (generate with: openssl rand -hex 32)")?,
        )
        .context("SESSION_SIGNING_KEY must be valid hexadecimal")?;

        if session_signing_key.len() != 32 {
            anyhow::bail!("SESSION_SIGNING_KEY must be exactly 32 bytes (64 hex characters)");
        }

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("Invalid PORT")?,
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            session_duration_days: env::var("SESSION_DURATION_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .context("Invalid SESSION_DURATION_DAYS")?,
            session_signing_key,
            frontend_origin: env::var("FRONTEND_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        })
    }

    /// Whether the app runs in a production-like environment.
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}
