use crate::error::PressError;
use clap::Parser;
use std::fmt;

#[derive(Debug, Clone, Parser)]
pub struct StartArgs {
    #[arg(short, long, env = "HOST", default_value = "0.0.0.0")]
    pub address: String,

    #[arg(short, long, env = "PORT", default_value = "3000")]
    pub port: u16,

    #[arg(short, long, default_value = "INFO")]
    pub log_level: tracing::Level,

    /// Postgres connection string for the article store
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    #[arg(long, env = "ADMIN_USERNAME", hide_env_values = true)]
    pub admin_username: String,

    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: String,
}

impl StartArgs {
    pub fn admin(&self) -> Result<AdminConfig, PressError> {
        AdminConfig::new(&self.admin_username, &self.admin_password)
    }
}

/// The single admin credential pair.
#[derive(Clone)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

impl AdminConfig {
    pub fn new(username: &str, password: &str) -> Result<Self, PressError> {
        if username.is_empty() {
            return Err(PressError::Config("admin username is empty".to_string()));
        }
        if password.is_empty() {
            return Err(PressError::Config("admin password is empty".to_string()));
        }

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
