use std::env;
use std::time::Duration;

use bearer_auth::revocation::DEFAULT_SWEEP_INTERVAL;
use bearer_auth::token::service::DEFAULT_ISSUER;
use bearer_auth::TokenSettings;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

const DEFAULT_TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub users: Vec<SeedUserConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default = "default_token_ttl")]
    pub access_token_ttl_seconds: i64,
    #[serde(default = "default_token_ttl")]
    pub refresh_token_ttl_seconds: i64,
    #[serde(default = "default_sweep_interval")]
    pub revocation_sweep_interval_seconds: u64,
}

/// Account loaded into the in-memory user store at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct SeedUserConfig {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

fn default_issuer() -> String {
    DEFAULT_ISSUER.to_string()
}

fn default_token_ttl() -> i64 {
    DEFAULT_TOKEN_TTL_SECONDS
}

fn default_sweep_interval() -> u64 {
    DEFAULT_SWEEP_INTERVAL.as_secs()
}

impl JwtConfig {
    pub fn token_settings(&self) -> TokenSettings {
        TokenSettings {
            issuer: self.issuer.clone(),
            access_token_ttl: chrono::Duration::seconds(self.access_token_ttl_seconds),
            refresh_token_ttl: chrono::Duration::seconds(self.refresh_token_ttl_seconds),
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.revocation_sweep_interval_seconds)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that deserialize but cannot run.
    ///
    /// # Errors
    /// * `Message` - A token lifetime is not positive, or the sweep interval is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lifetimes = [
            ("jwt.access_token_ttl_seconds", self.jwt.access_token_ttl_seconds),
            ("jwt.refresh_token_ttl_seconds", self.jwt.refresh_token_ttl_seconds),
        ];
        for (key, seconds) in lifetimes {
            if seconds <= 0 {
                return Err(ConfigError::Message(format!(
                    "{} must be positive, got {}",
                    key, seconds
                )));
            }
        }

        if self.jwt.revocation_sweep_interval_seconds == 0 {
            return Err(ConfigError::Message(
                "jwt.revocation_sweep_interval_seconds must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
