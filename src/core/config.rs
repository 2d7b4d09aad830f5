use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;

/// Default request timeout applied to every client built from a config.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone)]
pub struct BlueKaiConfig {
    pub user_key: Secret<String>,
    pub private_key: Secret<String>,
    pub timeout_seconds: u64,
    pub user_agent: Option<String>,
}

// Never expose secrets in serialization
impl Serialize for BlueKaiConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("BlueKaiConfig", 4)?;
        state.serialize_field("user_key", "[REDACTED]")?;
        state.serialize_field("private_key", "[REDACTED]")?;
        state.serialize_field("timeout_seconds", &self.timeout_seconds)?;
        state.serialize_field("user_agent", &self.user_agent)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for BlueKaiConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct BlueKaiConfigHelper {
            user_key: String,
            private_key: String,
            #[serde(default = "default_timeout")]
            timeout_seconds: u64,
            #[serde(default)]
            user_agent: Option<String>,
        }

        fn default_timeout() -> u64 {
            DEFAULT_TIMEOUT_SECONDS
        }

        let helper = BlueKaiConfigHelper::deserialize(deserializer)?;
        Ok(Self {
            user_key: Secret::new(helper.user_key),
            private_key: Secret::new(helper.private_key),
            timeout_seconds: helper.timeout_seconds,
            user_agent: helper.user_agent,
        })
    }
}

impl BlueKaiConfig {
    /// Create a new configuration with a user key and private signing key
    #[must_use]
    pub fn new(user_key: String, private_key: String) -> Self {
        Self {
            user_key: Secret::new(user_key),
            private_key: Secret::new(private_key),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: None,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `{PREFIX}_USER_KEY` (e.g., `BLUEKAI_USER_KEY`)
    /// - `{PREFIX}_PRIVATE_KEY` (e.g., `BLUEKAI_PRIVATE_KEY`)
    /// - `{PREFIX}_TIMEOUT_SECONDS` (optional, defaults to 30)
    /// - `{PREFIX}_USER_AGENT` (optional)
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let prefix = prefix.to_uppercase();
        let user_key_var = format!("{}_USER_KEY", prefix);
        let private_key_var = format!("{}_PRIVATE_KEY", prefix);
        let timeout_var = format!("{}_TIMEOUT_SECONDS", prefix);
        let user_agent_var = format!("{}_USER_AGENT", prefix);

        let user_key = env::var(&user_key_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(user_key_var))?;

        let private_key = env::var(&private_key_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(private_key_var))?;

        let timeout_seconds = match env::var(&timeout_var) {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidConfiguration(format!("{} is not a number: {}", timeout_var, e))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECONDS,
        };

        let user_agent = env::var(&user_agent_var).ok();

        Ok(Self {
            user_key: Secret::new(user_key),
            private_key: Secret::new(private_key),
            timeout_seconds,
            user_agent,
        })
    }

    /// Create configuration from a .env file and environment variables
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(prefix, ".env")
    }

    /// Create configuration from a specific .env file path
    ///
    /// A missing file is not an error; the process environment is used as-is.
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(()) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(prefix)
    }

    /// Check if this configuration can sign requests
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.user_key.expose_secret().is_empty() && !self.private_key.expose_secret().is_empty()
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Override the `User-Agent` sent by clients built from this config
    #[must_use]
    pub fn user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = Some(user_agent);
        self
    }

    /// Get user key (use carefully - exposes secret)
    pub fn user_key(&self) -> &str {
        self.user_key.expose_secret()
    }

    /// Get private key (use carefully - exposes secret)
    pub fn private_key(&self) -> &str {
        self.private_key.expose_secret()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_redacts_secrets() {
        let config = BlueKaiConfig::new("user-123".to_string(), "s3cr3t".to_string());
        let json = serde_json::to_string(&config).unwrap();

        assert!(!json.contains("user-123"));
        assert!(!json.contains("s3cr3t"));
        assert!(json.contains("[REDACTED]"));
    }

    #[test]
    fn test_deserialize_defaults_timeout() {
        let config: BlueKaiConfig =
            serde_json::from_str(r#"{"user_key":"u","private_key":"p"}"#).unwrap();

        assert_eq!(config.user_key(), "u");
        assert_eq!(config.private_key(), "p");
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn test_has_credentials() {
        assert!(BlueKaiConfig::new("u".to_string(), "p".to_string()).has_credentials());
        assert!(!BlueKaiConfig::new(String::new(), "p".to_string()).has_credentials());
        assert!(!BlueKaiConfig::new("u".to_string(), String::new()).has_credentials());
    }

    #[test]
    fn test_from_env() {
        env::set_var("BKTEST_ENV_USER_KEY", "env-user");
        env::set_var("BKTEST_ENV_PRIVATE_KEY", "env-private");
        env::set_var("BKTEST_ENV_TIMEOUT_SECONDS", "5");

        let config = BlueKaiConfig::from_env("bktest_env").unwrap();
        assert_eq!(config.user_key(), "env-user");
        assert_eq!(config.private_key(), "env-private");
        assert_eq!(config.timeout_seconds, 5);
    }

    #[test]
    fn test_from_env_missing_key() {
        let err = BlueKaiConfig::from_env("bktest_missing").unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvironmentVariable(ref v) if v == "BKTEST_MISSING_USER_KEY"));
    }

    #[test]
    fn test_from_env_bad_timeout() {
        env::set_var("BKTEST_BAD_USER_KEY", "u");
        env::set_var("BKTEST_BAD_PRIVATE_KEY", "p");
        env::set_var("BKTEST_BAD_TIMEOUT_SECONDS", "soon");

        let err = BlueKaiConfig::from_env("bktest_bad").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfiguration(_)));
    }
}
