use crate::core::config::BlueKaiConfig;
use crate::core::errors::BlueKaiError;
use crate::core::kernel::{BlueKaiSigner, ReqwestRest, RestClientBuilder, RestClientConfig, Signer};
use crate::services::rules::client::RuleClient;
use std::sync::Arc;

pub const RULES_BASE_URL: &str = "https://services.bluekai.com";

/// User agent the rule service has historically been called with
pub const LEGACY_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; U; Intel Mac OS X 10.6; en-US; rv:1.9.1) Gecko/20090624 Firefox/3.5";

/// Builder for [`RuleClient`]
pub struct RuleClientBuilder {
    config: BlueKaiConfig,
    base_url: Option<String>,
    signer: Option<Arc<dyn Signer>>,
}

impl Default for RuleClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleClientBuilder {
    pub fn new() -> Self {
        Self {
            config: BlueKaiConfig::new(String::new(), String::new()),
            base_url: None,
            signer: None,
        }
    }

    pub fn with_config(mut self, config: BlueKaiConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_credentials(mut self, user_key: String, private_key: String) -> Self {
        let mut config = BlueKaiConfig::new(user_key, private_key)
            .timeout_seconds(self.config.timeout_seconds);
        config.user_agent = self.config.user_agent.take();
        self.config = config;
        self
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.timeout_seconds = timeout_seconds;
        self
    }

    /// Replace the legacy browser user agent
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.config.user_agent = Some(user_agent);
        self
    }

    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn build(self) -> Result<RuleClient<ReqwestRest>, BlueKaiError> {
        let signer = match self.signer {
            Some(signer) => signer,
            None if self.config.has_credentials() => Arc::new(BlueKaiSigner::new(
                self.config.user_key().to_string(),
                self.config.private_key().to_string(),
            )),
            None => {
                return Err(BlueKaiError::AuthError(
                    "Rule client requires a user key and private key".to_string(),
                ))
            }
        };

        let base_url = self.base_url.unwrap_or_else(|| RULES_BASE_URL.to_string());
        let user_agent = self
            .config
            .user_agent
            .unwrap_or_else(|| LEGACY_USER_AGENT.to_string());

        let rest_config = RestClientConfig::new(base_url, "rules".to_string())
            .with_timeout(self.config.timeout_seconds)
            .with_user_agent(user_agent)
            .with_header("Accept", "application/json")
            .with_header("Content-Type", "application/json");

        let rest = RestClientBuilder::new(rest_config)
            .with_signer(signer)
            .build()?;

        Ok(RuleClient::new(rest))
    }
}

/// Create a rule client from a configuration
pub fn build_client(config: BlueKaiConfig) -> Result<RuleClient<ReqwestRest>, BlueKaiError> {
    RuleClientBuilder::new().with_config(config).build()
}
