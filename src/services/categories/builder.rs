use crate::core::config::BlueKaiConfig;
use crate::core::errors::BlueKaiError;
use crate::core::kernel::{BlueKaiSigner, ReqwestRest, RestClientBuilder, RestClientConfig, Signer};
use crate::services::categories::client::CategoryClient;
use std::sync::Arc;

/// Production taxonomy host. The service is served over plain HTTP.
pub const CATEGORIES_BASE_URL: &str = "http://taxonomy.bluekai.com";

/// Builder for [`CategoryClient`]
///
/// Either credentials or an explicit signer must be supplied; every
/// taxonomy call is signed.
pub struct CategoryClientBuilder {
    config: BlueKaiConfig,
    base_url: Option<String>,
    signer: Option<Arc<dyn Signer>>,
}

impl Default for CategoryClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryClientBuilder {
    pub fn new() -> Self {
        Self {
            config: BlueKaiConfig::new(String::new(), String::new()),
            base_url: None,
            signer: None,
        }
    }

    /// Set the configuration
    pub fn with_config(mut self, config: BlueKaiConfig) -> Self {
        self.config = config;
        self
    }

    /// Set credentials, keeping the rest of the configuration
    pub fn with_credentials(mut self, user_key: String, private_key: String) -> Self {
        let mut config = BlueKaiConfig::new(user_key, private_key)
            .timeout_seconds(self.config.timeout_seconds);
        config.user_agent = self.config.user_agent.take();
        self.config = config;
        self
    }

    /// Point the client at another host (scheme included)
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.timeout_seconds = timeout_seconds;
        self
    }

    /// Use a signer shared with other clients instead of the config credentials
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn build(self) -> Result<CategoryClient<ReqwestRest>, BlueKaiError> {
        let signer = match self.signer {
            Some(signer) => signer,
            None if self.config.has_credentials() => Arc::new(BlueKaiSigner::new(
                self.config.user_key().to_string(),
                self.config.private_key().to_string(),
            )),
            None => {
                return Err(BlueKaiError::AuthError(
                    "Category client requires a user key and private key".to_string(),
                ))
            }
        };

        let base_url = self
            .base_url
            .unwrap_or_else(|| CATEGORIES_BASE_URL.to_string());

        let mut rest_config = RestClientConfig::new(base_url, "categories".to_string())
            .with_timeout(self.config.timeout_seconds);
        if let Some(user_agent) = self.config.user_agent {
            rest_config = rest_config.with_user_agent(user_agent);
        }

        let rest = RestClientBuilder::new(rest_config)
            .with_signer(signer)
            .build()?;

        Ok(CategoryClient::new(rest))
    }
}

/// Create a category client from a configuration
pub fn build_client(config: BlueKaiConfig) -> Result<CategoryClient<ReqwestRest>, BlueKaiError> {
    CategoryClientBuilder::new().with_config(config).build()
}
