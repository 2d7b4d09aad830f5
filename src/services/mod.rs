use crate::core::config::BlueKaiConfig;
use crate::core::errors::BlueKaiError;
use crate::core::kernel::{BlueKaiSigner, ReqwestRest, Signer};
use std::sync::Arc;

pub mod categories;
pub mod rules;

pub use categories::{CategoryClient, CategoryClientBuilder};
pub use rules::{RuleClient, RuleClientBuilder};

/// Both service clients, sharing one signer
pub struct BlueKai<R: crate::core::kernel::RestClient = ReqwestRest> {
    pub categories: CategoryClient<R>,
    pub rules: RuleClient<R>,
}

impl BlueKai<ReqwestRest> {
    /// Build both clients against the production hosts
    pub fn from_config(config: BlueKaiConfig) -> Result<Self, BlueKaiError> {
        if !config.has_credentials() {
            return Err(BlueKaiError::AuthError(
                "BlueKai clients require a user key and private key".to_string(),
            ));
        }

        let signer: Arc<dyn Signer> = Arc::new(BlueKaiSigner::new(
            config.user_key().to_string(),
            config.private_key().to_string(),
        ));

        Ok(Self {
            categories: CategoryClientBuilder::new()
                .with_config(config.clone())
                .with_signer(signer.clone())
                .build()?,
            rules: RuleClientBuilder::new()
                .with_config(config)
                .with_signer(signer)
                .build()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_requires_credentials() {
        let result = BlueKai::from_config(BlueKaiConfig::new(String::new(), String::new()));
        assert!(matches!(result, Err(BlueKaiError::AuthError(_))));
    }

    #[test]
    fn test_from_config() {
        let config = BlueKaiConfig::new("user".to_string(), "secret".to_string());
        assert!(BlueKai::from_config(config).is_ok());
    }
}
