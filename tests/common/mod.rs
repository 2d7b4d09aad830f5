#![allow(dead_code)]

use bluekai::core::kernel::BlueKaiSigner;
use bluekai::services::categories::{CategoryClient, CategoryClientBuilder};
use bluekai::services::rules::{RuleClient, RuleClientBuilder};
use bluekai::core::kernel::ReqwestRest;
use mockito::{Server, ServerGuard};
use std::sync::Arc;

pub const USER_KEY: &str = "user-key";
pub const PRIVATE_KEY: &str = "private-key";

pub async fn mock_server() -> ServerGuard {
    Server::new_async().await
}

pub fn signer() -> Arc<BlueKaiSigner> {
    Arc::new(BlueKaiSigner::new(
        USER_KEY.to_string(),
        PRIVATE_KEY.to_string(),
    ))
}

pub fn category_client(server: &ServerGuard) -> CategoryClient<ReqwestRest> {
    CategoryClientBuilder::new()
        .with_credentials(USER_KEY.to_string(), PRIVATE_KEY.to_string())
        .with_base_url(server.url())
        .with_timeout(5)
        .build()
        .expect("category client")
}

pub fn rule_client(server: &ServerGuard) -> RuleClient<ReqwestRest> {
    RuleClientBuilder::new()
        .with_signer(signer())
        .with_base_url(server.url())
        .with_timeout(5)
        .build()
        .expect("rule client")
}
