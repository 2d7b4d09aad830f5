pub mod builder;
pub mod client;
pub mod types;

pub use builder::{build_client, RuleClientBuilder, LEGACY_USER_AGENT, RULES_BASE_URL};
pub use client::{RuleClient, RULES_PATH};
pub use types::{ClassificationRule, Phint, RuleFilters, RuleKind};
