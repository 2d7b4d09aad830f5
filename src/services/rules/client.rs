use crate::core::errors::BlueKaiError;
use crate::core::kernel::{resource_path, RestClient};
use crate::core::types::{ApiResponse, QueryArgs, RequestBody};
use crate::services::rules::types::RuleFilters;
use std::fmt::Display;
use tracing::instrument;

/// Collection path of the classification-rule service
pub const RULES_PATH: &str = "/Services/WS/classificationRules";

/// Client for BlueKai self-classification rules
#[derive(Debug, Clone)]
pub struct RuleClient<R: RestClient> {
    rest: R,
}

impl<R: RestClient> RuleClient<R> {
    pub fn new(rest: R) -> Self {
        Self { rest }
    }

    /// List rules, optionally narrowed by `filters`
    ///
    /// With no filters every rule of the account is returned.
    #[instrument(skip_all, fields(filter_count = filters.as_query_args().len()))]
    pub async fn list_rules(&self, filters: RuleFilters) -> Result<ApiResponse, BlueKaiError> {
        let args: QueryArgs = filters.into();
        self.rest.get(RULES_PATH, &args).await
    }

    /// Read the rule with `rule_id`
    #[instrument(skip_all, fields(rule_id = %rule_id))]
    pub async fn read_rule(&self, rule_id: impl Display + Send) -> Result<ApiResponse, BlueKaiError> {
        let path = resource_path(RULES_PATH, &rule_id.to_string())?;
        self.rest.get(&path, &QueryArgs::new()).await
    }

    /// Create a phint or URL rule
    #[instrument(skip_all)]
    pub async fn create_rule(
        &self,
        body: impl Into<RequestBody> + Send,
    ) -> Result<ApiResponse, BlueKaiError> {
        self.rest.post(RULES_PATH, &body.into()).await
    }

    /// Updating rules is not available through this client
    pub async fn update_rule(
        &self,
        rule_id: impl Display + Send,
        _body: impl Into<RequestBody> + Send,
    ) -> Result<ApiResponse, BlueKaiError> {
        Err(BlueKaiError::Unsupported(format!(
            "update_rule is not implemented (rule {})",
            rule_id
        )))
    }
}
