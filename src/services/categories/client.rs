use crate::core::errors::BlueKaiError;
use crate::core::kernel::{resource_path, RestClient};
use crate::core::types::{ApiResponse, QueryArgs, RequestBody};
use std::fmt::Display;
use tracing::instrument;

/// Collection path of the taxonomy service
pub const CATEGORIES_PATH: &str = "/taxonomy/categories";

/// Client for the BlueKai taxonomy category service
#[derive(Debug, Clone)]
pub struct CategoryClient<R: RestClient> {
    rest: R,
}

impl<R: RestClient> CategoryClient<R> {
    pub fn new(rest: R) -> Self {
        Self { rest }
    }

    /// List categories visible to `partner_id` under `view`
    ///
    /// `view` is usually a [`CategoryView`](super::CategoryView).
    #[instrument(skip_all, fields(partner_id = %partner_id, view = %view))]
    pub async fn list_categories(
        &self,
        partner_id: impl Display + Send,
        view: impl Display + Send,
    ) -> Result<ApiResponse, BlueKaiError> {
        let args = QueryArgs::new()
            .with("partner.id", &partner_id)
            .with("view", &view);

        self.rest.get(CATEGORIES_PATH, &args).await
    }

    /// Read a single category, including reach and price
    #[instrument(skip_all, fields(id = %id))]
    pub async fn read_category(&self, id: impl Display + Send) -> Result<ApiResponse, BlueKaiError> {
        let path = resource_path(CATEGORIES_PATH, &id.to_string())?;
        self.rest.get(&path, &QueryArgs::new()).await
    }

    /// Create a category from a JSON value, a model, or a pre-serialized string
    #[instrument(skip_all)]
    pub async fn create_category(
        &self,
        body: impl Into<RequestBody> + Send,
    ) -> Result<ApiResponse, BlueKaiError> {
        self.rest.post(CATEGORIES_PATH, &body.into()).await
    }

    /// Updating categories is not available through this client
    pub async fn update_category(
        &self,
        _body: impl Into<RequestBody> + Send,
    ) -> Result<ApiResponse, BlueKaiError> {
        Err(BlueKaiError::Unsupported(
            "update_category is not implemented".to_string(),
        ))
    }
}
