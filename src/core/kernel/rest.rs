use crate::core::config::{ConfigError, DEFAULT_TIMEOUT_SECONDS};
use crate::core::errors::BlueKaiError;
use crate::core::kernel::signer::Signer;
use crate::core::types::{ApiResponse, QueryArgs, RequestBody, ResponseBody};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use std::sync::Arc;
use std::time::Duration;
use tracing::{instrument, trace};

/// REST client trait for making signed HTTP requests
///
/// Every call is signed. Responses are returned with their status code
/// whether or not the status indicates success.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Make a GET request
    ///
    /// # Arguments
    /// * `path` - URI path, including any resource id
    /// * `query_args` - Query arguments, in signing order
    async fn get(&self, path: &str, query_args: &QueryArgs) -> Result<ApiResponse, BlueKaiError>;

    /// Make a POST request with `body` as the payload
    async fn post(&self, path: &str, body: &RequestBody) -> Result<ApiResponse, BlueKaiError>;

    /// Make a PUT request with `body` as the payload
    async fn put(&self, path: &str, body: &RequestBody) -> Result<ApiResponse, BlueKaiError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Scheme and host, e.g. `https://services.bluekai.com`
    pub base_url: String,
    /// Service name for logging and tracing
    pub service_name: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
    /// Headers sent with every request
    pub default_headers: Vec<(String, String)>,
}

impl RestClientConfig {
    /// Create a new configuration
    ///
    /// # Arguments
    /// * `base_url` - Scheme and host of the service
    /// * `service_name` - Name of the service
    pub fn new(base_url: String, service_name: String) -> Self {
        Self {
            base_url,
            service_name,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: concat!("bluekai-rs/", env!("CARGO_PKG_VERSION")).to_string(),
            default_headers: Vec::new(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Add a header sent with every request
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.default_headers
            .push((name.to_string(), value.to_string()));
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl RestClientBuilder {
    /// Create a new builder with the given configuration
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
        }
    }

    /// Set the signer for requests
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Build the REST client
    pub fn build(self) -> Result<ReqwestRest, BlueKaiError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.config.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ConfigError::InvalidConfiguration(format!("Invalid header name '{}': {}", name, e))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                ConfigError::InvalidConfiguration(format!("Invalid header value '{}': {}", value, e))
            })?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .default_headers(headers)
            .build()?;

        Ok(ReqwestRest {
            client,
            config: self.config,
            signer: self.signer,
        })
    }
}

/// Implementation of `RestClient` using reqwest
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    /// Create a new `ReqwestRest` instance with default settings
    pub fn new(
        base_url: String,
        service_name: String,
        signer: Arc<dyn Signer>,
    ) -> Result<Self, BlueKaiError> {
        let config = RestClientConfig::new(base_url, service_name);
        RestClientBuilder::new(config).with_signer(signer).build()
    }

    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    /// Build the full URL for a path and its signed parameters
    fn build_url(&self, path: &str, params: &[(String, String)]) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        if params.is_empty() {
            format!("{}{}", base, path)
        } else {
            format!("{}{}?{}", base, path, create_query_string(params))
        }
    }

    /// Read the status and body; the body is JSON when it parses
    #[instrument(skip(self, response), fields(service = %self.config.service_name, status = %response.status()))]
    async fn handle_response(&self, response: Response) -> Result<ApiResponse, BlueKaiError> {
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        trace!("Response body: {}", String::from_utf8_lossy(&bytes));

        Ok(ApiResponse::new(
            status,
            ResponseBody::from_bytes(bytes.to_vec()),
        ))
    }

    #[instrument(skip(self, query_args, body), fields(service = %self.config.service_name, method = %method, path = %path))]
    async fn make_request(
        &self,
        method: Method,
        path: &str,
        query_args: &QueryArgs,
        body: &[u8],
    ) -> Result<ApiResponse, BlueKaiError> {
        let signer = self.signer.as_ref().ok_or_else(|| {
            BlueKaiError::AuthError("Authentication required but no signer provided".to_string())
        })?;

        let signed_params = signer.sign_request(method.as_str(), path, query_args, body)?;
        let url = self.build_url(path, &signed_params);

        let mut request = self.client.request(method, &url);
        if !body.is_empty() {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_vec());
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }
}

/// Path of a single resource under `collection`.
///
/// The id is percent-encoded so the path that is signed is the path reqwest
/// sends. Dot segments would be collapsed by URL normalization and are
/// rejected.
pub fn resource_path(collection: &str, id: &str) -> Result<String, BlueKaiError> {
    if id.is_empty() || id == "." || id == ".." {
        return Err(BlueKaiError::InvalidParameters(format!(
            "Invalid resource id: '{}'",
            id
        )));
    }

    Ok(format!("{}/{}", collection, urlencoding::encode(id)))
}

/// Join parameters in order, percent-encoding each key and value.
///
/// Values are signed before they are encoded, so this must run on the
/// already-signed list.
pub fn create_query_string(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(skip(self, query_args), fields(service = %self.config.service_name, path = %path, param_count = query_args.len()))]
    async fn get(&self, path: &str, query_args: &QueryArgs) -> Result<ApiResponse, BlueKaiError> {
        self.make_request(Method::GET, path, query_args, &[]).await
    }

    #[instrument(skip(self, body), fields(service = %self.config.service_name, path = %path))]
    async fn post(&self, path: &str, body: &RequestBody) -> Result<ApiResponse, BlueKaiError> {
        let payload = body.to_payload()?;
        self.make_request(Method::POST, path, &QueryArgs::new(), payload.as_bytes())
            .await
    }

    #[instrument(skip(self, body), fields(service = %self.config.service_name, path = %path))]
    async fn put(&self, path: &str, body: &RequestBody) -> Result<ApiResponse, BlueKaiError> {
        let payload = body.to_payload()?;
        self.make_request(Method::PUT, path, &QueryArgs::new(), payload.as_bytes())
            .await
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kernel::signer::BlueKaiSigner;

    #[test]
    fn test_query_string_encodes_after_signing() {
        let params = vec![
            ("partner.id".to_string(), "2362".to_string()),
            ("bksig".to_string(), "ab/c+d=".to_string()),
        ];
        assert_eq!(
            create_query_string(&params),
            "partner.id=2362&bksig=ab%2Fc%2Bd%3D"
        );
    }

    #[test]
    fn test_build_url() {
        let signer = Arc::new(BlueKaiSigner::new("u".to_string(), "p"));
        let rest = ReqwestRest::new(
            "https://services.bluekai.com/".to_string(),
            "rules".to_string(),
            signer,
        )
        .unwrap();

        assert_eq!(
            rest.build_url("/Services/WS/classificationRules", &[]),
            "https://services.bluekai.com/Services/WS/classificationRules"
        );
        assert_eq!(
            rest.build_url("/x", &[("bkuid".to_string(), "u".to_string())]),
            "https://services.bluekai.com/x?bkuid=u"
        );
    }

    #[test]
    fn test_invalid_default_header_is_config_error() {
        let config = RestClientConfig::new("http://localhost".to_string(), "test".to_string())
            .with_header("bad header", "x");
        let err = RestClientBuilder::new(config).build().unwrap_err();
        assert!(matches!(err, BlueKaiError::ConfigError(_)));
    }

    #[test]
    fn test_resource_path_encodes_id() {
        assert_eq!(
            resource_path("/taxonomy/categories", "12345").unwrap(),
            "/taxonomy/categories/12345"
        );
        assert_eq!(
            resource_path("/taxonomy/categories", "../x").unwrap(),
            "/taxonomy/categories/..%2Fx"
        );
        assert_eq!(
            resource_path("/taxonomy/categories", "1?view=OWNER#top").unwrap(),
            "/taxonomy/categories/1%3Fview%3DOWNER%23top"
        );
    }

    #[test]
    fn test_resource_path_rejects_dot_segments() {
        for id in ["", ".", ".."] {
            let err = resource_path("/taxonomy/categories", id).unwrap_err();
            assert!(matches!(err, BlueKaiError::InvalidParameters(_)));
        }
    }

    #[tokio::test]
    async fn test_put_is_signed() {
        let mut server = mockito::Server::new_async().await;
        let put = server
            .mock("PUT", "/taxonomy/categories")
            .match_query(mockito::Matcher::Regex("^bkuid=u&bksig=".to_string()))
            .match_body(mockito::Matcher::Exact(r#"{"id":"1"}"#.to_string()))
            .with_status(204)
            .create_async()
            .await;

        let signer = Arc::new(BlueKaiSigner::new("u".to_string(), "p"));
        let rest = ReqwestRest::new(server.url(), "test".to_string(), signer).unwrap();

        let response = rest
            .put("/taxonomy/categories", &RequestBody::from(r#"{"id":"1"}"#))
            .await
            .unwrap();
        assert_eq!(response.status, 204);
        assert_eq!(response.body, ResponseBody::Raw(Vec::new()));

        put.assert_async().await;
    }

    #[tokio::test]
    async fn test_request_without_signer_fails() {
        let config = RestClientConfig::new("http://localhost".to_string(), "test".to_string());
        let rest = RestClientBuilder::new(config).build().unwrap();

        let err = rest.get("/x", &QueryArgs::new()).await.unwrap_err();
        assert!(matches!(err, BlueKaiError::AuthError(_)));
    }
}
