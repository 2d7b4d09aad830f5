use crate::core::errors::BlueKaiError;
use crate::core::types::QueryArgs;
use base64::engine::general_purpose;
use base64::Engine;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Query parameter carrying the caller's user key
pub const USER_KEY_PARAM: &str = "bkuid";
/// Query parameter carrying the request signature
pub const SIGNATURE_PARAM: &str = "bksig";

/// Result type for signing operations: the full, ordered query parameter list
pub type SignatureResult = Result<Vec<(String, String)>, BlueKaiError>;

/// Signer trait for request authentication
///
/// Implementations turn a request description into the query parameters that
/// authenticate it. The returned list is sent in order and must not be
/// re-sorted by the transport.
pub trait Signer: Send + Sync {
    /// Sign a request and return its query parameters
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET, POST, etc.)
    /// * `path` - URI path, including any resource id
    /// * `query_args` - Caller query arguments, in wire order
    /// * `body` - Raw request body bytes
    fn sign_request(
        &self,
        method: &str,
        path: &str,
        query_args: &QueryArgs,
        body: &[u8],
    ) -> SignatureResult;
}

/// HMAC-SHA256 signer for the BlueKai web services
///
/// The signing string is `method + path + query values + body` with no
/// separators, and the signature is the base64 of the raw digest.
pub struct BlueKaiSigner {
    user_key: Secret<String>,
    private_key: Secret<Vec<u8>>,
}

impl BlueKaiSigner {
    /// Create a new signer
    ///
    /// # Arguments
    /// * `user_key` - Account identifier sent as `bkuid`
    /// * `private_key` - Key bytes for the HMAC; need not be UTF-8
    pub fn new(user_key: String, private_key: impl Into<Vec<u8>>) -> Self {
        Self {
            user_key: Secret::new(user_key),
            private_key: Secret::new(private_key.into()),
        }
    }

    pub fn user_key(&self) -> &str {
        self.user_key.expose_secret()
    }

    /// Sign `method + path + payload`
    pub fn sign(&self, method: &str, path: &str, payload: &str) -> Result<String, BlueKaiError> {
        self.sign_parts(&[method.as_bytes(), path.as_bytes(), payload.as_bytes()])
    }

    fn sign_parts(&self, parts: &[&[u8]]) -> Result<String, BlueKaiError> {
        let mut mac = HmacSha256::new_from_slice(self.private_key.expose_secret())
            .map_err(|e| BlueKaiError::AuthError(format!("Invalid private key: {}", e)))?;

        for part in parts {
            mac.update(part);
        }

        Ok(general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
    }
}

impl std::fmt::Debug for BlueKaiSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlueKaiSigner").finish_non_exhaustive()
    }
}

impl Signer for BlueKaiSigner {
    fn sign_request(
        &self,
        method: &str,
        path: &str,
        query_args: &QueryArgs,
        body: &[u8],
    ) -> SignatureResult {
        let values = query_args.concatenated_values();
        let signature =
            self.sign_parts(&[method.as_bytes(), path.as_bytes(), values.as_bytes(), body])?;

        let mut signed_params: Vec<(String, String)> = query_args
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        signed_params.push((USER_KEY_PARAM.to_string(), self.user_key().to_string()));
        signed_params.push((SIGNATURE_PARAM.to_string(), signature));

        Ok(signed_params)
    }
}
