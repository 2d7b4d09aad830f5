//! Transport layer shared by every BlueKai service client
//!
//! The kernel knows how to sign a request and how to move it over HTTP. It
//! knows nothing about categories or rules.
//!
//! ## Authentication
//! - `Signer`: pluggable authentication interface
//! - `BlueKaiSigner`: HMAC-SHA256 over `method + path + values + body`
//!
//! ## Transport
//! - `RestClient`: signed HTTP interface
//! - `ReqwestRest`: reqwest implementation, built with `RestClientBuilder`
//!
//! # Example
//! ```rust,no_run
//! use bluekai::core::kernel::*;
//! use bluekai::core::types::QueryArgs;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let signer = Arc::new(BlueKaiSigner::new("user_key".to_string(), "private_key".to_string()));
//! let rest_config = RestClientConfig::new(
//!     "http://taxonomy.bluekai.com".to_string(),
//!     "categories".to_string(),
//! );
//! let rest = RestClientBuilder::new(rest_config)
//!     .with_signer(signer)
//!     .build()?;
//!
//! let response = rest.get("/taxonomy/categories/12345", &QueryArgs::new()).await?;
//! println!("{}", response.status);
//! # Ok(())
//! # }
//! ```

pub mod rest;
pub mod signer;

pub use rest::{create_query_string, resource_path, ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{BlueKaiSigner, SignatureResult, Signer, SIGNATURE_PARAM, USER_KEY_PARAM};
