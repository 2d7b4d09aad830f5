//! Signed client for the BlueKai taxonomy and classification-rule web services.
//!
//! Every request carries `bkuid` (the user key) and `bksig`, the base64
//! HMAC-SHA256 of `method + path + query values + body` under the private key.
//!
//! ```rust,no_run
//! use bluekai::{BlueKai, BlueKaiConfig, CategoryView};
//!
//! # async fn example() -> Result<(), bluekai::BlueKaiError> {
//! let client = BlueKai::from_config(BlueKaiConfig::new(
//!     "user_key".to_string(),
//!     "private_key".to_string(),
//! ))?;
//!
//! let (status, body) = client
//!     .categories
//!     .list_categories(2362, CategoryView::Owner)
//!     .await?
//!     .into_parts();
//! println!("{} {:?}", status, body);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod services;

pub use crate::core::{
    config::BlueKaiConfig,
    errors::BlueKaiError,
    types::{ApiResponse, QueryArgs, RequestBody, ResponseBody},
};
pub use crate::services::categories::{Category, CategoryClient, CategoryView};
pub use crate::services::rules::{ClassificationRule, Phint, RuleClient, RuleFilters};
pub use crate::services::BlueKai;
