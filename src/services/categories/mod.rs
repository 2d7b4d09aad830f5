pub mod builder;
pub mod client;
pub mod types;

pub use builder::{build_client, CategoryClientBuilder, CATEGORIES_BASE_URL};
pub use client::{CategoryClient, CATEGORIES_PATH};
pub use types::{Category, CategoryId, CategoryView, EntityRef};
