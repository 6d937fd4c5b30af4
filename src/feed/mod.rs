//! Proxy for the digital-asset-search (DAS) index: one `getAssetsByAuthority` call per request,
//! reshaped into display tokens.

pub mod client;
pub mod das;
pub mod error;
pub mod tokens;

pub use client::{BAGS_AUTHORITY, DEFAULT_DAS_URL, DasClient, PAGE_LIMIT};
pub use error::FeedError;
pub use tokens::{FeedToken, dedupe_by_mint, tokens_from_assets};
