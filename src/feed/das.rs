//! JSON-RPC 2.0 wire types for the DAS `getAssetsByAuthority` method.
//!
//! Response types are deliberately lenient: every field the proxy does not strictly need is
//! optional, so partially populated assets still map to display tokens.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Serialize)]
pub struct RpcRequest<'a, P> {
    pub jsonrpc: &'static str,
    pub id: &'a str,
    pub method: &'a str,
    pub params: P,
}

impl<'a, P> RpcRequest<'a, P> {
    pub fn new(id: &'a str, method: &'a str, params: P) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetsByAuthorityParams<'a> {
    pub authority_address: &'a str,
    pub page: u32,
    pub limit: u32,
    pub sort_by: SortBy,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortBy {
    pub sort_by: SortField,
    pub sort_direction: SortDirection,
}

impl SortBy {
    pub fn newest_first() -> Self {
        Self {
            sort_by: SortField::Created,
            sort_direction: SortDirection::Desc,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Created,
    Updated,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RpcResponse<T> {
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AssetPage {
    #[serde(default)]
    pub items: Option<Vec<DasAsset>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DasAsset {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub content: Option<AssetContent>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AssetContent {
    #[serde(default)]
    pub metadata: Option<AssetMetadata>,
    #[serde(default)]
    pub links: Option<Map<String, Value>>,
    #[serde(default)]
    pub files: Option<Vec<AssetFile>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AssetMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AssetFile {
    #[serde(default)]
    pub uri: Option<String>,
}
