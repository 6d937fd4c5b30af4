use super::{
    das::{AssetPage, AssetsByAuthorityParams, DasAsset, RpcRequest, RpcResponse, SortBy},
    error::FeedError,
    tokens::{FeedToken, tokens_from_assets},
};

/// Authority whose launches the landing page lists.
pub const BAGS_AUTHORITY: &str = "BAGSB9TpGrZxQbEsrEznv5jXXdwyP6AXerN8aVRiAmcv";

pub const DEFAULT_DAS_URL: &str = "https://mainnet.helius-rpc.com/";

pub const PAGE_LIMIT: u32 = 12;

const REQUEST_ID: &str = "bags-assets";
const METHOD: &str = "getAssetsByAuthority";

/// Client for a DAS JSON-RPC endpoint. No timeout, retry or caching is layered on top.
#[derive(Clone, Debug)]
pub struct DasClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl DasClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self::with_http(reqwest::Client::new(), endpoint, api_key)
    }

    pub fn with_http(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_key,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// One page of assets created by `authority`, newest first.
    #[tracing::instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn assets_by_authority(
        &self,
        authority: &str,
        page: u32,
        limit: u32,
    ) -> Result<Vec<DasAsset>, FeedError> {
        let Some(api_key) = self.api_key.as_deref().filter(|k| !k.is_empty()) else {
            return Err(FeedError::MissingApiKey);
        };

        let request = RpcRequest::new(
            REQUEST_ID,
            METHOD,
            AssetsByAuthorityParams {
                authority_address: authority,
                page,
                limit,
                sort_by: SortBy::newest_first(),
            },
        );

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("api-key", api_key)])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(FeedError::UpstreamHttp {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: RpcResponse<AssetPage> = response.json().await?;
        if let Some(error) = envelope.error.filter(|e| !e.is_null()) {
            return Err(FeedError::UpstreamRpc(error));
        }

        let items = envelope
            .result
            .and_then(|page| page.items)
            .unwrap_or_default();
        tracing::debug!(items = items.len(), "DAS page fetched");
        Ok(items)
    }

    /// The most recent launches of [`BAGS_AUTHORITY`], de-duplicated by mint.
    pub async fn new_tokens(&self) -> Result<Vec<FeedToken>, FeedError> {
        let assets = self
            .assets_by_authority(BAGS_AUTHORITY, 1, PAGE_LIMIT)
            .await?;
        Ok(tokens_from_assets(&assets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_or_empty_key_fails_before_any_call() {
        // Nothing listens on this port; reaching the network would surface as Unexpected.
        let client = DasClient::new("http://127.0.0.1:9/", None);
        assert!(!client.has_api_key());
        assert!(matches!(
            client.new_tokens().await,
            Err(FeedError::MissingApiKey)
        ));

        let client = DasClient::new("http://127.0.0.1:9/", Some(String::new()));
        assert!(matches!(
            client.new_tokens().await,
            Err(FeedError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn transport_failure_is_unexpected() {
        let client = DasClient::new("http://127.0.0.1:9/", Some("key".to_owned()));
        assert!(client.has_api_key());
        assert!(matches!(
            client.new_tokens().await,
            Err(FeedError::Unexpected(_))
        ));
    }
}
