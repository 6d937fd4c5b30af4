use std::collections::HashSet;

use serde_json::{Map, Value};

use super::das::DasAsset;

const SHORT_MINT_CHARS: usize = 6;

/// A newly created token as served by the new-tokens route.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FeedToken {
    pub mint: String,
    pub name: String,
    pub symbol: String,
    pub image: Option<String>,
    /// `content.links` of the asset, passed through untouched.
    #[serde(default)]
    pub links: Map<String, Value>,
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

impl FeedToken {
    pub fn from_asset(asset: &DasAsset) -> Self {
        let mint = asset.id.clone();
        let content = asset.content.as_ref();
        let metadata = content.and_then(|c| c.metadata.as_ref());
        let meta_name = non_empty(metadata.and_then(|m| m.name.as_deref()));
        let meta_symbol = non_empty(metadata.and_then(|m| m.symbol.as_deref()));

        let name = match (meta_name, meta_symbol) {
            (Some(name), _) => name.to_owned(),
            (None, Some(symbol)) => symbol.to_owned(),
            (None, None) if !mint.is_empty() => {
                let short: String = mint.chars().take(SHORT_MINT_CHARS).collect();
                format!("{short}…")
            }
            (None, None) => "Unknown".to_owned(),
        };

        let links = content
            .and_then(|c| c.links.clone())
            .unwrap_or_default();

        let image = non_empty(links.get("image").and_then(Value::as_str))
            .or_else(|| {
                let files = content.and_then(|c| c.files.as_ref())?;
                non_empty(files.first()?.uri.as_deref())
            })
            .map(str::to_owned);

        Self {
            name,
            symbol: meta_symbol.unwrap_or_default().to_owned(),
            image,
            links,
            mint,
        }
    }
}

/// Keep the first token seen for each mint, preserving order.
pub fn dedupe_by_mint(tokens: Vec<FeedToken>) -> Vec<FeedToken> {
    let mut seen = HashSet::with_capacity(tokens.len());
    tokens
        .into_iter()
        .filter(|t| seen.insert(t.mint.clone()))
        .collect()
}

pub fn tokens_from_assets(assets: &[DasAsset]) -> Vec<FeedToken> {
    dedupe_by_mint(assets.iter().map(FeedToken::from_asset).collect())
}
