//! Static visual card for one token in the marquee.
//!
//! [`CardView`] holds the display-ready strings (truncated handle, whole-number figures) and
//! emits an SVG fragment in card-local coordinates, `CARD_WIDTH × CARD_HEIGHT`.

use std::fmt::Write as _;

use crate::{
    feed::FeedToken,
    foundation::error::{TokenArcError, TokenArcResult},
    svg::escape,
};

pub const CARD_WIDTH: f64 = 200.0;
pub const CARD_HEIGHT: f64 = 160.0;

/// Handles longer than this are shown shortened (the link keeps the full handle).
pub const MAX_HANDLE_CHARS: usize = 8;

const ELLIPSIS: char = '…';

/// A token as shown on a marquee card.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarqueeToken {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub token_image: String,
    /// `user` or `@user`.
    pub fee_earner_username: String,
    pub fee_earner_avatar: String,
    /// Preformatted, e.g. `$27,472.36`.
    pub earnings_display: String,
    /// Preformatted, e.g. `1,204.5`.
    pub holders_display: String,
}

fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Str(String),
        Int(u64),
    }

    match <Repr as serde::Deserialize>::deserialize(deserializer)? {
        Repr::Str(s) => Ok(s),
        Repr::Int(n) => Ok(n.to_string()),
    }
}

impl From<&FeedToken> for MarqueeToken {
    fn from(t: &FeedToken) -> Self {
        let image = t.image.clone().unwrap_or_default();
        let handle = t
            .links
            .get("twitter")
            .and_then(serde_json::Value::as_str)
            .and_then(handle_from_profile_link)
            .unwrap_or_else(|| t.symbol.clone());

        Self {
            id: t.mint.clone(),
            name: t.name.clone(),
            symbol: t.symbol.clone(),
            token_image: image.clone(),
            fee_earner_username: handle,
            fee_earner_avatar: image,
            earnings_display: "$0".to_owned(),
            holders_display: "0".to_owned(),
        }
    }
}

/// `https://x.com/someone?s=20` → `someone`.
fn handle_from_profile_link(link: &str) -> Option<String> {
    let rest = link.split_once("://").map_or(link, |(_, rest)| rest);
    let path = rest.split(['?', '#']).next()?;
    let (_host, path) = path.split_once('/')?;
    let last = path.trim_end_matches('/').rsplit('/').next()?;
    let last = last.trim_start_matches('@');
    (!last.is_empty()).then(|| last.to_owned())
}

/// Parse a token list file: either a bare array of cards or a feed response
/// (`{"tokens": [...]}`) from the new-tokens route.
pub fn parse_token_list(json: &str) -> TokenArcResult<Vec<MarqueeToken>> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Cards(Vec<MarqueeToken>),
        Feed { tokens: Vec<FeedToken> },
    }

    match serde_json::from_str::<Repr>(json) {
        Ok(Repr::Cards(cards)) => Ok(cards),
        Ok(Repr::Feed { tokens }) => Ok(tokens.iter().map(MarqueeToken::from).collect()),
        Err(e) => Err(TokenArcError::serde(format!(
            "token list must be an array of cards or a {{\"tokens\": [...]}} feed: {e}"
        ))),
    }
}

/// Shorten `handle` to [`MAX_HANDLE_CHARS`] characters, the last being `…`.
pub fn display_handle(handle: &str) -> String {
    if handle.chars().count() <= MAX_HANDLE_CHARS {
        return handle.to_owned();
    }
    let mut out: String = handle.chars().take(MAX_HANDLE_CHARS - 1).collect();
    out.push(ELLIPSIS);
    out
}

pub fn profile_url(handle: &str) -> String {
    let handle = handle.strip_prefix('@').unwrap_or(handle);
    format!("https://x.com/{handle}")
}

/// Everything before the first `.`; no numeric rounding.
pub fn whole_part(display: &str) -> &str {
    display.split('.').next().unwrap_or(display)
}

#[derive(Clone, Debug, PartialEq)]
pub struct CardView {
    pub name: String,
    pub symbol: String,
    pub token_image: String,
    pub avatar: String,
    pub handle: String,
    pub profile_url: String,
    pub earnings: String,
    pub holders: String,
}

impl CardView {
    pub fn from_token(token: &MarqueeToken) -> Self {
        Self {
            name: token.name.clone(),
            symbol: token.symbol.clone(),
            token_image: token.token_image.clone(),
            avatar: token.fee_earner_avatar.clone(),
            handle: display_handle(&token.fee_earner_username),
            profile_url: profile_url(&token.fee_earner_username),
            earnings: whole_part(&token.earnings_display).to_owned(),
            holders: whole_part(&token.holders_display).to_owned(),
        }
    }

    /// SVG fragment in card-local coordinates. `id` must be unique within the document; it
    /// namespaces the clip paths and gradients.
    pub fn svg_fragment(&self, id: &str) -> String {
        let mut s = String::with_capacity(2048);
        let w = CARD_WIDTH;
        let h = CARD_HEIGHT;

        let _ = write!(
            s,
            r##"<defs><radialGradient id="{id}-vig" cx="0.15" cy="0" r="0.55"><stop offset="0" stop-color="#ffffff" stop-opacity="0.14"/><stop offset="1" stop-color="#ffffff" stop-opacity="0"/></radialGradient><clipPath id="{id}-img"><rect x="20" y="16" width="48" height="48" rx="12"/></clipPath><clipPath id="{id}-ava"><circle cx="32" cy="127" r="14"/></clipPath></defs>"##
        );

        // Panel.
        let _ = write!(
            s,
            r##"<rect x="0.5" y="0.5" width="{}" height="{}" rx="16" fill="#050506" stroke="#ffffff" stroke-opacity="0.1"/><rect width="{w}" height="{h}" rx="16" fill="url(#{id}-vig)" opacity="0.6"/>"##,
            w - 1.0,
            h - 1.0
        );

        // Token image tile.
        s.push_str(r##"<rect x="20" y="16" width="48" height="48" rx="12" fill="#151515" stroke="#ffffff" stroke-opacity="0.1"/>"##);
        if !self.token_image.is_empty() {
            let _ = write!(
                s,
                r#"<image x="20" y="16" width="48" height="48" preserveAspectRatio="xMidYMid slice" clip-path="url(#{id}-img)" xlink:href="{}"/>"#,
                escape(&self.token_image)
            );
        }

        // Symbol and name.
        let _ = write!(
            s,
            r##"<text x="78" y="28" font-family="sans-serif" font-size="11" font-weight="600" letter-spacing="1.3" fill="#d4d4d4">{}</text>"##,
            escape(&self.symbol.to_uppercase())
        );
        let _ = write!(
            s,
            r##"<text x="78" y="47" font-family="sans-serif" font-size="14" font-weight="600" fill="#ffffff">{}</text>"##,
            escape(&clip_chars(&self.name, 10))
        );

        // Holders pill, top right.
        let pill_w = 30.0 + 6.5 * self.holders.chars().count() as f64;
        let pill_x = w - 12.0 - pill_w;
        let _ = write!(
            s,
            r##"<rect x="{pill_x}" y="74" width="{pill_w}" height="20" rx="10" fill="#000000" fill-opacity="0.7" stroke="#ffffff" stroke-opacity="0.12"/><circle cx="{}" cy="84" r="4" fill="#e5e5e5"/><text x="{}" y="88" font-family="sans-serif" font-size="11" fill="#e5e5e5">{}</text>"##,
            pill_x + 12.0,
            pill_x + 21.0,
            escape(&self.holders)
        );

        // Earner pill, bottom left.
        s.push_str(r##"<text x="20" y="106" font-family="sans-serif" font-size="9" letter-spacing="1.8" fill="#737373">EARNER</text>"##);
        let handle_w = 7.0 * self.handle.chars().count() as f64;
        let _ = write!(
            s,
            r##"<rect x="14" y="111" width="{}" height="32" rx="16" fill="#000000" fill-opacity="0.75" stroke="#ffffff" stroke-opacity="0.12"/><circle cx="32" cy="127" r="14" fill="#111111" stroke="#ffffff" stroke-opacity="0.15"/>"##,
            handle_w + 62.0
        );
        if !self.avatar.is_empty() {
            let _ = write!(
                s,
                r#"<image x="18" y="113" width="28" height="28" preserveAspectRatio="xMidYMid slice" clip-path="url(#{id}-ava)" xlink:href="{}"/>"#,
                escape(&self.avatar)
            );
        }
        let _ = write!(
            s,
            r##"<text x="52" y="131" font-family="sans-serif" font-size="12" fill="#e5e5e5">{}</text><text x="{}" y="132" font-family="sans-serif" font-size="14" fill="#ffffff">𝕏</text>"##,
            escape(&self.handle),
            56.0 + handle_w
        );

        // Earnings, bottom right.
        let _ = write!(
            s,
            r##"<text x="{}" y="106" text-anchor="end" font-family="sans-serif" font-size="9" letter-spacing="1.8" fill="#737373">EARNED</text><text x="{}" y="136" text-anchor="end" font-family="sans-serif" font-size="18" font-weight="600" fill="#ffffff">{}</text>"##,
            w - 20.0,
            w - 20.0,
            escape(&self.earnings)
        );

        s
    }
}

fn clip_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_owned();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> MarqueeToken {
        MarqueeToken {
            id: "1".to_owned(),
            name: "Bag Token".to_owned(),
            symbol: "bag".to_owned(),
            token_image: "/t1.webp".to_owned(),
            fee_earner_username: "@someone_long".to_owned(),
            fee_earner_avatar: "/c1.webp".to_owned(),
            earnings_display: "$27,472.36".to_owned(),
            holders_display: "1,204.5".to_owned(),
        }
    }

    #[test]
    fn handle_truncation_boundaries() {
        assert_eq!(display_handle("abcdefgh"), "abcdefgh");
        assert_eq!(display_handle("abcdefghi"), "abcdefg…");
        assert_eq!(display_handle("abcdefghi").chars().count(), 8);
        // Counted in characters, not bytes.
        assert_eq!(display_handle("ééééééééé"), "ééééééé…");
    }

    #[test]
    fn truncation_does_not_touch_link() {
        let view = CardView::from_token(&token());
        assert_eq!(view.handle, "@someon…");
        assert_eq!(view.profile_url, "https://x.com/someone_long");
    }

    #[test]
    fn figures_keep_integer_portion_only() {
        assert_eq!(whole_part("$27,472.36"), "$27,472");
        assert_eq!(whole_part("1,204.9"), "1,204");
        assert_eq!(whole_part("42"), "42");
        assert_eq!(whole_part(".5"), "");
    }

    #[test]
    fn fragment_escapes_markup() {
        let mut t = token();
        t.name = "<b>&".to_owned();
        let svg = CardView::from_token(&t).svg_fragment("c0");
        assert!(svg.contains("&lt;b&gt;&amp;"));
        assert!(!svg.contains("<b>"));
        assert!(svg.contains("c0-img"));
        assert!(svg.contains("$27,472<"));
    }

    #[test]
    fn parses_numeric_ids_and_feed_payloads() {
        let cards = parse_token_list(
            r#"[{"id": 7, "name": "A", "symbol": "A", "tokenImage": "/a.webp",
                 "feeEarnerUsername": "a", "feeEarnerAvatar": "/a.webp",
                 "earningsDisplay": "$1.00", "holdersDisplay": "3"}]"#,
        )
        .unwrap();
        assert_eq!(cards[0].id, "7");

        let cards = parse_token_list(
            r#"{"tokens": [{"mint": "Mint111", "name": "Bag", "symbol": "BAG",
                            "image": null, "links": {"twitter": "https://x.com/bagsapp/"}}]}"#,
        )
        .unwrap();
        assert_eq!(cards[0].id, "Mint111");
        assert_eq!(cards[0].fee_earner_username, "bagsapp");
        assert_eq!(cards[0].token_image, "");

        assert!(parse_token_list(r#"{"nope": 1}"#).is_err());
    }

    #[test]
    fn profile_links_reduce_to_handles() {
        assert_eq!(
            handle_from_profile_link("https://twitter.com/@abc?s=20").as_deref(),
            Some("abc")
        );
        assert_eq!(handle_from_profile_link("https://x.com/"), None);
    }
}
