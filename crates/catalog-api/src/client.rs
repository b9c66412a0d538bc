//! HTTP client for the upstream catalog API.

use async_trait::async_trait;
use chrono::Utc;
use log::warn;
use md5::{Digest, Md5};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use gibi_core::catalog::{CatalogProvider, Category, RawCatalogItem};
use gibi_core::errors::UpstreamFetchError;

pub const DEFAULT_BASE_URL: &str = "https://gateway.marvel.com/v1/public";

/// Upstream page size. 100 is the API's maximum.
pub const PAGE_LIMIT: u32 = 100;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One page of the upstream listing envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListingPage {
    offset: u32,
    #[allow(dead_code)]
    limit: u32,
    total: u32,
    count: u32,
    results: Vec<WireItem>,
}

/// Top-level listing response.
#[derive(Debug, Deserialize)]
struct ListingEnvelope {
    data: ListingPage,
}

/// A single upstream item. Characters carry `name`, the other
/// categories carry `title`.
#[derive(Debug, Deserialize)]
struct WireItem {
    id: i64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    thumbnail: Option<WireThumbnail>,
}

#[derive(Debug, Deserialize)]
struct WireThumbnail {
    #[serde(default)]
    path: Option<String>,
}

/// Catalog client holding the upstream credential pair.
pub struct MarvelCatalogClient {
    client: Client,
    base_url: String,
    public_key: String,
    private_key: String,
}

impl MarvelCatalogClient {
    pub fn new(
        base_url: impl Into<String>,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    /// Request hash per the upstream auth scheme:
    /// `md5(ts + private_key + public_key)`.
    fn request_hash(&self, ts: &str) -> String {
        let input = format!("{}{}{}", ts, self.private_key, self.public_key);
        format!("{:x}", Md5::digest(input.as_bytes()))
    }

    async fn fetch_page(
        &self,
        category: Category,
        offset: u32,
    ) -> Result<ListingPage, UpstreamFetchError> {
        let ts = Utc::now().timestamp().to_string();
        let hash = self.request_hash(&ts);
        let url = format!(
            "{}/{}?ts={}&apikey={}&hash={}&limit={}&offset={}",
            self.base_url, category, ts, self.public_key, hash, PAGE_LIMIT, offset
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| UpstreamFetchError::Network(format!("HTTP request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(UpstreamFetchError::Auth {
                    status: status.as_u16(),
                });
            }
            return Err(UpstreamFetchError::Api {
                status: status.as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }

        let envelope: ListingEnvelope = resp
            .json()
            .await
            .map_err(|e| UpstreamFetchError::Decode(format!("JSON parse error: {e}")))?;
        Ok(envelope.data)
    }
}

/// True when another page remains after the one just fetched.
fn has_more(page: &ListingPage) -> bool {
    page.count > 0 && page.offset + page.count < page.total
}

fn to_raw(category: Category, item: WireItem) -> Option<RawCatalogItem> {
    let title = if category.uses_name_field() {
        item.name.or(item.title)
    } else {
        item.title.or(item.name)
    };
    let Some(title) = title.filter(|t| !t.trim().is_empty()) else {
        warn!("{category}: skipping upstream item {} with no title", item.id);
        return None;
    };

    Some(RawCatalogItem {
        upstream_id: item.id,
        title,
        description: item.description.filter(|d| !d.is_empty()),
        thumbnail_path: item.thumbnail.and_then(|t| t.path),
    })
}

#[async_trait]
impl CatalogProvider for MarvelCatalogClient {
    /// Fetch the complete current snapshot for one category, walking
    /// `offset` until the reported `total` is exhausted.
    async fn fetch(&self, category: Category) -> Result<Vec<RawCatalogItem>, UpstreamFetchError> {
        let mut items = Vec::new();
        let mut offset = 0;

        loop {
            let page = self.fetch_page(category, offset).await?;
            let done = !has_more(&page);
            offset = page.offset + page.count;
            items.extend(
                page.results
                    .into_iter()
                    .filter_map(|item| to_raw(category, item)),
            );
            if done {
                break;
            }
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_hash_matches_documented_example() {
        // ts=1, private="abcd", public="1234" is the example from the
        // upstream API docs.
        let client = MarvelCatalogClient::new(DEFAULT_BASE_URL, "1234", "abcd");
        assert_eq!(
            client.request_hash("1"),
            "ffd275c5130566a2916217b101f26150"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = MarvelCatalogClient::new("https://gateway.example/v1/public/", "pk", "sk");
        assert_eq!(client.base_url, "https://gateway.example/v1/public");
    }

    #[test]
    fn parse_listing_envelope() {
        let json = r#"{
            "code": 200,
            "status": "Ok",
            "data": {
                "offset": 0,
                "limit": 100,
                "total": 1493,
                "count": 2,
                "results": [
                    {"id": 1011334, "name": "3-D Man", "description": "", "thumbnail": {"path": "http://i.annihil.us/u/prod/marvel/i/mg/c/e0/535fecbbb9784", "extension": "jpg"}},
                    {"id": 1017100, "name": "A-Bomb (HAS)", "description": "Rick Jones has been Hulk's best bud.", "thumbnail": {"path": "http://i.annihil.us/u/prod/marvel/i/mg/3/20/5232158de5b16", "extension": "jpg"}}
                ]
            }
        }"#;

        let envelope: ListingEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.total, 1493);
        assert_eq!(envelope.data.results.len(), 2);
        assert_eq!(envelope.data.results[0].id, 1011334);
        assert_eq!(envelope.data.results[0].name.as_deref(), Some("3-D Man"));
    }

    #[test]
    fn characters_use_name_and_comics_use_title() {
        let item = WireItem {
            id: 5,
            name: Some("Wolverine".to_string()),
            title: None,
            description: None,
            thumbnail: None,
        };
        let raw = to_raw(Category::Characters, item).unwrap();
        assert_eq!(raw.title, "Wolverine");

        let item = WireItem {
            id: 6,
            name: None,
            title: Some("Uncanny X-Men #1".to_string()),
            description: Some("The first class.".to_string()),
            thumbnail: Some(WireThumbnail {
                path: Some("http://i.annihil.us/u/prod/marvel/6".to_string()),
            }),
        };
        let raw = to_raw(Category::Comics, item).unwrap();
        assert_eq!(raw.title, "Uncanny X-Men #1");
        assert_eq!(raw.description.as_deref(), Some("The first class."));
        assert_eq!(
            raw.thumbnail_path.as_deref(),
            Some("http://i.annihil.us/u/prod/marvel/6")
        );
    }

    #[test]
    fn untitled_items_are_skipped() {
        let item = WireItem {
            id: 7,
            name: None,
            title: None,
            description: None,
            thumbnail: None,
        };
        assert!(to_raw(Category::Stories, item).is_none());
    }

    #[test]
    fn pagination_walks_until_total_is_exhausted() {
        let page = |offset, count, total| ListingPage {
            offset,
            limit: 100,
            total,
            count,
            results: Vec::new(),
        };

        assert!(has_more(&page(0, 100, 250)));
        assert!(has_more(&page(100, 100, 250)));
        assert!(!has_more(&page(200, 50, 250)));
        // A short or empty page ends the walk even if total disagrees.
        assert!(!has_more(&page(0, 0, 250)));
    }
}
