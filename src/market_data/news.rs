// =============================================================================
// NewsAPI Client - top business headlines
// =============================================================================
//
// SECURITY: the API key is sent as the `X-Api-Key` header and never logged.

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const DEFAULT_BASE_URL: &str = "https://newsapi.org";

/// A single headline as carried into the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    pub source: String,
    pub url: String,
    pub published_at: String,
}

#[derive(Clone)]
pub struct NewsClient {
    base_url: String,
    client: reqwest::Client,
}

impl NewsClient {
    pub fn new(api_key: &str) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key)
            .context("news API key is not a valid header value")?;
        default_headers.insert("X-Api-Key", key);

        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        })
    }

    /// GET /v2/top-headlines
    #[instrument(skip(self), name = "news::top_headlines")]
    pub async fn top_headlines(
        &self,
        country: &str,
        category: &str,
        page_size: u32,
    ) -> Result<Vec<Headline>> {
        let url = format!("{}/v2/top-headlines", self.base_url);
        let page_size = page_size.to_string();

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("country", country),
                ("category", category),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await
            .context("GET /v2/top-headlines request failed")?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse top-headlines response")?;

        if !status.is_success() {
            anyhow::bail!("NewsAPI GET /v2/top-headlines returned {}: {}", status, body);
        }

        let headlines = parse_headlines(&body);
        debug!(count = headlines.len(), "headlines retrieved");
        Ok(headlines)
    }
}

impl std::fmt::Debug for NewsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Extract headlines from a top-headlines payload.  Missing fields become
/// empty strings.
pub fn parse_headlines(body: &serde_json::Value) -> Vec<Headline> {
    let text = |v: &serde_json::Value| v.as_str().unwrap_or("").to_string();

    body["articles"]
        .as_array()
        .map(|articles| {
            articles
                .iter()
                .map(|a| Headline {
                    title: text(&a["title"]),
                    source: text(&a["source"]["name"]),
                    url: text(&a["url"]),
                    published_at: text(&a["publishedAt"]),
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_articles_with_missing_fields() {
        let body = json!({
            "status": "ok",
            "articles": [
                {
                    "title": "Markets close higher",
                    "source": { "id": null, "name": "Wire" },
                    "url": "https://example.com/a",
                    "publishedAt": "2024-01-02T10:00:00Z"
                },
                { "title": "Untitled source", "source": null }
            ]
        });
        let headlines = parse_headlines(&body);
        assert_eq!(headlines.len(), 2);
        assert_eq!(headlines[0].source, "Wire");
        assert_eq!(headlines[0].published_at, "2024-01-02T10:00:00Z");
        assert_eq!(headlines[1].source, "");
        assert_eq!(headlines[1].url, "");
    }

    #[test]
    fn no_articles_is_empty() {
        assert!(parse_headlines(&json!({ "status": "error" })).is_empty());
    }

    #[test]
    fn debug_redacts_key() {
        let client = NewsClient::new("secret-key").unwrap();
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("secret-key"));
    }
}
