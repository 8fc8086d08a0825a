//! 网络搜索客户端（Tavily）

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TavilySearchRequest {
    pub query: String,
    pub max_results: u32,
    pub search_depth: String,
    pub include_raw_content: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TavilySearchResponse {
    #[serde(default)]
    pub results: Vec<TavilyResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TavilyResult {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub score: f64,
}

/// 搜索客户端
///
/// User-Agent在构造时注入底层HTTP客户端，API KEY随每次请求传入。
#[derive(Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    config: SearchConfig,
}

impl SearchClient {
    pub fn new(config: SearchConfig, user_agent: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build search HTTP client")?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/search", self.config.api_base_url.trim_end_matches('/'))
    }

    /// 执行一次搜索
    pub async fn search(&self, api_key: &str, query: &str) -> Result<Vec<TavilyResult>> {
        let request = TavilySearchRequest {
            query: query.to_string(),
            max_results: self.config.max_results,
            search_depth: self.config.search_depth.clone(),
            include_raw_content: false,
        };

        tracing::debug!("🔎 search: {}", query);
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Search request failed: {}", query))?
            .error_for_status()
            .with_context(|| format!("Search service rejected query: {}", query))?;

        let body: TavilySearchResponse = response
            .json()
            .await
            .context("Failed to parse search response")?;
        Ok(body.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = SearchConfig {
            api_base_url: "http://localhost:9000/".to_string(),
            ..SearchConfig::default()
        };
        let client = SearchClient::new(config, "test-agent").unwrap();

        assert_eq!(client.endpoint(), "http://localhost:9000/search");
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let body = r#"{"query": "q", "results": [{"title": "T", "url": "https://a.example"}]}"#;
        let parsed: TavilySearchResponse = serde_json::from_str(body).unwrap();

        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].url, "https://a.example");
        assert!(parsed.results[0].content.is_empty());
    }
}
