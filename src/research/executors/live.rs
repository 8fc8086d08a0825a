use anyhow::Result;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::llm::client::LLMClient;
use crate::llm::client::utils::resolve_settings;
use crate::research::executors::PromptExecutor;
use crate::research::generators::PromptGenerator;
use crate::research::types::{ResearchRequest, ResearchResult, ResearchResultMetadata};
use crate::search::{SearchClient, TavilyResult};

/// LLM规划出的搜索查询
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchPlan {
    /// 用于网络搜索的查询语句，按重要性排序
    pub queries: Vec<String>,
}

const PLANNER_SYSTEM_PROMPT: &str = "You are a research planner. Given a research brief, produce the web search queries that will surface the most relevant, recent and authoritative sources for it. Return short keyword-style queries, most important first.";

/// 真实调用LLM与网络搜索的执行器
///
/// 流程：生成提示词 → LLM规划搜索查询 → 逐条搜索 → LLM撰写报告。
/// 任何一步失败都直接返回错误。
pub struct LiveExecutor {
    config: Config,
    search: SearchClient,
}

impl LiveExecutor {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            search: SearchClient::new(config.search.clone(), &config.user_agent)?,
        })
    }
}

#[async_trait]
impl PromptExecutor for LiveExecutor {
    async fn execute(
        &self,
        generator: &dyn PromptGenerator,
        request: &ResearchRequest,
    ) -> Result<ResearchResult> {
        let generated = generator.generate(&request.prompt_params);
        let extra_sources = generated.extra_sources.unwrap_or_default();

        let settings = resolve_settings(
            &self.config,
            &request.config.llm_key,
            &request.config.llm_preset,
        );
        let llm = LLMClient::new(settings)?;

        tracing::info!("🤖 planning search queries for {}", request.report_topic);
        let plan: SearchPlan = llm
            .extract(PLANNER_SYSTEM_PROMPT, &generated.prompt)
            .await?;
        let queries = normalize_queries(plan.queries, self.config.search.max_queries);

        let mut findings = Vec::new();
        for query in &queries {
            let results = self
                .search
                .search(&request.config.tavily_api_key, query)
                .await?;
            tracing::debug!("🔎 {} results for \"{}\"", results.len(), query);
            findings.extend(results);
        }

        tracing::info!(
            "📝 writing {} report from {} findings",
            request.report_topic,
            findings.len()
        );
        let user_prompt = build_report_prompt(
            &generated.prompt,
            task_context(&request.task).as_deref(),
            &extra_sources,
            &findings,
        );
        let markdown = llm.prompt(&writer_system_prompt(), &user_prompt).await?;

        Ok(ResearchResult {
            metadata: ResearchResultMetadata {
                source_urls: collect_sources(&extra_sources, &findings),
            },
            markdown,
        })
    }
}

fn writer_system_prompt() -> String {
    format!(
        "You are a senior research analyst writing reports for business readers. Today is {}. Write only the report in markdown, without any preamble, and never invent sources.",
        chrono::Utc::now().format("%Y-%m-%d")
    )
}

/// 去掉空查询与重复查询，并限制数量
pub(crate) fn normalize_queries(queries: Vec<String>, max_queries: usize) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for query in queries {
        if normalized.len() >= max_queries {
            break;
        }
        let query = query.trim().to_string();
        if !query.is_empty() && !normalized.contains(&query) {
            normalized.push(query);
        }
    }
    normalized
}

/// 调用方附带的任务上下文，null视为没有
pub(crate) fn task_context(task: &serde_json::Value) -> Option<String> {
    match task {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.trim().is_empty() => None,
        serde_json::Value::String(s) => Some(s.trim().to_string()),
        other => serde_json::to_string_pretty(other).ok(),
    }
}

/// 汇总来源：调用方指定的来源在前，搜索结果按出现顺序在后，去重
pub(crate) fn collect_sources(extra_sources: &[String], findings: &[TavilyResult]) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    let candidates = extra_sources
        .iter()
        .chain(findings.iter().map(|finding| &finding.url));
    for url in candidates {
        if !urls.contains(url) {
            urls.push(url.clone());
        }
    }
    urls
}

pub(crate) fn build_report_prompt(
    brief: &str,
    task: Option<&str>,
    extra_sources: &[String],
    findings: &[TavilyResult],
) -> String {
    let mut prompt = String::from("# Research brief\n");
    prompt.push_str(brief);
    prompt.push_str("\n\n");

    if let Some(task) = task {
        prompt.push_str("# Task context\n");
        prompt.push_str(task);
        prompt.push_str("\n\n");
    }

    if !extra_sources.is_empty() {
        prompt.push_str("# Sources requested by the user\n");
        for url in extra_sources {
            prompt.push_str(&format!("- {}\n", url));
        }
        prompt.push('\n');
    }

    prompt.push_str("# Search findings\n");
    if findings.is_empty() {
        prompt.push_str("No search results were found. Say so where it matters.\n");
    }
    for (i, finding) in findings.iter().enumerate() {
        prompt.push_str(&format!(
            "{}. {} ({})\n{}\n\n",
            i + 1,
            finding.title,
            finding.url,
            finding.content.trim()
        ));
    }

    prompt.push_str("\nWrite the full report now.");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn finding(url: &str) -> TavilyResult {
        TavilyResult {
            title: format!("Title of {}", url),
            url: url.to_string(),
            content: " body ".to_string(),
            score: 0.5,
        }
    }

    #[test]
    fn test_normalize_queries() {
        let queries = vec![
            " ev market ".to_string(),
            "".to_string(),
            "ev market".to_string(),
            "charging".to_string(),
            "batteries".to_string(),
        ];

        assert_eq!(normalize_queries(queries.clone(), 2), vec!["ev market", "charging"]);
        assert!(normalize_queries(queries, 0).is_empty());
    }

    #[test]
    fn test_task_context() {
        assert_eq!(task_context(&json!(null)), None);
        assert_eq!(task_context(&json!("  ")), None);
        assert_eq!(task_context(&json!(" focus on EU ")), Some("focus on EU".to_string()));
        assert!(task_context(&json!({"id": 3})).unwrap().contains("\"id\": 3"));
    }

    #[test]
    fn test_collect_sources_order_and_dedup() {
        let extra = vec!["https://user.example".to_string()];
        let findings = vec![
            finding("https://b.example"),
            finding("https://user.example"),
            finding("https://c.example"),
            finding("https://b.example"),
        ];

        assert_eq!(
            collect_sources(&extra, &findings),
            vec!["https://user.example", "https://b.example", "https://c.example"]
        );
    }

    #[test]
    fn test_build_report_prompt_sections() {
        let prompt = build_report_prompt(
            "Brief text",
            Some("Task text"),
            &["https://user.example".to_string()],
            &[finding("https://b.example")],
        );

        assert!(prompt.starts_with("# Research brief\nBrief text"));
        assert!(prompt.contains("# Task context\nTask text"));
        assert!(prompt.contains("- https://user.example"));
        assert!(prompt.contains("1. Title of https://b.example (https://b.example)\nbody"));
    }

    #[test]
    fn test_build_report_prompt_without_findings() {
        let prompt = build_report_prompt("Brief", None, &[], &[]);

        assert!(!prompt.contains("# Task context"));
        assert!(prompt.contains("No search results were found."));
    }
}
