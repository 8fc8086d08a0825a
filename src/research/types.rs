//! 请求/响应数据契约
//!
//! 所有跨越HTTP边界的数据都在这里定义，反序列化失败即视为校验错误，
//! 不会进入处理逻辑。

use serde::{Deserialize, Serialize};

/// 生成器参数，结构由具体的生成器自行解释
pub type PromptParams = serde_json::Map<String, serde_json::Value>;

/// 单次请求携带的凭证与模式选择
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// 为true时使用不访问网络的确定性实现
    pub dummy_api: bool,
    pub llm_key: String,
    pub tavily_api_key: String,
    /// 模型预设，格式为 `provider:model`
    pub llm_preset: String,
}

/// 报告主题
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportTopic {
    Custom,
    InnovationNews,
    CompetitorReview,
    CompetitorsReview,
    MarketAnalysis,
    ProductComparison,
}

impl ReportTopic {
    /// 全部主题
    pub const ALL: [ReportTopic; 6] = [
        ReportTopic::Custom,
        ReportTopic::InnovationNews,
        ReportTopic::CompetitorReview,
        ReportTopic::CompetitorsReview,
        ReportTopic::MarketAnalysis,
        ReportTopic::ProductComparison,
    ];

    /// 线上传输使用的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportTopic::Custom => "CUSTOM",
            ReportTopic::InnovationNews => "INNOVATION_NEWS",
            ReportTopic::CompetitorReview => "COMPETITOR_REVIEW",
            ReportTopic::CompetitorsReview => "COMPETITORS_REVIEW",
            ReportTopic::MarketAnalysis => "MARKET_ANALYSIS",
            ReportTopic::ProductComparison => "PRODUCT_COMPARISON",
        }
    }
}

impl std::fmt::Display for ReportTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 首次生成报告的请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchRequest {
    pub config: GeneratorConfig,
    pub report_topic: ReportTopic,
    pub prompt_params: PromptParams,
    /// 调用方附带的任务上下文，可以为null，但字段必须存在
    pub task: serde_json::Value,
}

/// 报告来源信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResearchResultMetadata {
    pub source_urls: Vec<String>,
}

/// 执行器产出的报告
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResearchResult {
    pub metadata: ResearchResultMetadata,
    pub markdown: String,
}

/// 接口返回的报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptGeneratorResult {
    pub prompt: String,
    /// 没有额外来源时为null，而不是空列表
    #[serde(default)]
    pub extra_sources: Option<Vec<String>>,
}

impl PromptGeneratorResult {
    /// 只有prompt、没有额外来源的结果
    pub fn prompt_only(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            extra_sources: None,
        }
    }

    /// 带额外来源的结果，来源为空时视为没有来源
    pub fn with_sources(prompt: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            prompt: prompt.into(),
            extra_sources: if sources.is_empty() {
                None
            } else {
                Some(sources)
            },
        }
    }
}

impl From<ResearchResult> for PromptGeneratorResult {
    fn from(result: ResearchResult) -> Self {
        Self::with_sources(result.markdown, result.metadata.source_urls)
    }
}

/// 修订请求中回传的来源信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResearchResultMetadataRequest {
    pub source_urls: Vec<String>,
}

/// 修订已有报告的请求
///
/// 选区范围不与文档长度做交叉校验，由执行器自行处理越界。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReResearchRequest {
    pub config: GeneratorConfig,
    pub document: String,
    #[serde(rename = "medatada")]
    pub metadata: ResearchResultMetadataRequest,
    pub prompt: String,
    pub selection_start: i64,
    pub selection_length: i64,
}
