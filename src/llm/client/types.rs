use serde::{Deserialize, Serialize};

use crate::config::LLMProvider;

/// 单次请求使用的LLM设置
///
/// 由服务级的LLM配置与请求携带的KEY、模型预设合成，随请求创建、随请求销毁。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LLMSettings {
    pub provider: LLMProvider,
    pub model: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub api_base_url: Option<String>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub timeout_seconds: u64,
    /// 注入provider底层HTTP客户端的User-Agent
    pub user_agent: String,
}
