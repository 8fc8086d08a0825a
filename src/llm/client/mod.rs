//! LLM客户端 - 提供统一的LLM服务接口

use anyhow::{Context, Result, anyhow};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

mod providers;
pub mod types;
pub mod utils;

use providers::ProviderClient;
use types::LLMSettings;

/// LLM客户端 - 提供统一的LLM服务接口
///
/// 每个请求使用自己的KEY与模型预设，因此客户端随请求创建。
/// 调用失败直接返回错误，不做重试。
#[derive(Clone)]
pub struct LLMClient {
    settings: LLMSettings,
    client: ProviderClient,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(settings: LLMSettings) -> Result<Self> {
        let client = ProviderClient::new(&settings)
            .with_context(|| format!("Failed to create {} client", settings.provider))?;
        Ok(Self { settings, client })
    }

    /// 为单次调用加上超时限制
    async fn with_timeout<T, Fut>(&self, operation: &str, fut: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        let timeout = Duration::from_secs(self.settings.timeout_seconds);
        match tokio::time::timeout(timeout, fut).await {
            Ok(result) => result.with_context(|| {
                format!(
                    "{} failed ({}:{})",
                    operation, self.settings.provider, self.settings.model
                )
            }),
            Err(_) => Err(anyhow!(
                "{} timed out after {}s ({}:{})",
                operation,
                self.settings.timeout_seconds,
                self.settings.provider,
                self.settings.model
            )),
        }
    }

    /// 数据提取方法，返回结构化数据
    pub async fn extract<T>(&self, system_prompt: &str, user_prompt: &str) -> Result<T>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
    {
        let extractor = self
            .client
            .create_extractor::<T>(system_prompt, &self.settings);

        tracing::debug!("🔄 LLM extract, model: {}", self.settings.model);
        self.with_timeout("LLM extraction", extractor.extract(user_prompt))
            .await
    }

    /// 单轮对话方法
    pub async fn prompt(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let agent = self.client.create_agent(system_prompt, &self.settings);

        tracing::debug!("🔄 LLM prompt, model: {}", self.settings.model);
        self.with_timeout("LLM prompt", agent.prompt(user_prompt))
            .await
    }
}
