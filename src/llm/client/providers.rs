//! LLM Provider支持模块

use anyhow::{Context, Result};
use rig::{agent::Agent, client::CompletionClient, completion::Prompt, extractor::Extractor};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{config::LLMProvider, llm::client::types::LLMSettings};

/// 统一的Provider客户端枚举
#[derive(Clone)]
pub enum ProviderClient {
    OpenAI(rig::providers::openai::Client),
    DeepSeek(rig::providers::deepseek::Client),
    OpenRouter(rig::providers::openrouter::Client),
    Anthropic(rig::providers::anthropic::Client),
    Ollama(rig::providers::ollama::Client),
}

impl ProviderClient {
    /// 根据请求的设置创建相应的provider客户端
    ///
    /// 所有provider共用一个带有配置User-Agent的HTTP客户端；
    /// 设置了基地址时，对任何provider都生效。
    pub fn new(settings: &LLMSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(&settings.user_agent)
            .build()
            .context("Failed to build LLM HTTP client")?;
        let base_url = settings.api_base_url.as_deref();

        match settings.provider {
            LLMProvider::OpenAI => {
                let mut builder = rig::providers::openai::Client::builder(&settings.api_key)
                    .with_client(http_client);
                if let Some(base_url) = base_url {
                    builder = builder.base_url(base_url);
                }
                Ok(ProviderClient::OpenAI(builder.build()))
            }
            LLMProvider::DeepSeek => {
                let mut builder = rig::providers::deepseek::Client::builder(&settings.api_key)
                    .with_client(http_client);
                if let Some(base_url) = base_url {
                    builder = builder.base_url(base_url);
                }
                Ok(ProviderClient::DeepSeek(builder.build()))
            }
            LLMProvider::OpenRouter => {
                let mut builder = rig::providers::openrouter::Client::builder(&settings.api_key)
                    .with_client(http_client);
                if let Some(base_url) = base_url {
                    builder = builder.base_url(base_url);
                }
                Ok(ProviderClient::OpenRouter(builder.build()))
            }
            LLMProvider::Anthropic => {
                let mut builder = rig::providers::anthropic::Client::builder(&settings.api_key)
                    .with_client(http_client);
                if let Some(base_url) = base_url {
                    builder = builder.base_url(base_url);
                }
                Ok(ProviderClient::Anthropic(builder.build()?))
            }
            LLMProvider::Ollama => {
                let mut builder =
                    rig::providers::ollama::Client::builder().with_client(http_client);
                if let Some(base_url) = base_url {
                    builder = builder.base_url(base_url);
                }
                Ok(ProviderClient::Ollama(builder.build()))
            }
        }
    }

    /// 创建Agent
    pub fn create_agent(&self, system_prompt: &str, settings: &LLMSettings) -> ProviderAgent {
        let model = settings.model.as_str();
        match self {
            ProviderClient::OpenAI(client) => {
                let agent = client
                    .completion_model(model)
                    .completions_api()
                    .into_agent_builder()
                    .preamble(system_prompt)
                    .max_tokens(settings.max_tokens.into())
                    .temperature(settings.temperature)
                    .build();
                ProviderAgent::OpenAI(agent)
            }
            ProviderClient::DeepSeek(client) => {
                let agent = client
                    .agent(model)
                    .preamble(system_prompt)
                    .max_tokens(settings.max_tokens.into())
                    .temperature(settings.temperature)
                    .build();
                ProviderAgent::DeepSeek(agent)
            }
            ProviderClient::OpenRouter(client) => {
                let agent = client
                    .agent(model)
                    .preamble(system_prompt)
                    .temperature(settings.temperature)
                    .build();
                ProviderAgent::OpenRouter(agent)
            }
            ProviderClient::Anthropic(client) => {
                let agent = client
                    .agent(model)
                    .preamble(system_prompt)
                    .max_tokens(settings.max_tokens.into())
                    .temperature(settings.temperature)
                    .build();
                ProviderAgent::Anthropic(agent)
            }
            ProviderClient::Ollama(client) => {
                let agent = client
                    .agent(model)
                    .preamble(system_prompt)
                    .max_tokens(settings.max_tokens.into())
                    .temperature(settings.temperature)
                    .build();
                ProviderAgent::Ollama(agent)
            }
        }
    }

    /// 创建Extractor
    pub fn create_extractor<T>(
        &self,
        system_prompt: &str,
        settings: &LLMSettings,
    ) -> ProviderExtractor<T>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
    {
        let model = settings.model.as_str();
        match self {
            ProviderClient::OpenAI(client) => {
                let extractor = client
                    .extractor_completions_api::<T>(model)
                    .preamble(system_prompt)
                    .max_tokens(settings.max_tokens.into())
                    .build();
                ProviderExtractor::OpenAI(extractor)
            }
            ProviderClient::DeepSeek(client) => {
                let extractor = client
                    .extractor::<T>(model)
                    .preamble(system_prompt)
                    .max_tokens(settings.max_tokens.into())
                    .build();
                ProviderExtractor::DeepSeek(extractor)
            }
            ProviderClient::OpenRouter(client) => {
                let extractor = client
                    .extractor::<T>(model)
                    .preamble(system_prompt)
                    .max_tokens(settings.max_tokens.into())
                    .build();
                ProviderExtractor::OpenRouter(extractor)
            }
            ProviderClient::Anthropic(client) => {
                let extractor = client
                    .extractor::<T>(model)
                    .preamble(system_prompt)
                    .max_tokens(settings.max_tokens.into())
                    .build();
                ProviderExtractor::Anthropic(extractor)
            }
            ProviderClient::Ollama(client) => {
                let extractor = client
                    .extractor::<T>(model)
                    .preamble(system_prompt)
                    .max_tokens(settings.max_tokens.into())
                    .build();
                ProviderExtractor::Ollama(extractor)
            }
        }
    }
}

/// 统一的Agent枚举
pub enum ProviderAgent {
    OpenAI(Agent<rig::providers::openai::CompletionModel>),
    DeepSeek(Agent<rig::providers::deepseek::CompletionModel>),
    OpenRouter(Agent<rig::providers::openrouter::CompletionModel>),
    Anthropic(Agent<rig::providers::anthropic::completion::CompletionModel>),
    Ollama(Agent<rig::providers::ollama::CompletionModel<reqwest::Client>>),
}

impl ProviderAgent {
    /// 执行prompt
    pub async fn prompt(&self, prompt: &str) -> Result<String> {
        match self {
            ProviderAgent::OpenAI(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::DeepSeek(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::OpenRouter(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::Anthropic(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::Ollama(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
        }
    }
}

/// 统一的Extractor枚举
pub enum ProviderExtractor<T>
where
    T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
{
    OpenAI(Extractor<rig::providers::openai::CompletionModel, T>),
    DeepSeek(Extractor<rig::providers::deepseek::CompletionModel, T>),
    OpenRouter(Extractor<rig::providers::openrouter::CompletionModel, T>),
    Anthropic(Extractor<rig::providers::anthropic::completion::CompletionModel, T>),
    Ollama(Extractor<rig::providers::ollama::CompletionModel<reqwest::Client>, T>),
}

impl<T> ProviderExtractor<T>
where
    T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
{
    /// 执行提取
    pub async fn extract(&self, prompt: &str) -> Result<T> {
        match self {
            ProviderExtractor::OpenAI(extractor) => {
                extractor.extract(prompt).await.map_err(|e| e.into())
            }
            ProviderExtractor::DeepSeek(extractor) => {
                extractor.extract(prompt).await.map_err(|e| e.into())
            }
            ProviderExtractor::OpenRouter(extractor) => {
                extractor.extract(prompt).await.map_err(|e| e.into())
            }
            ProviderExtractor::Anthropic(extractor) => {
                extractor.extract(prompt).await.map_err(|e| e.into())
            }
            ProviderExtractor::Ollama(extractor) => {
                extractor.extract(prompt).await.map_err(|e| e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(provider: LLMProvider, api_base_url: Option<&str>) -> LLMSettings {
        LLMSettings {
            provider,
            model: "test-model".to_string(),
            api_key: "key".to_string(),
            api_base_url: api_base_url.map(str::to_string),
            max_tokens: 1024,
            temperature: 0.1,
            timeout_seconds: 5,
            user_agent: "researcher-test-agent/1.0".to_string(),
        }
    }

    #[test]
    fn test_ollama_honours_base_url() {
        let client =
            ProviderClient::new(&settings(LLMProvider::Ollama, Some("http://gpu-box:11434")))
                .unwrap();

        match client {
            ProviderClient::Ollama(client) => {
                assert!(format!("{:?}", client).contains("http://gpu-box:11434"));
            }
            _ => panic!("expected an Ollama client"),
        }
    }

    #[test]
    fn test_base_url_applies_to_every_provider() {
        for provider in [
            LLMProvider::DeepSeek,
            LLMProvider::OpenRouter,
            LLMProvider::Anthropic,
        ] {
            let client =
                ProviderClient::new(&settings(provider, Some("http://proxy.local/v1"))).unwrap();
            let debug = match client {
                ProviderClient::DeepSeek(client) => format!("{:?}", client),
                ProviderClient::OpenRouter(client) => format!("{:?}", client),
                ProviderClient::Anthropic(client) => format!("{:?}", client),
                _ => panic!("unexpected provider for {}", provider),
            };
            assert!(debug.contains("http://proxy.local/v1"), "{}", provider);
        }
    }

    #[test]
    fn test_default_base_url_when_unset() {
        let client = ProviderClient::new(&settings(LLMProvider::Ollama, None)).unwrap();

        match client {
            ProviderClient::Ollama(client) => {
                assert!(format!("{:?}", client).contains("http://localhost:11434"));
            }
            _ => panic!("expected an Ollama client"),
        }
    }
}
