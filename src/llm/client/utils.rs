use crate::config::{Config, LLMConfig, LLMProvider};
use crate::llm::client::types::LLMSettings;

/// 解析模型预设
///
/// 预设格式为 `provider:model`；前缀不是已知provider时，整个预设按模型名处理，
/// 空预设回落到配置中的默认模型。
pub fn parse_preset(preset: &str, llm_config: &LLMConfig) -> (LLMProvider, String) {
    let preset = preset.trim();
    if preset.is_empty() {
        return (llm_config.provider, llm_config.default_model.clone());
    }

    if let Some((prefix, model)) = preset.split_once(':')
        && let Ok(provider) = prefix.trim().parse::<LLMProvider>()
    {
        let model = model.trim();
        let model = if model.is_empty() {
            llm_config.default_model.as_str()
        } else {
            model
        };
        return (provider, model.to_string());
    }

    (llm_config.provider, preset.to_string())
}

/// 根据请求的KEY与预设合成LLM设置
pub fn resolve_settings(config: &Config, api_key: &str, preset: &str) -> LLMSettings {
    let llm_config = &config.llm;
    let (provider, model) = parse_preset(preset, llm_config);

    // 自定义基地址只对默认provider生效
    let api_base_url = if provider == llm_config.provider {
        llm_config.api_base_url.clone()
    } else {
        None
    };

    LLMSettings {
        provider,
        model,
        api_key: api_key.to_string(),
        api_base_url,
        max_tokens: llm_config.max_tokens,
        temperature: llm_config.temperature,
        timeout_seconds: llm_config.timeout_seconds,
        user_agent: config.user_agent.clone(),
    }
}
