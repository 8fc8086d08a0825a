//! 生成器参数的宽松读取

use crate::research::types::PromptParams;
use serde_json::Value;

/// 读取文本参数，数字与布尔值会被转换为文本，空白文本视为缺失
pub fn text(params: &PromptParams, key: &str) -> Option<String> {
    match params.get(key)? {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// 读取文本参数，缺失时使用默认值
pub fn text_or(params: &PromptParams, key: &str, default: &str) -> String {
    text(params, key).unwrap_or_else(|| default.to_string())
}

/// 读取列表参数，接受JSON数组或逗号分隔的文本
pub fn list(params: &PromptParams, key: &str) -> Vec<String> {
    let items: Vec<String> = match params.get(key) {
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    };

    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// 读取调用方指定的额外来源，只保留http(s)地址并去重，保持原有顺序
pub fn sources(params: &PromptParams) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for url in list(params, "sources") {
        if (url.starts_with("http://") || url.starts_with("https://")) && !urls.contains(&url) {
            urls.push(url);
        }
    }
    urls
}

/// 将列表渲染为markdown条目
pub fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}
