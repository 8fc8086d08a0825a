use anyhow::Result;
use async_trait::async_trait;

use crate::config::Config;
use crate::llm::client::LLMClient;
use crate::llm::client::utils::resolve_settings;
use crate::research::executors::PromptReExecutor;
use crate::research::selection::Selection;
use crate::research::types::{ReResearchRequest, ResearchResult, ResearchResultMetadata};

const SELECTION_OPEN: &str = "<<<SELECTION>>>";
const SELECTION_CLOSE: &str = "<<<END_SELECTION>>>";

const REVISION_SYSTEM_PROMPT: &str = "You are an editor revising a research report written in markdown. The part of the report to change is wrapped in <<<SELECTION>>> and <<<END_SELECTION>>> markers; when the markers are adjacent, new text should be inserted at that position. Follow the user's instruction and return ONLY the replacement text for the marked part, keeping the tone, formatting and citation style of the surrounding report. Do not repeat the markers.";

/// 真实调用LLM的修订执行器
///
/// 只把选区交给LLM改写，再拼回原文，选区外的内容保持不变。
pub struct LiveReExecutor {
    config: Config,
}

impl LiveReExecutor {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

#[async_trait]
impl PromptReExecutor for LiveReExecutor {
    async fn re_execute(&self, request: &ReResearchRequest) -> Result<ResearchResult> {
        let selection = Selection::clamp(
            &request.document,
            request.selection_start,
            request.selection_length,
        );

        let settings = resolve_settings(
            &self.config,
            &request.config.llm_key,
            &request.config.llm_preset,
        );
        let llm = LLMClient::new(settings)?;

        tracing::info!(
            "✏️ revising report, selection bytes {}..{}",
            selection.start,
            selection.end
        );
        let user_prompt = build_revision_prompt(
            &request.document,
            selection,
            &request.prompt,
            &request.metadata.source_urls,
        );
        let rewrite = llm.prompt(REVISION_SYSTEM_PROMPT, &user_prompt).await?;

        let (_, selected, _) = selection.split(&request.document);
        let replacement = keep_padding(selected, &clean_rewrite(&rewrite));

        Ok(ResearchResult {
            metadata: ResearchResultMetadata {
                source_urls: request.metadata.source_urls.clone(),
            },
            markdown: selection.splice(&request.document, &replacement),
        })
    }
}

pub(crate) fn build_revision_prompt(
    document: &str,
    selection: Selection,
    instruction: &str,
    source_urls: &[String],
) -> String {
    let (before, selected, after) = selection.split(document);

    let mut prompt = format!(
        "# Report\n{}{}{}{}{}\n\n# Instruction\n{}\n",
        before, SELECTION_OPEN, selected, SELECTION_CLOSE, after, instruction
    );
    if !source_urls.is_empty() {
        prompt.push_str("\n# Sources used by the report\n");
        for url in source_urls {
            prompt.push_str(&format!("- {}\n", url));
        }
    }
    prompt
}

/// 去掉模型可能附带的代码块围栏与残留标记
pub(crate) fn clean_rewrite(rewrite: &str) -> String {
    let mut text = rewrite.trim();

    if let Some(inner) = text.strip_prefix("```") {
        // 跳过围栏后的语言标识
        let inner = inner.split_once('\n').map(|(_, body)| body).unwrap_or("");
        text = inner.trim_end().strip_suffix("```").unwrap_or(inner).trim();
    }

    text.replace(SELECTION_OPEN, "")
        .replace(SELECTION_CLOSE, "")
}

/// 沿用原选区首尾的空白，避免改写后与上下文粘连
pub(crate) fn keep_padding(selected: &str, rewrite: &str) -> String {
    let body = selected.trim_start();
    let leading = &selected[..selected.len() - body.len()];
    let trailing = &body[body.trim_end().len()..];

    format!("{}{}{}", leading, rewrite, trailing)
}
