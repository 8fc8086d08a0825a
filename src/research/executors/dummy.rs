use anyhow::Result;
use async_trait::async_trait;

use crate::research::executors::{PromptExecutor, PromptReExecutor};
use crate::research::generators::PromptGenerator;
use crate::research::selection::Selection;
use crate::research::types::{
    ReResearchRequest, ResearchRequest, ResearchResult, ResearchResultMetadata,
};

/// 不访问网络的确定性执行器，用于本地开发与测试
///
/// 报告内容就是主题名加上生成器产出的提示词。
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyExecutor;

#[async_trait]
impl PromptExecutor for DummyExecutor {
    async fn execute(
        &self,
        generator: &dyn PromptGenerator,
        request: &ResearchRequest,
    ) -> Result<ResearchResult> {
        let generated = generator.generate(&request.prompt_params);
        tracing::debug!("🧪 dummy research for {}", request.report_topic);

        Ok(ResearchResult {
            metadata: ResearchResultMetadata {
                source_urls: generated.extra_sources.unwrap_or_default(),
            },
            markdown: format!("# {}\n\n{}", request.report_topic, generated.prompt),
        })
    }
}

/// 不访问网络的确定性修订执行器
///
/// 选区被替换为方括号包裹的修订指令，来源原样带回。
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyReExecutor;

#[async_trait]
impl PromptReExecutor for DummyReExecutor {
    async fn re_execute(&self, request: &ReResearchRequest) -> Result<ResearchResult> {
        let selection = Selection::clamp(
            &request.document,
            request.selection_start,
            request.selection_length,
        );
        tracing::debug!(
            "🧪 dummy revision, selection bytes {}..{}",
            selection.start,
            selection.end
        );

        Ok(ResearchResult {
            metadata: ResearchResultMetadata {
                source_urls: request.metadata.source_urls.clone(),
            },
            markdown: selection.splice(&request.document, &format!("[{}]", request.prompt)),
        })
    }
}
