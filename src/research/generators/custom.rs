use crate::research::generators::params::{self, text};
use crate::research::generators::{CLOSING_INSTRUCTION, PromptGenerator, PromptTemplate};
use crate::research::types::{PromptGeneratorResult, PromptParams, ReportTopic};

/// 自定义主题，调用方直接给出调研指令
#[derive(Default)]
pub struct CustomGenerator;

impl PromptGenerator for CustomGenerator {
    fn topic(&self) -> ReportTopic {
        ReportTopic::Custom
    }

    fn generate(&self, params: &PromptParams) -> PromptGeneratorResult {
        let instruction = text(params, "prompt")
            .unwrap_or_else(|| "Research the topic described by the user.".to_string());
        let title = text(params, "title").unwrap_or_else(|| "Custom research report".to_string());

        let template = PromptTemplate {
            opening_instruction: format!(
                "You are a research analyst. Follow the instruction below and write a well-structured research report.\n\nInstruction: {}",
                instruction
            ),
            title,
            sections: vec![],
            closing_instruction: CLOSING_INSTRUCTION.to_string(),
        };

        PromptGeneratorResult::with_sources(template.render(), params::sources(params))
    }
}
