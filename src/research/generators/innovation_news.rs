use crate::research::generators::params::{self, text_or};
use crate::research::generators::{CLOSING_INSTRUCTION, PromptGenerator, PromptTemplate};
use crate::research::types::{PromptGeneratorResult, PromptParams, ReportTopic};

/// 行业创新动态
#[derive(Default)]
pub struct InnovationNewsGenerator;

impl PromptGenerator for InnovationNewsGenerator {
    fn topic(&self) -> ReportTopic {
        ReportTopic::InnovationNews
    }

    fn generate(&self, params: &PromptParams) -> PromptGeneratorResult {
        let industry = text_or(params, "industry", "technology");
        let period = text_or(params, "period", "the last month");
        let region = text_or(params, "region", "worldwide");

        let template = PromptTemplate {
            opening_instruction: format!(
                "You are an innovation scout. Collect the most significant innovation news in the {} industry ({}) published during {}.",
                industry, region, period
            ),
            title: format!("Innovation news: {} ({}, {})", industry, region, period),
            sections: vec![
                "Executive summary of the most important developments".to_string(),
                "New products, technologies and patents".to_string(),
                "Funding rounds, acquisitions and partnerships".to_string(),
                "Research breakthroughs and notable publications".to_string(),
                "Implications and signals to watch".to_string(),
            ],
            closing_instruction: CLOSING_INSTRUCTION.to_string(),
        };

        PromptGeneratorResult::with_sources(template.render(), params::sources(params))
    }
}
