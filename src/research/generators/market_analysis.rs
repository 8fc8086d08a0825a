use crate::research::generators::params::{self, text_or};
use crate::research::generators::{CLOSING_INSTRUCTION, PromptGenerator, PromptTemplate};
use crate::research::types::{PromptGeneratorResult, PromptParams, ReportTopic};

/// 市场分析
#[derive(Default)]
pub struct MarketAnalysisGenerator;

impl PromptGenerator for MarketAnalysisGenerator {
    fn topic(&self) -> ReportTopic {
        ReportTopic::MarketAnalysis
    }

    fn generate(&self, params: &PromptParams) -> PromptGeneratorResult {
        let market = text_or(params, "market", "the target market");
        let region = text_or(params, "region", "global");
        let period = text_or(params, "period", "the current year");

        let template = PromptTemplate {
            opening_instruction: format!(
                "You are a market research analyst. Analyse {} ({} scope) for {}.",
                market, region, period
            ),
            title: format!("Market analysis: {} ({})", market, region),
            sections: vec![
                "Market definition and segmentation".to_string(),
                "Market size, growth rate and forecasts".to_string(),
                "Key players and market shares".to_string(),
                "Drivers, barriers and regulation".to_string(),
                "Trends and opportunities".to_string(),
            ],
            closing_instruction: CLOSING_INSTRUCTION.to_string(),
        };

        PromptGeneratorResult::with_sources(template.render(), params::sources(params))
    }
}
