use crate::research::generators::params::{self, bullets, list, text, text_or};
use crate::research::generators::{CLOSING_INSTRUCTION, PromptGenerator, PromptTemplate};
use crate::research::types::{PromptGeneratorResult, PromptParams, ReportTopic};

/// 单个竞争对手的深度评估
#[derive(Default)]
pub struct CompetitorReviewGenerator;

impl PromptGenerator for CompetitorReviewGenerator {
    fn topic(&self) -> ReportTopic {
        ReportTopic::CompetitorReview
    }

    fn generate(&self, params: &PromptParams) -> PromptGeneratorResult {
        let competitor = text_or(params, "competitor", "the competitor");
        let perspective = match text(params, "company") {
            Some(company) => format!(" from the perspective of {}", company),
            None => String::new(),
        };

        let mut opening = format!(
            "You are a competitive intelligence analyst. Write an in-depth review of {}{}.",
            competitor, perspective
        );
        let aspects = list(params, "aspects");
        if !aspects.is_empty() {
            opening.push_str("\n\nFocus especially on:\n");
            opening.push_str(&bullets(&aspects));
        }

        let template = PromptTemplate {
            opening_instruction: opening,
            title: format!("Competitor review: {}", competitor),
            sections: vec![
                "Company overview and positioning".to_string(),
                "Products, services and pricing".to_string(),
                "Target customers and go-to-market strategy".to_string(),
                "Strengths and weaknesses".to_string(),
                "Recent moves and likely next steps".to_string(),
            ],
            closing_instruction: CLOSING_INSTRUCTION.to_string(),
        };

        PromptGeneratorResult::with_sources(template.render(), params::sources(params))
    }
}
