use crate::research::generators::params::{self, bullets, list, text};
use crate::research::generators::{CLOSING_INSTRUCTION, PromptGenerator, PromptTemplate};
use crate::research::types::{PromptGeneratorResult, PromptParams, ReportTopic};

/// 多个竞争对手的横向对比
#[derive(Default)]
pub struct CompetitorsReviewGenerator;

impl PromptGenerator for CompetitorsReviewGenerator {
    fn topic(&self) -> ReportTopic {
        ReportTopic::CompetitorsReview
    }

    fn generate(&self, params: &PromptParams) -> PromptGeneratorResult {
        let competitors = list(params, "competitors");
        let subject = if competitors.is_empty() {
            "the main competitors in the market".to_string()
        } else {
            competitors.join(", ")
        };

        let mut opening = match text(params, "company") {
            Some(company) => format!(
                "You are a competitive intelligence analyst. Review the competitive landscape of {} and compare it against: {}.",
                company, subject
            ),
            None => format!(
                "You are a competitive intelligence analyst. Review and compare the following competitors: {}.",
                subject
            ),
        };
        let aspects = list(params, "aspects");
        if !aspects.is_empty() {
            opening.push_str("\n\nCompare them on:\n");
            opening.push_str(&bullets(&aspects));
        }

        let template = PromptTemplate {
            opening_instruction: opening,
            title: format!("Competitors review: {}", subject),
            sections: vec![
                "Landscape overview".to_string(),
                "Short profile of each competitor".to_string(),
                "Side-by-side comparison table".to_string(),
                "Differentiation and white spaces".to_string(),
                "Recommendations".to_string(),
            ],
            closing_instruction: CLOSING_INSTRUCTION.to_string(),
        };

        PromptGeneratorResult::with_sources(template.render(), params::sources(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_competitors_review_lists_competitors() {
        let params = json!({"competitors": ["Globex", "Initech"], "company": "Acme"});
        let result = CompetitorsReviewGenerator.generate(params.as_object().unwrap());

        assert!(result
            .prompt
            .contains("landscape of Acme and compare it against: Globex, Initech."));
        assert!(result.prompt.contains("Competitors review: Globex, Initech"));
    }

    #[test]
    fn test_competitors_review_without_competitors() {
        let result = CompetitorsReviewGenerator.generate(&PromptParams::new());

        assert!(result.prompt.contains("the main competitors in the market"));
        assert!(result.extra_sources.is_none());
    }
}
