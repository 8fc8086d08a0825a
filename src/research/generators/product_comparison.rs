use crate::research::generators::params::{self, bullets, list};
use crate::research::generators::{CLOSING_INSTRUCTION, PromptGenerator, PromptTemplate};
use crate::research::types::{PromptGeneratorResult, PromptParams, ReportTopic};

/// 产品对比
#[derive(Default)]
pub struct ProductComparisonGenerator;

impl PromptGenerator for ProductComparisonGenerator {
    fn topic(&self) -> ReportTopic {
        ReportTopic::ProductComparison
    }

    fn generate(&self, params: &PromptParams) -> PromptGeneratorResult {
        let products = list(params, "products");
        let subject = if products.is_empty() {
            "the leading products in the category".to_string()
        } else {
            products.join(" vs ")
        };

        let mut criteria = list(params, "criteria");
        if criteria.is_empty() {
            criteria = vec![
                "features".to_string(),
                "pricing".to_string(),
                "performance".to_string(),
                "user feedback".to_string(),
            ];
        }

        let template = PromptTemplate {
            opening_instruction: format!(
                "You are a product analyst. Compare {} using the following criteria:\n{}",
                subject,
                bullets(&criteria)
            ),
            title: format!("Product comparison: {}", subject),
            sections: vec![
                "Overview of each product".to_string(),
                "Comparison table across all criteria".to_string(),
                "Strengths and weaknesses per product".to_string(),
                "Best fit by use case".to_string(),
            ],
            closing_instruction: CLOSING_INSTRUCTION.to_string(),
        };

        PromptGeneratorResult::with_sources(template.render(), params::sources(params))
    }
}
