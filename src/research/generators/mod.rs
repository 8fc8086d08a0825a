//! Prompt生成器 - 把各主题的参数转换为报告提示词

use crate::research::types::{PromptGeneratorResult, PromptParams, ReportTopic};

mod competitor_review;
mod competitors_review;
mod custom;
mod innovation_news;
mod market_analysis;
pub mod params;
mod product_comparison;
pub mod registry;

pub use competitor_review::CompetitorReviewGenerator;
pub use competitors_review::CompetitorsReviewGenerator;
pub use custom::CustomGenerator;
pub use innovation_news::InnovationNewsGenerator;
pub use market_analysis::MarketAnalysisGenerator;
pub use product_comparison::ProductComparisonGenerator;
pub use registry::{DispatchError, GeneratorRegistry};

/// Prompt生成器
///
/// 实现必须是参数的纯函数：相同的参数总是得到相同的结果。
pub trait PromptGenerator: Send + Sync {
    /// 生成器负责的主题
    fn topic(&self) -> ReportTopic;

    /// 生成提示词与额外来源
    fn generate(&self, params: &PromptParams) -> PromptGeneratorResult;
}

/// 报告提示词模板
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// 开头的说明性指令
    pub opening_instruction: String,
    /// 报告标题
    pub title: String,
    /// 报告必须包含的章节
    pub sections: Vec<String>,
    /// 结尾的强调性指令
    pub closing_instruction: String,
}

impl PromptTemplate {
    pub fn render(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str(&self.opening_instruction);
        prompt.push_str("\n\n## Report title\n");
        prompt.push_str(&self.title);

        if !self.sections.is_empty() {
            prompt.push_str("\n\n## Required sections\n");
            for (i, section) in self.sections.iter().enumerate() {
                prompt.push_str(&format!("{}. {}\n", i + 1, section));
            }
        } else {
            prompt.push('\n');
        }

        prompt.push('\n');
        prompt.push_str(&self.closing_instruction);
        prompt
    }
}

/// 所有报告共用的结尾指令
pub(crate) const CLOSING_INSTRUCTION: &str = "Write the report in markdown. Cite every factual claim with the URL it came from, prefer recent and primary sources, and state clearly when information could not be verified.";
