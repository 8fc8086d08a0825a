use crate::research::generators::{
    CompetitorReviewGenerator, CompetitorsReviewGenerator, CustomGenerator,
    InnovationNewsGenerator, MarketAnalysisGenerator, ProductComparisonGenerator, PromptGenerator,
};
use crate::research::types::ReportTopic;

/// 调度错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("Can not choose prompt generator")]
    UnsupportedTopic(ReportTopic),
}

/// 主题到Prompt生成器的静态映射
///
/// 新增主题时，`resolve`中的match会在编译期强制补齐对应的生成器。
#[derive(Debug, Default, Clone, Copy)]
pub struct GeneratorRegistry;

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self
    }

    /// 查找主题对应的生成器
    pub fn resolve(&self, topic: ReportTopic) -> Result<&'static dyn PromptGenerator, DispatchError> {
        let generator: &'static dyn PromptGenerator = match topic {
            ReportTopic::Custom => &CustomGenerator,
            ReportTopic::InnovationNews => &InnovationNewsGenerator,
            ReportTopic::CompetitorReview => &CompetitorReviewGenerator,
            ReportTopic::CompetitorsReview => &CompetitorsReviewGenerator,
            ReportTopic::MarketAnalysis => &MarketAnalysisGenerator,
            ReportTopic::ProductComparison => &ProductComparisonGenerator,
        };

        // 登记错位的生成器不能替别的主题出报告
        if generator.topic() != topic {
            return Err(DispatchError::UnsupportedTopic(topic));
        }

        Ok(generator)
    }
}
