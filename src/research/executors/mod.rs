//! Prompt执行器及其选择
//!
//! 首次生成与修订各有一对实现：确定性的dummy实现（不访问网络）和live实现
//! （真实调用LLM与网络搜索）。选择只取决于请求里的`dummyApi`开关。

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Config;
use crate::research::generators::PromptGenerator;
use crate::research::types::{GeneratorConfig, ReResearchRequest, ResearchRequest, ResearchResult};

mod dummy;
mod live;
mod live_revision;

pub use dummy::{DummyExecutor, DummyReExecutor};
pub use live::{LiveExecutor, SearchPlan};
pub use live_revision::LiveReExecutor;

/// 首次生成报告的执行器
#[async_trait]
pub trait PromptExecutor: Send + Sync {
    async fn execute(
        &self,
        generator: &dyn PromptGenerator,
        request: &ResearchRequest,
    ) -> Result<ResearchResult>;
}

/// 修订报告的执行器
#[async_trait]
pub trait PromptReExecutor: Send + Sync {
    async fn re_execute(&self, request: &ReResearchRequest) -> Result<ResearchResult>;
}

/// 执行器选择器，启动时构建，之后只读
#[derive(Clone)]
pub struct ExecutorSelector {
    dummy: Arc<dyn PromptExecutor>,
    live: Arc<dyn PromptExecutor>,
    dummy_re: Arc<dyn PromptReExecutor>,
    live_re: Arc<dyn PromptReExecutor>,
}

impl ExecutorSelector {
    pub fn new(
        dummy: Arc<dyn PromptExecutor>,
        live: Arc<dyn PromptExecutor>,
        dummy_re: Arc<dyn PromptReExecutor>,
        live_re: Arc<dyn PromptReExecutor>,
    ) -> Self {
        Self {
            dummy,
            live,
            dummy_re,
            live_re,
        }
    }

    /// 按配置装配dummy与live两套实现
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            Arc::new(DummyExecutor),
            Arc::new(LiveExecutor::new(config)?),
            Arc::new(DummyReExecutor),
            Arc::new(LiveReExecutor::new(config)),
        ))
    }

    /// 选择首次生成的执行器
    pub fn executor(&self, config: &GeneratorConfig) -> &dyn PromptExecutor {
        if config.dummy_api {
            self.dummy.as_ref()
        } else {
            self.live.as_ref()
        }
    }

    /// 选择修订的执行器
    pub fn re_executor(&self, config: &GeneratorConfig) -> &dyn PromptReExecutor {
        if config.dummy_api {
            self.dummy_re.as_ref()
        } else {
            self.live_re.as_ref()
        }
    }
}
