//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：打印启动信息、创建编排器和结果写入服务
//! 2. **运行抓取**：委托 `ScrapeOrchestrator` 完成整个抓取
//! 3. **结果持久化**：有记录时写入 JSON 文件
//! 4. **全局统计**：输出成功 / 失败页数和记录总数

use crate::config::Config;
use crate::error::AppResult;
use crate::models::ScrapeResult;
use crate::orchestrator::scrape_orchestrator::ScrapeOrchestrator;
use crate::services::ResultWriter;
use crate::utils::logging::{log_startup, print_final_stats};
use std::path::PathBuf;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    orchestrator: ScrapeOrchestrator,
    writer: ResultWriter,
}

/// 一次运行的产出
#[derive(Debug)]
pub struct RunSummary {
    pub result: ScrapeResult,
    pub output_file: Option<PathBuf>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> AppResult<Self> {
        log_startup(&config);

        let orchestrator = ScrapeOrchestrator::new(&config)?;
        let writer = ResultWriter::new(&config);

        Ok(Self {
            config,
            orchestrator,
            writer,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> AppResult<RunSummary> {
        info!("\n🔍 正在抓取注册人数据...");
        let result = self.orchestrator.run().await?;

        let output_file = if result.is_empty() {
            warn!("⚠️ 没有找到任何注册人，不写入文件");
            None
        } else {
            let path = self.writer.write(&result.records, &self.config.region).await?;
            info!("✓ 成功抓取 {} 条注册人记录", result.len());
            Some(path)
        };

        print_final_stats(&result, output_file.as_deref());

        Ok(RunSummary {
            result,
            output_file,
        })
    }
}
