//! 抓取编排器 - 编排层
//!
//! ## 职责
//!
//! 1. **分页探测**：请求第 0 页获取总页数
//! 2. **任务调度**：为每个页码创建一个任务，交给并发闸门排队
//! 3. **结果汇总**：按完成顺序拼接所有成功页面的记录
//!
//! ## 设计特点
//!
//! - 不提前终止：所有任务都会执行完毕，单页失败只记录日志
//! - 资源所有者：唯一创建 HTTP 连接池和并发闸门的模块
//! - 空结果是正常结束，不是错误

use crate::clients::{RegisterClient, RequestFactory};
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::ConcurrencyGate;
use crate::models::{PageIndex, ScrapeResult};
use crate::services::{PageExtractor, PaginationDiscoverer};
use crate::utils::logging::{log_pages_discovered, log_progress};
use crate::workflow::{PageCtx, PageFetcher, PageOutcome};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, warn};

/// 抓取编排器
pub struct ScrapeOrchestrator {
    region: String,
    discoverer: PaginationDiscoverer,
    fetcher: PageFetcher,
    gate: ConcurrencyGate,
}

impl ScrapeOrchestrator {
    /// 根据配置创建编排器
    ///
    /// HTTP 客户端、选择器或源地址无法初始化时返回错误。
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Arc::new(RegisterClient::new(config)?);
        let factory = Arc::new(RequestFactory::new(&config.base_url)?);
        let extractor = Arc::new(PageExtractor::new(&config.base_url, &config.region)?);
        let gate = ConcurrencyGate::new(config.max_concurrent_requests);

        let discoverer = PaginationDiscoverer::new(client.clone(), factory.clone())?;
        let fetcher = PageFetcher::new(
            client,
            factory,
            extractor,
            gate.clone(),
            config.request_delay(),
        );

        Ok(Self {
            region: config.region.clone(),
            discoverer,
            fetcher,
            gate,
        })
    }

    /// 并发闸门（用于观察并发峰值）
    pub fn gate(&self) -> &ConcurrencyGate {
        &self.gate
    }

    /// 执行一次完整抓取
    pub async fn run(&self) -> AppResult<ScrapeResult> {
        let total_pages = self.discoverer.discover(&self.region).await?;
        let mut result = ScrapeResult::new(&self.region, total_pages);

        if total_pages == 0 {
            warn!("⚠️ 地区 {} 没有可抓取的页面", self.region);
            return Ok(result);
        }

        log_pages_discovered(&self.region, total_pages, self.gate.limit());

        let mut tasks = self.spawn_page_tasks(total_pages);
        let mut completed = 0;

        // 按完成顺序收集
        while let Some(joined) = tasks.join_next().await {
            completed += 1;
            match joined {
                Ok((_, PageOutcome::Succeeded(records))) => result.push_page(records),
                Ok((page, PageOutcome::Failed)) => result.mark_failed(page),
                Err(e) => error!("❌ 页面任务异常退出: {}", e),
            }
            log_progress(completed, total_pages as usize, result.len());
        }

        Ok(result)
    }

    /// 为 [0, total_pages) 中每个页码创建一个任务
    fn spawn_page_tasks(&self, total_pages: PageIndex) -> JoinSet<(PageIndex, PageOutcome)> {
        let mut tasks = JoinSet::new();

        for page in 0..total_pages {
            let fetcher = self.fetcher.clone();
            let ctx = PageCtx::new(self.region.clone(), page, total_pages);
            tasks.spawn(async move {
                let outcome = fetcher.fetch(&ctx).await;
                (page, outcome)
            });
        }

        tasks
    }
}
