//! 单页抓取流程 - 流程层
//!
//! 核心职责：定义"一页"的完整处理流程
//!
//! 流程顺序：
//! 1. 获取并发槽位
//! 2. 构造请求 → 发送 → 解析
//! 3. 等待固定间隔（无论成败）
//! 4. 归还槽位

use crate::clients::{RegisterClient, RequestFactory};
use crate::error::AppResult;
use crate::infrastructure::ConcurrencyGate;
use crate::models::Record;
use crate::services::PageExtractor;
use crate::workflow::page_ctx::PageCtx;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// 单页处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// 请求成功（记录可能为空）
    Succeeded(Vec<Record>),
    /// 请求失败，本页不贡献任何记录
    Failed,
}

impl PageOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, PageOutcome::Failed)
    }
}

/// 单页抓取器
///
/// - 持有共享的客户端、解析器和并发闸门
/// - 可廉价 clone，每个页面任务持有一份
/// - 任何错误都只影响当前页
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Arc<RegisterClient>,
    factory: Arc<RequestFactory>,
    extractor: Arc<PageExtractor>,
    gate: ConcurrencyGate,
    delay: Duration,
}

impl PageFetcher {
    /// 创建新的单页抓取器
    pub fn new(
        client: Arc<RegisterClient>,
        factory: Arc<RequestFactory>,
        extractor: Arc<PageExtractor>,
        gate: ConcurrencyGate,
        delay: Duration,
    ) -> Self {
        Self {
            client,
            factory,
            extractor,
            gate,
            delay,
        }
    }

    /// 抓取并解析一页
    ///
    /// 槽位在等待间隔结束后才释放，因此间隔同样计入并发上限。
    pub async fn fetch(&self, ctx: &PageCtx) -> PageOutcome {
        let _permit = match self.gate.acquire().await {
            Ok(permit) => permit,
            Err(e) => {
                error!("{} ❌ 无法获取请求槽位: {}", ctx, e);
                return PageOutcome::Failed;
            }
        };

        debug!("{} 🔍 开始请求", ctx);

        let attempt = AssertUnwindSafe(self.fetch_records(ctx))
            .catch_unwind()
            .await;

        let outcome = match attempt {
            Ok(Ok(records)) => {
                info!("{} ✓ 解析到 {} 条记录", ctx, records.len());
                PageOutcome::Succeeded(records)
            }
            Ok(Err(e)) => {
                warn!("{} ❌ 抓取失败: {}", ctx, e);
                PageOutcome::Failed
            }
            Err(_) => {
                error!("{} ❌ 抓取过程中发生异常", ctx);
                PageOutcome::Failed
            }
        };

        sleep(self.delay).await;

        outcome
    }

    async fn fetch_records(&self, ctx: &PageCtx) -> AppResult<Vec<Record>> {
        let descriptor = self.factory.build(&ctx.region, ctx.page)?;
        let markup = self.client.post_listing(descriptor).await?;
        Ok(self.extractor.extract(&markup))
    }
}
