//! 分页探测服务 - 业务能力层
//!
//! 只负责"这个地区一共有多少页"

use crate::clients::{RegisterClient, RequestFactory};
use crate::error::{ApiError, AppResult, ParseError};
use crate::services::page_extractor::compile_selector;
use scraper::{Html, Selector};
use std::sync::Arc;
use tracing::{info, warn};

const PAGE_COUNT_SELECTOR: &str = "p.d-block.text-right.mt-4";

/// 分页探测器
#[derive(Debug, Clone)]
pub struct PaginationDiscoverer {
    client: Arc<RegisterClient>,
    factory: Arc<RequestFactory>,
    page_count: Selector,
}

impl PaginationDiscoverer {
    /// 创建新的分页探测器
    pub fn new(client: Arc<RegisterClient>, factory: Arc<RequestFactory>) -> AppResult<Self> {
        Ok(Self {
            client,
            factory,
            page_count: compile_selector(PAGE_COUNT_SELECTOR)?,
        })
    }

    /// 请求第 0 页并读取总页数
    ///
    /// 状态码异常或总页数片段无法解析时返回 0；
    /// 网络层错误（连接失败、超时）会中止本次运行。
    pub async fn discover(&self, region: &str) -> AppResult<u32> {
        let descriptor = self.factory.build(region, 0)?;

        let markup = match self.client.post_listing(descriptor).await {
            Ok(markup) => markup,
            Err(ApiError::BadStatus { status, .. }) => {
                warn!("⚠️ 获取总页数失败: 服务器返回状态码 {}", status);
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };

        match self.parse_total_pages(&markup) {
            Ok(total) => {
                info!("✓ 地区 {} 共 {} 页", region, total);
                Ok(total)
            }
            Err(e) => {
                warn!("⚠️ 获取总页数失败: {}", e);
                Ok(0)
            }
        }
    }

    /// 从页面中解析 "Page X of Y" 片段的 Y
    pub fn parse_total_pages(&self, markup: &str) -> Result<u32, ParseError> {
        let document = Html::parse_document(markup);
        let fragment = document
            .select(&self.page_count)
            .next()
            .ok_or(ParseError::PageCountMissing)?
            .text()
            .collect::<String>();

        parse_count_fragment(&fragment)
    }
}

/// 取 "of" 之后的部分作为总页数
fn parse_count_fragment(fragment: &str) -> Result<u32, ParseError> {
    let tail = fragment.trim().rsplit("of").next().unwrap_or_default().trim();

    tail.parse().map_err(|source| ParseError::PageCountInvalid {
        text: fragment.trim().to_string(),
        source,
    })
}
