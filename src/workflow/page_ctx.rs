//! 页面处理上下文
//!
//! 封装"我正在抓取哪个地区的第几页"这一信息

use crate::models::PageIndex;
use std::fmt::Display;

/// 页面处理上下文
#[derive(Debug, Clone)]
pub struct PageCtx {
    /// 地区
    pub region: String,

    /// 页码（从 0 开始）
    pub page: PageIndex,

    /// 总页数（仅用于日志显示）
    pub total_pages: PageIndex,
}

impl PageCtx {
    /// 创建新的页面上下文
    pub fn new(region: impl Into<String>, page: PageIndex, total_pages: PageIndex) -> Self {
        Self {
            region: region.into(),
            page,
            total_pages,
        }
    }
}

impl Display for PageCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[地区 {} 第 {}/{} 页]",
            self.region,
            self.page + 1,
            self.total_pages
        )
    }
}
