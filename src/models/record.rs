use serde::{Deserialize, Serialize};

/// 页码（从 0 开始）
pub type PageIndex = u32;

/// 源页面缺少可选字段时使用的占位值
pub const NOT_AVAILABLE: &str = "N/A";

/// 一条注册人记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// 姓名
    pub name: String,
    /// 注册号
    pub registration_number: String,
    /// 公司（缺失时为 [`NOT_AVAILABLE`]）
    pub company: String,
    /// 地址（缺失时为 [`NOT_AVAILABLE`]）
    pub address: String,
    /// 地区
    pub region: String,
    /// 详情页绝对地址
    pub profile_url: Option<String>,
}

/// 一次完整抓取的汇总结果
///
/// `records` 按页面完成顺序拼接，页内保持文档顺序。
#[derive(Debug, Clone, Default)]
pub struct ScrapeResult {
    pub region: String,
    pub total_pages: PageIndex,
    pub succeeded_pages: usize,
    pub failed_pages: Vec<PageIndex>,
    pub records: Vec<Record>,
}

impl ScrapeResult {
    pub fn new(region: impl Into<String>, total_pages: PageIndex) -> Self {
        Self {
            region: region.into(),
            total_pages,
            ..Default::default()
        }
    }

    /// 追加一个成功页面的记录
    pub fn push_page(&mut self, records: Vec<Record>) {
        self.succeeded_pages += 1;
        self.records.extend(records);
    }

    /// 标记一个失败页面
    pub fn mark_failed(&mut self, page: PageIndex) {
        self.failed_pages.push(page);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 未成功的页面数量（包括任务异常退出、无法定位页码的情况）
    pub fn unsuccessful_pages(&self) -> usize {
        (self.total_pages as usize).saturating_sub(self.succeeded_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> Record {
        Record {
            name: name.to_string(),
            registration_number: "0000000".to_string(),
            company: NOT_AVAILABLE.to_string(),
            address: NOT_AVAILABLE.to_string(),
            region: "United Kingdom".to_string(),
            profile_url: None,
        }
    }

    #[test]
    fn test_scrape_result_accumulates_pages() {
        let mut result = ScrapeResult::new("United Kingdom", 3);
        result.push_page(vec![record("A"), record("B")]);
        result.mark_failed(1);
        result.push_page(vec![record("C")]);

        assert_eq!(result.len(), 3);
        assert_eq!(result.succeeded_pages, 2);
        assert_eq!(result.failed_pages, vec![1]);
        assert_eq!(result.unsuccessful_pages(), 1);
        let names: Vec<_> = result.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn test_missing_profile_url_serializes_as_null() {
        let value = serde_json::to_value(record("A")).unwrap();
        assert!(value["profile_url"].is_null());
        assert_eq!(value["company"], "N/A");
    }
}
