//! 页面解析服务 - 业务能力层
//!
//! 只负责"把一页 HTML 变成记录列表"，不关心网络和并发

use crate::error::{AppError, AppResult, ParseError};
use crate::models::{Record, NOT_AVAILABLE};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

const ENTRY_SELECTOR: &str = "li.media.mb-3.border-bottom.pb-3";
const BODY_SELECTOR: &str = "div.media-body";
const TITLE_SELECTOR: &str = "strong.mt-0.mb-1.title-font";
const PROFILE_LINK_SELECTOR: &str = "a.btn.btn-primary";

/// "姓名 (注册号)" 的分隔符
const TITLE_DELIMITER: &str = " (";

/// 公司、地址在正文文本片段中的固定位置。
/// 片段 0 是姓名标签本身；上游页面调整字段顺序时这里会静默取错字段。
const COMPANY_SEGMENT: usize = 1;
const ADDRESS_SEGMENT: usize = 2;

pub(crate) fn compile_selector(css: &str) -> AppResult<Selector> {
    Selector::parse(css).map_err(|e| AppError::invalid_selector(css, format!("{:?}", e)))
}

/// 页面解析器
///
/// 职责：
/// - 定位每个注册人条目
/// - 逐条解析，单条失败只丢弃该条
/// - 保持文档顺序
#[derive(Debug, Clone)]
pub struct PageExtractor {
    base_url: Url,
    region: String,
    entry: Selector,
    body: Selector,
    title: Selector,
    profile_link: Selector,
}

impl PageExtractor {
    /// 创建新的页面解析器
    ///
    /// # 参数
    /// - `base_url`: 用于拼接详情链接的源地址
    /// - `region`: 写入每条记录的地区
    pub fn new(base_url: &str, region: impl Into<String>) -> AppResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| AppError::invalid_config("base_url", e.to_string()))?;

        Ok(Self {
            base_url,
            region: region.into(),
            entry: compile_selector(ENTRY_SELECTOR)?,
            body: compile_selector(BODY_SELECTOR)?,
            title: compile_selector(TITLE_SELECTOR)?,
            profile_link: compile_selector(PROFILE_LINK_SELECTOR)?,
        })
    }

    /// 解析一页 HTML
    ///
    /// 空页面或全部条目都不合法时返回空列表，不视为失败。
    pub fn extract(&self, markup: &str) -> Vec<Record> {
        let document = Html::parse_document(markup);

        document
            .select(&self.entry)
            .enumerate()
            .filter_map(|(position, entry)| match self.parse_entry(entry) {
                Ok(record) => Some(record),
                Err(e @ (ParseError::MissingEntryBody
                | ParseError::MissingTitle
                | ParseError::MalformedTitle { .. })) => {
                    debug!("跳过第 {} 个条目: {}", position + 1, e);
                    None
                }
                Err(e) => {
                    warn!("解析第 {} 个条目失败，已丢弃: {}", position + 1, e);
                    None
                }
            })
            .collect()
    }

    /// 解析单个条目
    fn parse_entry(&self, entry: ElementRef<'_>) -> Result<Record, ParseError> {
        let body = entry
            .select(&self.body)
            .next()
            .ok_or(ParseError::MissingEntryBody)?;

        let title = body
            .select(&self.title)
            .next()
            .ok_or(ParseError::MissingTitle)?
            .text()
            .collect::<String>();

        let (name, registration_number) = split_title(&title)?;
        let profile_url = self.resolve_profile_url(entry)?;

        let segments = text_segments(body);
        let segment_or_na = |index: usize| {
            segments
                .get(index)
                .cloned()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        };

        Ok(Record {
            name,
            registration_number,
            company: segment_or_na(COMPANY_SEGMENT),
            address: segment_or_na(ADDRESS_SEGMENT),
            region: self.region.clone(),
            profile_url,
        })
    }

    /// 详情链接存在时拼成绝对地址，不存在时为 None
    fn resolve_profile_url(&self, entry: ElementRef<'_>) -> Result<Option<String>, ParseError> {
        let Some(link) = entry.select(&self.profile_link).next() else {
            return Ok(None);
        };

        let href = link
            .value()
            .attr("href")
            .ok_or(ParseError::MissingProfileHref)?;

        self.base_url
            .join(href)
            .map(|url| Some(url.to_string()))
            .map_err(|source| ParseError::InvalidProfileUrl {
                href: href.to_string(),
                source,
            })
    }
}

/// 按第一个 " (" 拆分出姓名和注册号
fn split_title(title: &str) -> Result<(String, String), ParseError> {
    let (name, rest) = title
        .split_once(TITLE_DELIMITER)
        .ok_or_else(|| ParseError::MalformedTitle {
            title: title.to_string(),
        })?;

    let registration_number = rest.trim().trim_end_matches(')').trim();

    Ok((name.trim().to_string(), registration_number.to_string()))
}

/// 把条目正文拍平成非空文本片段
fn text_segments(body: ElementRef<'_>) -> Vec<String> {
    body.text()
        .flat_map(|text| text.split('|'))
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
