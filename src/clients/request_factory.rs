/// 列表请求构造器
///
/// 根据地区和页码生成请求体与请求头，纯函数，不做任何 I/O
use crate::error::{AppError, AppResult};
use crate::models::PageIndex;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONTENT_TYPE,
    DNT, ORIGIN, REFERER, USER_AGENT,
};
use serde::Serialize;

const INDEX_FILTER_ID: &str = "Architect";
const REGION_COLUMN: &str = "Country";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// 列过滤器定义: (列名, 显示名, 类型, 前通配, 后通配)
const COLUMN_FILTERS: [(&str, &str, &str, bool, bool); 9] = [
    ("RegistrationNumber", "Registration number", "text", false, false),
    ("ArchitectForename", "Forename", "text", false, false),
    ("ArchitectSurname", "Surname", "text", false, false),
    ("CompanyName", "Company name", "text", false, false),
    ("Address", "Address (contains)", "text", true, true),
    (REGION_COLUMN, "Country", "select", true, true),
    ("Website", "Website", "text", false, false),
    ("Email", "Email", "text", false, false),
    ("Geography", "Distance from UK postcode", "radius", false, false),
];

/// 一次请求的完整描述（请求体 + 请求头）
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub body: String,
    pub headers: HeaderMap,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListingRequest<'a> {
    filters: Vec<ColumnFilter<'a>>,
    sorting: &'a str,
    bounds: Option<()>,
    index_filter_id: &'a str,
    page: PageIndex,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ColumnFilter<'a> {
    index_filter_id: &'a str,
    column: &'a str,
    display: &'a str,
    additional_text: Option<&'a str>,
    allow_multiple: Option<bool>,
    #[serde(rename = "Type")]
    filter_type: &'a str,
    wildcard_start: bool,
    wildcard_end: bool,
    sounds_like: bool,
    sounds_like_enabled: bool,
    sounds_like_default: bool,
    select_items: Option<Vec<&'a str>>,
    value: Option<&'a str>,
}

/// 请求构造器
///
/// 只持有与源地址相关的固定请求头，构造结果只取决于 (region, page)。
#[derive(Debug, Clone)]
pub struct RequestFactory {
    base_headers: HeaderMap,
}

impl RequestFactory {
    /// 创建新的请求构造器
    ///
    /// # 参数
    /// - `origin`: 服务端源地址，用于 Origin / Referer 请求头
    pub fn new(origin: &str) -> AppResult<Self> {
        let origin = origin.trim_end_matches('/');
        let origin_value = HeaderValue::from_str(origin)
            .map_err(|e| AppError::invalid_config("base_url", e.to_string()))?;
        let referer_value = HeaderValue::from_str(&format!("{}/", origin))
            .map_err(|e| AppError::invalid_config("base_url", e.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(DNT, HeaderValue::from_static("1"));
        headers.insert(ORIGIN, origin_value);
        headers.insert(REFERER, referer_value);
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        for (name, value) in [
            ("sec-fetch-dest", "empty"),
            ("sec-fetch-mode", "cors"),
            ("sec-fetch-site", "same-origin"),
            ("x-requested-with", "XMLHttpRequest"),
            ("sec-ch-ua", "\"Chromium\";v=\"131\", \"Not_A Brand\";v=\"24\""),
            ("sec-ch-ua-mobile", "?0"),
            ("sec-ch-ua-platform", "\"macOS\""),
        ] {
            headers.insert(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }

        Ok(Self {
            base_headers: headers,
        })
    }

    /// 构造指定地区、指定页码的请求
    pub fn build(&self, region: &str, page: PageIndex) -> AppResult<RequestDescriptor> {
        let filters = COLUMN_FILTERS
            .iter()
            .map(
                |&(column, display, filter_type, wildcard_start, wildcard_end)| ColumnFilter {
                    index_filter_id: INDEX_FILTER_ID,
                    column,
                    display,
                    additional_text: None,
                    allow_multiple: None,
                    filter_type,
                    wildcard_start,
                    wildcard_end,
                    sounds_like: false,
                    sounds_like_enabled: false,
                    sounds_like_default: false,
                    select_items: None,
                    value: (column == REGION_COLUMN).then_some(region),
                },
            )
            .collect();

        let request = ListingRequest {
            filters,
            sorting: "",
            bounds: None,
            index_filter_id: INDEX_FILTER_ID,
            page,
        };

        Ok(RequestDescriptor {
            body: serde_json::to_string(&request)?,
            headers: self.base_headers.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn factory() -> RequestFactory {
        RequestFactory::new("https://www.architects-register.org.uk").unwrap()
    }

    #[test]
    fn test_build_is_deterministic() {
        let factory = factory();
        let first = factory.build("United Kingdom", 7).unwrap();
        let second = factory.build("United Kingdom", 7).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.body.as_bytes(), second.body.as_bytes());
    }

    #[test]
    fn test_region_only_fills_country_filter() {
        let descriptor = factory().build("Ireland", 0).unwrap();
        let body: Value = serde_json::from_str(&descriptor.body).unwrap();
        let filters = body["filters"].as_array().unwrap();

        assert_eq!(filters.len(), 9);
        for filter in filters {
            if filter["Column"] == "Country" {
                assert_eq!(filter["Value"], "Ireland");
                assert_eq!(filter["Type"], "select");
            } else {
                assert!(filter["Value"].is_null());
            }
            assert_eq!(filter["IndexFilterId"], "Architect");
            assert!(filter["SelectItems"].is_null());
        }
    }

    #[test]
    fn test_body_carries_page_and_defaults() {
        let descriptor = factory().build("United Kingdom", 42).unwrap();
        let body: Value = serde_json::from_str(&descriptor.body).unwrap();

        assert_eq!(body["page"], 42);
        assert_eq!(body["sorting"], "");
        assert!(body["bounds"].is_null());
        assert_eq!(body["indexFilterId"], "Architect");
        assert_eq!(body["filters"][0]["Column"], "RegistrationNumber");
        assert_eq!(body["filters"][8]["Type"], "radius");
    }

    #[test]
    fn test_headers_match_origin() {
        let descriptor = RequestFactory::new("http://127.0.0.1:9000/")
            .unwrap()
            .build("United Kingdom", 0)
            .unwrap();

        assert_eq!(descriptor.headers[ORIGIN], "http://127.0.0.1:9000");
        assert_eq!(descriptor.headers[REFERER], "http://127.0.0.1:9000/");
        assert_eq!(descriptor.headers[CONTENT_TYPE], "application/json");
        assert_eq!(descriptor.headers["x-requested-with"], "XMLHttpRequest");
    }
}
