/// 注册名录 API 客户端
///
/// 封装对列表接口的 POST 调用，所有并发请求共享同一个连接池
use crate::clients::request_factory::RequestDescriptor;
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use reqwest::Client;
use tracing::debug;

/// 注册名录客户端
#[derive(Debug, Clone)]
pub struct RegisterClient {
    http: Client,
    endpoint: String,
}

impl RegisterClient {
    /// 创建新的客户端
    ///
    /// 连接池无法建立时返回错误，这是整个运行中唯一的致命网络错误。
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(AppError::ClientBuild)?;

        Ok(Self {
            http,
            endpoint: config.listing_url(),
        })
    }

    /// 发送列表请求
    ///
    /// # 返回
    /// 成功状态码时返回响应正文；非成功状态码、网络错误和读取正文失败都返回 [`ApiError`]
    pub async fn post_listing(&self, descriptor: RequestDescriptor) -> Result<String, ApiError> {
        debug!("POST {} ({} 字节)", self.endpoint, descriptor.body.len());

        let response = self
            .http
            .post(&self.endpoint)
            .headers(descriptor.headers)
            .body(descriptor.body)
            .send()
            .await
            .map_err(|source| ApiError::RequestFailed {
                endpoint: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadStatus {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|source| ApiError::BodyReadFailed {
                endpoint: self.endpoint.clone(),
                source,
            })
    }
}
