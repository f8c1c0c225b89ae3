use thiserror::Error;

/// 应用程序错误类型
///
/// 只有初始化阶段（配置、HTTP 客户端）和持久化阶段的错误会返回给调用方；
/// 抓取阶段的单页 / 单条目错误在各自的层级被记录并吸收。
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 页面解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// HTTP 客户端初始化失败
    #[error("HTTP 客户端初始化失败: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// 并发闸门已关闭
    #[error("并发闸门已关闭，无法获取请求槽位")]
    GateClosed,
    /// JSON 序列化失败
    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败（超时、连接重置等）
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务器返回非成功状态码
    #[error("API返回错误状态 ({endpoint}): {status}")]
    BadStatus { endpoint: String, status: u16 },
    /// 读取响应体失败
    #[error("读取响应体失败 ({endpoint}): {source}")]
    BodyReadFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// 页面解析错误
#[derive(Debug, Error)]
pub enum ParseError {
    /// CSS 选择器无效
    #[error("CSS 选择器无效 '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
    /// 页面中找不到总页数片段
    #[error("页面中找不到总页数信息")]
    PageCountMissing,
    /// 总页数片段无法解析为整数
    #[error("无法解析总页数 '{text}': {source}")]
    PageCountInvalid {
        text: String,
        #[source]
        source: std::num::ParseIntError,
    },
    /// 条目缺少正文容器
    #[error("条目缺少 media-body 容器")]
    MissingEntryBody,
    /// 条目缺少姓名标签
    #[error("条目缺少姓名/注册号标签")]
    MissingTitle,
    /// 姓名标签不符合 "姓名 (注册号)" 格式
    #[error("姓名标签格式错误: '{title}'")]
    MalformedTitle { title: String },
    /// 详情链接缺少 href
    #[error("详情链接缺少 href 属性")]
    MissingProfileHref,
    /// 详情链接无法解析为绝对地址
    #[error("无法解析详情链接 '{href}': {source}")]
    InvalidProfileUrl {
        href: String,
        #[source]
        source: url::ParseError,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 创建目录失败
    #[error("创建目录失败 ({path}): {source}")]
    CreateDirFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// TOML 配置文件解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 配置值不合法
    #[error("配置项 {field} 不合法: {reason}")]
    InvalidValue { field: String, reason: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建配置值不合法错误
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Config(ConfigError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// 创建选择器无效错误
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Parse(ParseError::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
