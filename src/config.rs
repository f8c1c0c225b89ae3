use crate::error::{AppError, AppResult, ConfigError, FileError};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// 指向 TOML 配置文件的环境变量
pub const CONFIG_PATH_ENV: &str = "SCRAPE_CONFIG";

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 目标地区（对应服务端 Country 过滤器的取值）
    pub region: String,
    /// 同时进行的请求数量上限
    pub max_concurrent_requests: usize,
    /// 每次请求结束后的等待时间（毫秒）
    pub request_delay_ms: u64,
    /// 服务端源地址
    pub base_url: String,
    /// 列表接口路径
    pub listing_path: String,
    /// 单个请求超时（秒）
    pub request_timeout_secs: u64,
    /// 结果输出目录
    pub output_dir: String,
    /// 结果文件名前缀
    pub output_prefix: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: "United Kingdom".to_string(),
            max_concurrent_requests: 5,
            request_delay_ms: 1000,
            base_url: "https://www.architects-register.org.uk".to_string(),
            listing_path: "/registrant/list".to_string(),
            request_timeout_secs: 30,
            output_dir: "output".to_string(),
            output_prefix: "architects".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 加载配置：默认值 → TOML 文件（可选）→ 环境变量 → 校验
    pub fn load() -> AppResult<Self> {
        let base = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_toml_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        let config = base.with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件读取配置，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| FileError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    fn from_toml_str(content: &str, origin: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|source| {
            AppError::Config(ConfigError::TomlParseFailed {
                path: origin.to_string(),
                source,
            })
        })
    }

    /// 使用环境变量覆盖已有配置
    pub fn with_env_overrides(self) -> AppResult<Self> {
        Ok(Self {
            region: env_string("SCRAPE_REGION").unwrap_or(self.region),
            max_concurrent_requests: env_parse("MAX_CONCURRENT_REQUESTS", "usize")?
                .unwrap_or(self.max_concurrent_requests),
            request_delay_ms: env_parse("REQUEST_DELAY_MS", "u64")?
                .unwrap_or(self.request_delay_ms),
            base_url: env_string("BASE_URL").unwrap_or(self.base_url),
            listing_path: env_string("LISTING_PATH").unwrap_or(self.listing_path),
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", "u64")?
                .unwrap_or(self.request_timeout_secs),
            output_dir: env_string("OUTPUT_DIR").unwrap_or(self.output_dir),
            output_prefix: env_string("OUTPUT_PREFIX").unwrap_or(self.output_prefix),
            verbose_logging: env_parse("VERBOSE_LOGGING", "bool")?
                .unwrap_or(self.verbose_logging),
        })
    }

    /// 校验配置
    pub fn validate(&self) -> AppResult<()> {
        if self.region.trim().is_empty() {
            return Err(AppError::invalid_config("region", "地区不能为空"));
        }
        if self.max_concurrent_requests == 0 {
            return Err(AppError::invalid_config(
                "max_concurrent_requests",
                "并发数必须大于 0",
            ));
        }
        if let Err(e) = url::Url::parse(&self.base_url) {
            return Err(AppError::invalid_config("base_url", e.to_string()));
        }
        Ok(())
    }

    /// 列表接口完整地址
    pub fn listing_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.listing_path.trim_start_matches('/')
        )
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn env_string(var_name: &str) -> Option<String> {
    std::env::var(var_name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: FromStr>(var_name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match env_string(var_name) {
        None => Ok(None),
        Some(value) => value.trim().parse().map(Some).map_err(|_| {
            AppError::Config(ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            })
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_concurrent_requests, 5);
        assert_eq!(
            config.listing_url(),
            "https://www.architects-register.org.uk/registrant/list"
        );
    }

    #[test]
    fn test_toml_partial_override_keeps_defaults() {
        let content = r#"
            region = "Ireland"
            max_concurrent_requests = 2
            request_delay_ms = 0
        "#;
        let config = Config::from_toml_str(content, "inline").unwrap();

        assert_eq!(config.region, "Ireland");
        assert_eq!(config.max_concurrent_requests, 2);
        assert_eq!(config.request_delay(), Duration::ZERO);
        // 未配置的字段保持默认值
        assert_eq!(config.listing_path, "/registrant/list");
        assert_eq!(config.output_prefix, "architects");
    }

    #[test]
    fn test_toml_type_error_is_reported() {
        let result = Config::from_toml_str("max_concurrent_requests = \"many\"", "inline");
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::TomlParseFailed { .. }))
        ));
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let config = Config {
            max_concurrent_requests: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AppError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = Config {
            base_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_listing_url_joins_slashes() {
        let config = Config {
            base_url: "http://127.0.0.1:8080/".to_string(),
            listing_path: "registrant/list".to_string(),
            ..Config::default()
        };
        assert_eq!(config.listing_url(), "http://127.0.0.1:8080/registrant/list");
    }
}
