//! 结果写入服务 - 业务能力层
//!
//! 只负责"把记录写成 JSON 文件"能力，不关心抓取流程

use crate::config::Config;
use crate::error::{AppError, AppResult, FileError};
use crate::models::Record;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// 结果写入服务
pub struct ResultWriter {
    output_dir: PathBuf,
    prefix: String,
}

impl ResultWriter {
    /// 按配置创建
    pub fn new(config: &Config) -> Self {
        Self::with_dir(&config.output_dir, config.output_prefix.clone())
    }

    /// 使用自定义目录创建
    pub fn with_dir(output_dir: impl AsRef<Path>, prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            prefix: prefix.into(),
        }
    }

    /// 写入记录
    ///
    /// 文件名格式: `{前缀}_{地区}_{时间戳}.json`
    ///
    /// # 返回
    /// 返回写入的文件路径
    pub async fn write(&self, records: &[Record], region: &str) -> AppResult<PathBuf> {
        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| FileError::CreateDirFailed {
                path: self.output_dir.display().to_string(),
                source,
            })?;

        let path = self.output_dir.join(self.file_name(region));
        let content = serde_json::to_string_pretty(records)?;

        debug!("写入 {} 条记录到 {}", records.len(), path.display());

        fs::write(&path, content)
            .await
            .map_err(|source| AppError::file_write_failed(path.display().to_string(), source))?;

        Ok(path)
    }

    fn file_name(&self, region: &str) -> String {
        format!(
            "{}_{}_{}.json",
            self.prefix,
            region_slug(region),
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        )
    }
}

/// 地区名转小写并以下划线代替空格
fn region_slug(region: &str) -> String {
    region.to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOT_AVAILABLE;

    #[test]
    fn test_region_slug() {
        assert_eq!(region_slug("United Kingdom"), "united_kingdom");
        assert_eq!(region_slug("Ireland"), "ireland");
    }

    #[tokio::test]
    async fn test_write_creates_directory_and_json_array() {
        let temp = tempfile::tempdir().unwrap();
        let output_dir = temp.path().join("nested").join("output");
        let writer = ResultWriter::with_dir(&output_dir, "architects");

        let records = vec![Record {
            name: "Zoë Ünal".to_string(),
            registration_number: "123".to_string(),
            company: NOT_AVAILABLE.to_string(),
            address: "Straße 1".to_string(),
            region: "United Kingdom".to_string(),
            profile_url: None,
        }];

        let path = writer.write(&records, "United Kingdom").await.unwrap();

        let file_name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(file_name.starts_with("architects_united_kingdom_"));
        assert!(file_name.ends_with(".json"));

        let content = std::fs::read_to_string(&path).unwrap();
        // 非 ASCII 字符原样保留
        assert!(content.contains("Zoë Ünal"));
        let parsed: Vec<Record> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, records);
    }
}
