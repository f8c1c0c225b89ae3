/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use crate::config::Config;
use crate::models::ScrapeResult;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// `RUST_LOG` 优先；未设置时按 `verbose` 选择 debug / info。重复调用不会报错。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 注册名录抓取");
    info!("🌍 目标地区: {}", config.region);
    info!("📊 最大并发数: {}", config.max_concurrent_requests);
    info!("⏱️ 请求间隔: {} 毫秒", config.request_delay_ms);
    info!("{}", "=".repeat(60));
}

/// 记录总页数
///
/// # 参数
/// - `region`: 地区
/// - `total_pages`: 总页数
/// - `max_concurrent`: 最大并发数
pub fn log_pages_discovered(region: &str, total_pages: u32, max_concurrent: usize) {
    info!("✓ 地区 {} 找到 {} 页待抓取", region, total_pages);
    info!("📋 最多同时抓取 {} 页\n", max_concurrent);
}

/// 记录抓取进度
///
/// # 参数
/// - `completed`: 已完成页数（含失败）
/// - `total`: 总页数
/// - `records`: 已收集的记录数
pub fn log_progress(completed: usize, total: usize, records: usize) {
    info!(
        "⏳ 进度 {}/{} 页 ({:.0}%)，已收集 {} 条记录",
        completed,
        total,
        percent(completed, total),
        records
    );
}

/// 打印最终统计信息
///
/// # 参数
/// - `result`: 抓取结果
/// - `output_file`: 输出文件路径（没有写入时为 None）
pub fn print_final_stats(result: &ScrapeResult, output_file: Option<&Path>) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部抓取完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("🌍 地区: {}", result.region);
    info!(
        "✅ 成功页数: {}/{}",
        result.succeeded_pages, result.total_pages
    );
    info!("❌ 失败页数: {}", result.unsuccessful_pages());
    if !result.failed_pages.is_empty() {
        let mut failed: Vec<_> = result.failed_pages.iter().map(|p| p + 1).collect();
        failed.sort_unstable();
        info!("   失败页码: {:?}", failed);
    }
    info!("👤 记录总数: {}", result.len());
    info!("{}", "=".repeat(60));
    if let Some(path) = output_file {
        info!("\n数据已保存至: {}", path.display());
    }
}

fn percent(completed: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        completed as f64 * 100.0 / total as f64
    }
}
