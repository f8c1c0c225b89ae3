//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `scrape_orchestrator` - 抓取编排器
//! - 探测总页数
//! - 为每一页创建任务，并发数量由 `ConcurrencyGate` 控制
//! - 汇总所有成功页面的记录
//!
//! ### `app` - 应用入口
//! - 初始化、运行、写入结果、输出统计
//!
//! ## 层次关系
//!
//! ```text
//! app (一次运行)
//!     ↓
//! scrape_orchestrator (处理 0..total_pages)
//!     ↓
//! workflow::PageFetcher (处理单页)
//!     ↓
//! services (能力层：extract / pagination / write)
//!     ↓
//! clients + infrastructure (HTTP 客户端、并发闸门)
//! ```

pub mod app;
pub mod scrape_orchestrator;

// 重新导出主要类型
pub use app::{App, RunSummary};
pub use scrape_orchestrator::ScrapeOrchestrator;
