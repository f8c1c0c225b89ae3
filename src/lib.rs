//! # Registrant Scrape
//!
//! 抓取分页的注册人名录，并把每一页 HTML 转换为结构化记录
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（请求槽位），只暴露能力
//! - `ConcurrencyGate` - 限制同时进行中的请求数量
//!
//! ### ② 客户端层（Clients）
//! - `RequestFactory` - 根据 (地区, 页码) 构造请求体和请求头
//! - `RegisterClient` - 唯一的 HTTP 连接池，发送列表请求
//!
//! ### ③ 业务能力层（Services）
//! - `PageExtractor` - 一页 HTML → 记录列表
//! - `PaginationDiscoverer` - 读取总页数
//! - `ResultWriter` - 写 JSON 文件
//!
//! ### ④ 流程层（Workflow）
//! - `PageCtx` - 上下文封装（地区 + 页码）
//! - `PageFetcher` - 单页流程（槽位 → 请求 → 解析 → 等待间隔）
//!
//! ### ⑤ 编排层（Orchestration）
//! - `ScrapeOrchestrator` - 调度所有页面任务并汇总结果
//! - `App` - 初始化、运行、持久化、统计

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{PageIndex, Record, ScrapeResult, NOT_AVAILABLE};
pub use orchestrator::{App, RunSummary, ScrapeOrchestrator};
