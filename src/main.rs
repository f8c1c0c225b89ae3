use anyhow::Result;
use registrant_scrape::utils::logging;
use registrant_scrape::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let mut config = Config::load()?;

    // 第一个参数可覆盖目标地区
    if let Some(region) = std::env::args().nth(1) {
        config.region = region;
        config.validate()?;
    }

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config)?.run().await?;

    Ok(())
}
