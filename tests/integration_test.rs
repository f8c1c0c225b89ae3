use registrant_scrape::clients::{RegisterClient, RequestFactory};
use registrant_scrape::config::Config;
use registrant_scrape::services::{PageExtractor, PaginationDiscoverer};
use registrant_scrape::utils::logging;
use std::sync::Arc;

#[tokio::test]
#[ignore] // 默认忽略，需要访问真实服务：cargo test -- --ignored
async fn test_discover_live_page_count() {
    // 初始化日志
    logging::init(true);

    // 加载配置
    let config = Config::load().expect("加载配置失败");

    let client = Arc::new(RegisterClient::new(&config).expect("创建客户端失败"));
    let factory = Arc::new(RequestFactory::new(&config.base_url).expect("创建请求构造器失败"));
    let discoverer = PaginationDiscoverer::new(client, factory).expect("创建分页探测器失败");

    let total_pages = discoverer
        .discover(&config.region)
        .await
        .expect("请求总页数失败");

    println!("地区 {} 共 {} 页", config.region, total_pages);
    assert!(total_pages > 0, "真实服务应该至少有一页");
}

#[tokio::test]
#[ignore]
async fn test_extract_live_first_page() {
    logging::init(true);

    let config = Config::load().expect("加载配置失败");

    let client = RegisterClient::new(&config).expect("创建客户端失败");
    let factory = RequestFactory::new(&config.base_url).expect("创建请求构造器失败");
    let extractor = PageExtractor::new(&config.base_url, &config.region).expect("创建解析器失败");

    let descriptor = factory.build(&config.region, 0).expect("构造请求失败");
    let markup = client.post_listing(descriptor).await.expect("请求第一页失败");
    let records = extractor.extract(&markup);

    println!("第一页解析到 {} 条记录", records.len());
    assert!(!records.is_empty(), "第一页应该有记录");
    assert!(records.iter().all(|r| !r.name.is_empty()));
}
