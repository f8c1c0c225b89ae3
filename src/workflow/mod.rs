pub mod page_ctx;
pub mod page_fetcher;

pub use page_ctx::PageCtx;
pub use page_fetcher::{PageFetcher, PageOutcome};
