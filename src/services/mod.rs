pub mod page_extractor;
pub mod pagination;
pub mod result_writer;

pub use page_extractor::PageExtractor;
pub use pagination::PaginationDiscoverer;
pub use result_writer::ResultWriter;
