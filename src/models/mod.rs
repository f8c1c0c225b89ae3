pub mod record;

pub use record::{PageIndex, Record, ScrapeResult, NOT_AVAILABLE};
