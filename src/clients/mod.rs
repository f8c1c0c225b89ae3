pub mod register_client;
pub mod request_factory;

pub use register_client::RegisterClient;
pub use request_factory::{RequestDescriptor, RequestFactory};
