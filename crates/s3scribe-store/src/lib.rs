pub mod checker;
pub mod memory_store;
pub mod s3_store;
pub mod store_trait;

pub use checker::{confirmation_line, ExistenceChecker};
pub use memory_store::MemoryObjectStore;
pub use s3_store::S3ObjectStore;
pub use store_trait::ObjectStore;
