//! Business logic services.

pub mod digest;
pub mod parser;
pub mod storage;

pub use digest::{start_digest_tasks, DigestConfig};
pub use parser::ParserClient;
pub use storage::Storage;
