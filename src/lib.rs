pub mod codec;
pub mod config;
pub mod error;
pub mod history;
pub mod http;
pub mod logger;
pub mod runner;
pub mod storage;
pub mod utils;
pub mod variable;

// Re-export commonly used types
pub use codec::RequestCodec;
pub use error::{ErrorKind, RestpadError, Result};
pub use runner::{Orchestrator, Submission};
