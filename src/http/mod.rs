pub mod client;
pub mod header;
pub mod request;
pub mod response;
pub mod types;

// Re-export commonly used types for convenient access
pub use client::Client;
pub use header::{Header, HeaderList};
pub use request::{RequestDraft, ResolvedRequest};
pub use response::Response;
pub use types::{Method, Status};
