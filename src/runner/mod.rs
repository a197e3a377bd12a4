pub mod orchestrator;

pub use orchestrator::{Orchestrator, Submission};
