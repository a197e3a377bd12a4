pub mod log;
pub mod model;
pub mod printer;

pub use log::{HistoryLog, MAX_ENTRIES};
pub use model::{HistoryEntry, RequestSnapshot};
