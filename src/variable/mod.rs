pub mod resolver;
pub mod store;
pub mod types;

pub use resolver::VariableResolver;
pub use store::VariableStore;
pub use types::{Substitution, Variable, collect_missing};
