pub mod fetch;
pub mod list;
pub mod search;

// Re-export command functions for convenience
pub use fetch::fetch;
pub use list::{get, list};
pub use search::search;
