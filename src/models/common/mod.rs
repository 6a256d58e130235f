pub mod error;

pub use error::{LookupError, StatusPolicy};
