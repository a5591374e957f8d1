pub mod catalog;
pub mod error;
pub mod intent;
pub mod models;

pub use error::{RuleTableError, ValidationError};
pub use intent::{classify, Classification, RuleTable, FALLBACK_RESPONSE};
pub use models::*;
