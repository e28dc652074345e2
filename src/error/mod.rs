mod scout;

pub use scout::{INTERNAL_ERROR_BODY, ScoutError};
