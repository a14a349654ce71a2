pub mod client;
pub mod engine;
pub mod export;
pub mod prompt;
pub mod workflow;

pub use crate::domain::model::{ComparisonRequest, ComparisonResult, ProjectData};
pub use crate::domain::ports::{GenerationOptions, GenerativeBackend, Storage};
pub use crate::utils::error::Result;
