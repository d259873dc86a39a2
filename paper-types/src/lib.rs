pub mod extraction;
pub mod record;
pub mod source;

pub use record::{PaperRecord, NOT_AVAILABLE};
pub use source::{NetworkError, PaperSource};

// Re-export extraction types
pub use extraction::*;
